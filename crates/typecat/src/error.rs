use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A native class that should be one of ours could not be mapped back
    /// to a known type. The catalog and the dialect registry have drifted.
    #[error("cannot map native class {class} to a known type{}", registered_as(.id))]
    NotSupported { class: String, id: Option<String> },

    /// The caller broke an API contract (e.g. passed an instance where a
    /// class was required).
    #[error("programming error: {0}")]
    ContractViolation(String),

    #[error("{operation}: postgres error: {source}")]
    Query {
        operation: &'static str,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("failed to acquire a connection: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("failed to create connection pool: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),
}

fn registered_as(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" (registered as {id:?})"),
        None => String::new(),
    }
}
