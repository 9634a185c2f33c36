//! Traced database connections.
//!
//! Wraps a tokio-postgres connection and logs every query via tracing.

use std::future::Future;
use std::pin::Pin;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Error, Row};
use tracing::Instrument;

type QueryFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Row>, Error>> + Send + 'a>>;

/// Trait for database connections that can run queries.
///
/// This is implemented for `tokio_postgres::Client`, `deadpool_postgres::Object`,
/// and references to either.
pub trait Connection: Send + Sync {
    /// Execute a query, returning all rows.
    fn query<'a>(&'a self, sql: &'a str, params: &'a [&'a (dyn ToSql + Sync)]) -> QueryFuture<'a>;
}

impl Connection for tokio_postgres::Client {
    fn query<'a>(&'a self, sql: &'a str, params: &'a [&'a (dyn ToSql + Sync)]) -> QueryFuture<'a> {
        Box::pin(tokio_postgres::Client::query(self, sql, params))
    }
}

impl Connection for deadpool_postgres::Object {
    fn query<'a>(&'a self, sql: &'a str, params: &'a [&'a (dyn ToSql + Sync)]) -> QueryFuture<'a> {
        // Deref to the underlying Client to avoid recursion
        use std::ops::Deref;
        let client: &tokio_postgres::Client = self.deref();
        Box::pin(client.query(sql, params))
    }
}

impl<C: Connection + ?Sized> Connection for &C {
    fn query<'a>(&'a self, sql: &'a str, params: &'a [&'a (dyn ToSql + Sync)]) -> QueryFuture<'a> {
        (**self).query(sql, params)
    }
}

/// A wrapper around a database connection that logs all queries via tracing.
///
/// Each query runs inside a `db.query` debug span carrying the SQL, the
/// parameter count and, once it returns, the row count.
pub struct TracedConn<'a, C: Connection> {
    conn: &'a C,
}

impl<'a, C: Connection> TracedConn<'a, C> {
    /// Create a new traced connection wrapper.
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Execute a query, returning all rows.
    pub async fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Error> {
        let span = tracing::debug_span!(
            "db.query",
            sql = %sql,
            params = params.len(),
            rows = tracing::field::Empty,
        );
        let rows = self
            .conn
            .query(sql, params)
            .instrument(span.clone())
            .await?;
        span.record("rows", rows.len());
        Ok(rows)
    }
}

/// Extension trait to get a traced wrapper from a connection.
pub trait ConnectionExt: Connection + Sized {
    /// Wrap this connection in a `TracedConn` for query logging.
    fn traced(&self) -> TracedConn<'_, Self> {
        TracedConn::new(self)
    }
}

impl<C: Connection> ConnectionExt for C {}
