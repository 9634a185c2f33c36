//! Connection providers.
//!
//! The availability resolver needs a connection for exactly one query. A
//! [`ConnectionProvider`] hands out a scoped guard; dropping the guard gives
//! the connection back, whichever way the query ends.

use crate::{Connection, Result};
use deadpool_postgres::{ManagerConfig, PoolConfig, RecyclingMethod, Runtime};
use std::future::Future;
use tokio_postgres::NoTls;

/// Something that can lend out a database connection.
pub trait ConnectionProvider: Send + Sync {
    /// The scoped connection guard.
    type Conn<'a>: Connection
    where
        Self: 'a;

    /// Acquire a connection for the duration of one operation.
    fn acquire(&self) -> impl Future<Output = Result<Self::Conn<'_>>> + Send;
}

impl ConnectionProvider for deadpool_postgres::Pool {
    type Conn<'a> = deadpool_postgres::Object;

    fn acquire(&self) -> impl Future<Output = Result<Self::Conn<'_>>> + Send {
        async move { Ok(self.get().await?) }
    }
}

/// A bare client is its own (single) connection.
impl ConnectionProvider for tokio_postgres::Client {
    type Conn<'a> = &'a tokio_postgres::Client;

    fn acquire(&self) -> impl Future<Output = Result<Self::Conn<'_>>> + Send {
        std::future::ready(Ok(self))
    }
}

/// Build a connection pool for `url` (URL or libpq key=value form).
pub fn create_pool(url: &str, max_connections: usize) -> Result<deadpool_postgres::Pool> {
    let config = deadpool_postgres::Config {
        url: Some(url.to_string()),
        manager: Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        }),
        pool: Some(PoolConfig::new(max_connections)),
        ..Default::default()
    };
    Ok(config.create_pool(Some(Runtime::Tokio1), NoTls)?)
}
