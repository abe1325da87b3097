//! SQLite connection pool for concurrent callers.
//!
//! # Responsibility
//! - Migrate the database file once, then hand out pooled connections.
//! - Map pool sizing and wait limits from `PoolConfig` onto `r2d2`.
//!
//! # Invariants
//! - Every pooled connection has `foreign_keys=ON`, the busy timeout and WAL.
//! - Checkout waits at most `checkout_timeout_ms`, then fails with
//!   `DbError::PoolTimeout`.

use super::open::{configure_file_connection, open_db_with_busy_timeout, DEFAULT_BUSY_TIMEOUT};
use super::{DbError, DbResult};
use r2d2_sqlite::SqliteConnectionManager;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_CHECKOUT_TIMEOUT_MS: u64 = 30_000;

/// Connection lent out by [`ConnectionPool::get`]; returned to the pool on drop.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Pool sizing and wait limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of connections opened eagerly.
    pub size: u32,
    /// Max wait for an idle connection.
    pub checkout_timeout_ms: u64,
    /// SQLite busy timeout applied to every pooled connection.
    pub busy_timeout_ms: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_POOL_SIZE,
            checkout_timeout_ms: DEFAULT_CHECKOUT_TIMEOUT_MS,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT.as_millis() as u64,
        }
    }
}

impl PoolConfig {
    fn validate(&self) -> DbResult<()> {
        if self.size == 0 {
            return Err(DbError::InvalidPoolConfig("size must be at least 1"));
        }
        if self.checkout_timeout_ms == 0 {
            return Err(DbError::InvalidPoolConfig(
                "checkout_timeout_ms must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Cloneable handle to a shared set of connections to one database file.
#[derive(Clone)]
pub struct ConnectionPool {
    inner: r2d2::Pool<SqliteConnectionManager>,
}

impl ConnectionPool {
    /// Migrates `path`, then opens `config.size` connections to it.
    pub fn open(path: impl AsRef<Path>, config: PoolConfig) -> DbResult<Self> {
        config.validate()?;

        let path = path.as_ref();
        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        // Migrations run on a dedicated connection so pooled connections
        // never race each other on a fresh file.
        drop(open_db_with_busy_timeout(path, busy_timeout)?);

        let manager = SqliteConnectionManager::file(path)
            .with_init(move |conn| configure_file_connection(conn, busy_timeout));
        let inner = r2d2::Pool::builder()
            .max_size(config.size)
            .connection_timeout(Duration::from_millis(config.checkout_timeout_ms))
            .build(manager)
            .map_err(DbError::Pool)?;

        Ok(Self { inner })
    }

    /// Borrows an idle connection, blocking until one is returned or the
    /// checkout timeout elapses.
    pub fn get(&self) -> DbResult<PooledConnection> {
        self.inner
            .get()
            .map_err(|_| DbError::PoolTimeout(self.inner.connection_timeout()))
    }

    /// Total number of connections the pool may hold.
    pub fn size(&self) -> u32 {
        self.inner.max_size()
    }

    /// Number of connections currently not lent out.
    pub fn idle_count(&self) -> u32 {
        self.inner.state().idle_connections
    }
}
