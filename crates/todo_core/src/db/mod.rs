//! SQLite storage bootstrap, schema migrations and connection pooling.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the to-do core.
//! - Apply schema migrations in deterministic order.
//! - Hand out pooled connections to concurrent callers.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - Every handed-out connection has `foreign_keys=ON`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub mod migrations;
mod open;
mod pool;

pub use open::{open_db, open_db_in_memory, open_db_with_busy_timeout};
pub use pool::{ConnectionPool, PoolConfig, PooledConnection};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// No pooled connection became idle within the checkout timeout.
    PoolTimeout(Duration),
    /// Rejected `PoolConfig` value.
    InvalidPoolConfig(&'static str),
    /// Pool could not open its initial connections.
    Pool(r2d2::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::PoolTimeout(waited) => write!(
                f,
                "no pooled connection available after {}ms",
                waited.as_millis()
            ),
            Self::InvalidPoolConfig(message) => write!(f, "invalid pool config: {message}"),
            Self::Pool(err) => write!(f, "connection pool failed to start: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Pool(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. }
            | Self::PoolTimeout(_)
            | Self::InvalidPoolConfig(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
