//! Repository error taxonomy.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Kind of record a not-found error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    List,
    Item,
    User,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::List => "todo list",
            Self::Item => "todo item",
            Self::User => "user",
        };
        f.write_str(name)
    }
}

/// Error for persistence operations.
///
/// `NotFound` covers both "no such row" and "row owned by someone else";
/// callers cannot tell the two apart.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(Entity, i64),
    /// Partial update reached storage without any assignment.
    EmptyUpdate,
    InvalidData(String),
    /// Explicit rollback after `cause` failed as well.
    RollbackFailed {
        cause: Box<RepoError>,
        rollback: rusqlite::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(entity, id) => write!(f, "{entity} not found: {id}"),
            Self::EmptyUpdate => write!(f, "refusing to run update without values"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::RollbackFailed { cause, rollback } => {
                write!(f, "rollback failed ({rollback}) after error: {cause}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::RollbackFailed { cause, .. } => Some(cause.as_ref()),
            Self::NotFound(..) | Self::EmptyUpdate | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
