//! Service error taxonomy and call-boundary logging.

use crate::model::validation::ValidationError;
use crate::repo::error::{Entity, RepoError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned to callers above the service layer.
#[derive(Debug)]
pub enum ServiceError {
    /// Rejected before storage access; user-correctable.
    Validation(ValidationError),
    /// Missing, or owned by another user.
    NotFound(Entity, i64),
    /// Storage or transaction failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Stable machine-readable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::NotFound(..) => "not_found",
            Self::Repo(RepoError::RollbackFailed { .. }) => "rollback_failed",
            Self::Repo(_) => "storage_failed",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid input: {err}"),
            Self::NotFound(entity, id) => write!(f, "{entity} not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound(..) => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(entity, id) => Self::NotFound(entity, id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Emits one `event=<event> module=service` line for a finished call.
///
/// `fields` carries ids only; titles and descriptions stay out of logs.
pub(crate) fn log_outcome<T>(
    event: &str,
    fields: &str,
    started_at: Instant,
    result: &Result<T, ServiceError>,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!(
            "event={} module=service status=ok {} duration_ms={}",
            event,
            fields,
            duration_ms
        ),
        Err(err @ (ServiceError::Validation(_) | ServiceError::NotFound(..))) => warn!(
            "event={} module=service status=rejected {} duration_ms={} error_code={}",
            event,
            fields,
            duration_ms,
            err.code()
        ),
        Err(err) => error!(
            "event={} module=service status=error {} duration_ms={} error_code={} error={}",
            event,
            fields,
            duration_ms,
            err.code(),
            err
        ),
    }
}
