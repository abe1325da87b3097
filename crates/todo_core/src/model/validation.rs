//! Validation errors shared by domain records and update payloads.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Domain validation failure, raised before any storage access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// `title` is empty or whitespace-only.
    EmptyTitle,
    /// Partial update payload has no field set.
    NothingToUpdate,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::NothingToUpdate => write!(f, "update payload has no values"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn ensure_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}
