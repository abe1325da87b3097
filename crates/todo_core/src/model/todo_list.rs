//! To-do list domain model.
//!
//! # Responsibility
//! - Define the list record and its partial-update payload.
//!
//! # Invariants
//! - `title` is non-empty after trimming.
//! - `UpdateListInput` carries at least one value when it reaches storage.

use crate::model::validation::{ensure_title, ValidationError};
use serde::{Deserialize, Serialize};

/// Stable integer identifier generated by storage on insert.
pub type ListId = i64;

/// A to-do list owned by one or more users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// Zero until storage assigns an id.
    #[serde(default)]
    pub id: ListId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl TodoList {
    /// Creates an unsaved list (`id == 0`).
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Checks record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_title(&self.title)
    }
}

/// Partial update for a list. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateListInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateListInput {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Returns whether no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    /// Rejects empty payloads and blank titles.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::NothingToUpdate);
        }
        if let Some(title) = self.title.as_deref() {
            ensure_title(title)?;
        }
        Ok(())
    }
}
