//! To-do item domain model.
//!
//! Items belong to exactly one list and inherit that list's owners.

use crate::model::todo_list::ListId;
use crate::model::validation::{ensure_title, ValidationError};
use serde::{Deserialize, Serialize};

/// Stable integer identifier generated by storage on insert.
pub type ItemId = i64;

/// A single entry inside a to-do list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    #[serde(default)]
    pub id: ItemId,
    /// Parent list. Ignored on create; the list id argument wins.
    #[serde(default)]
    pub list_id: ListId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub done: bool,
}

impl TodoItem {
    /// Creates an unsaved, not-done item.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            list_id: 0,
            title: title.into(),
            description: description.into(),
            done: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_title(&self.title)
    }
}

/// Partial update for an item. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItemInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

impl UpdateItemInput {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.done.is_none()
    }

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
