//! Partial update statement builder.
//!
//! # Responsibility
//! - Collect `(column, value)` assignments from optional patch fields.
//! - Compose one `UPDATE ... SET ... WHERE ...` statement with bound values.
//!
//! # Invariants
//! - Column names come only from closed `UpdateColumn` enums.
//! - Values never enter SQL text; every value is bound positionally.
//! - An empty builder never produces a statement.

use crate::repo::error::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// Allow-listed column of one updatable table.
pub trait UpdateColumn: Copy {
    fn column_name(self) -> &'static str;
}

/// Updatable columns of `todo_lists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListColumn {
    Title,
    Description,
}

impl UpdateColumn for ListColumn {
    fn column_name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
        }
    }
}

/// Updatable columns of `todo_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemColumn {
    Title,
    Description,
    Done,
}

impl UpdateColumn for ItemColumn {
    fn column_name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Done => "done",
        }
    }
}

/// Accumulates assignments for a single-row partial update.
#[derive(Debug, Clone)]
pub struct PartialUpdate<C> {
    assignments: Vec<(C, Value)>,
}

impl<C: UpdateColumn> Default for PartialUpdate<C> {
    fn default() -> Self {
        Self {
            assignments: Vec::new(),
        }
    }
}

impl<C: UpdateColumn> PartialUpdate<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment only when `value` is present.
    pub fn set_if_some<V: Into<Value>>(mut self, column: C, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.assignments.push((column, value.into()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Composes the statement for `table`, appending `scope` as the WHERE
    /// clause. `scope` holds one `?` per entry of `scope_values`, bound after
    /// the SET values.
    ///
    /// # Errors
    /// - `EmptyUpdate` when no assignment was collected.
    pub fn build(
        self,
        table: &'static str,
        scope: &'static str,
        scope_values: impl IntoIterator<Item = Value>,
    ) -> RepoResult<UpdateStatement> {
        if self.assignments.is_empty() {
            return Err(RepoError::EmptyUpdate);
        }

        let set_clause = self
            .assignments
            .iter()
            .map(|(column, _)| format!("{} = ?", column.column_name()))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {table} SET {set_clause} WHERE {scope};");

        let mut values: Vec<Value> = self
            .assignments
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        values.extend(scope_values);

        Ok(UpdateStatement { sql, values })
    }
}

/// Finished statement text plus values in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub sql: String,
    pub values: Vec<Value>,
}

impl UpdateStatement {
    /// Executes the statement and returns the affected row count.
    pub fn execute(self, conn: &Connection) -> RepoResult<usize> {
        let changed = conn.execute(&self.sql, params_from_iter(self.values))?;
        Ok(changed)
    }
}
