//! To-do list use-case service.
//!
//! # Responsibility
//! - Validate update payloads before any storage access.
//! - Delegate to repository implementations and log each call.
//!
//! # Invariants
//! - `update` with no fields fails with `ServiceError::Validation` and never
//!   reaches the repository.
//! - Service layer remains storage-agnostic.

use crate::model::todo_list::{ListId, TodoList, UpdateListInput};
use crate::model::user::UserId;
use crate::repo::list_repo::TodoListRepository;
use crate::service::error::{log_outcome, ServiceError, ServiceResult};
use std::time::Instant;

/// Use-case service wrapper for list operations.
pub struct TodoListService<R: TodoListRepository> {
    repo: R,
}

impl<R: TodoListRepository> TodoListService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a list owned by `user_id` and returns its id.
    pub fn create(&self, user_id: UserId, list: &TodoList) -> ServiceResult<ListId> {
        let started_at = Instant::now();
        let result = self.repo.create(user_id, list).map_err(ServiceError::from);
        let list_id = result.as_ref().map_or(0, |id| *id);
        log_outcome(
            "list_create",
            &format!("user_id={user_id} list_id={list_id}"),
            started_at,
            &result,
        );
        result
    }

    pub fn get_all(&self, user_id: UserId) -> ServiceResult<Vec<TodoList>> {
        let started_at = Instant::now();
        let result = self.repo.get_all(user_id).map_err(ServiceError::from);
        let count = result.as_ref().map_or(0, Vec::len);
        log_outcome(
            "list_get_all",
            &format!("user_id={user_id} count={count}"),
            started_at,
            &result,
        );
        result
    }

    pub fn get_by_id(&self, user_id: UserId, list_id: ListId) -> ServiceResult<TodoList> {
        let started_at = Instant::now();
        let result = self.repo.get_by_id(user_id, list_id).map_err(ServiceError::from);
        log_outcome(
            "list_get",
            &format!("user_id={user_id} list_id={list_id}"),
            started_at,
            &result,
        );
        result
    }

    /// Deletes an owned list.
    ///
    /// Returns the affected row count: `0` means the list does not exist or
    /// is not owned by `user_id`; it is not an error.
    pub fn delete(&self, user_id: UserId, list_id: ListId) -> ServiceResult<usize> {
        let started_at = Instant::now();
        let result = self.repo.delete(user_id, list_id).map_err(ServiceError::from);
        let affected = result.as_ref().map_or(0, |n| *n);
        log_outcome(
            "list_delete",
            &format!("user_id={user_id} list_id={list_id} affected={affected}"),
            started_at,
            &result,
        );
        result
    }

    /// Applies a partial update after validating the payload.
    pub fn update(
        &self,
        user_id: UserId,
        list_id: ListId,
        input: &UpdateListInput,
    ) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = match input.validate() {
            Ok(()) => self
                .repo
                .update(user_id, list_id, input)
                .map_err(ServiceError::from),
            Err(err) => Err(ServiceError::from(err)),
        };
        log_outcome(
            "list_update",
            &format!(
                "user_id={user_id} list_id={list_id} title_set={} description_set={}",
                input.title.is_some(),
                input.description.is_some()
            ),
            started_at,
            &result,
        );
        result
    }

    /// Shares an owned list with another user.
    pub fn add_owner(
        &self,
        user_id: UserId,
        list_id: ListId,
        new_owner_id: UserId,
    ) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = self
            .repo
            .add_owner(user_id, list_id, new_owner_id)
            .map_err(ServiceError::from);
        log_outcome(
            "list_share",
            &format!("user_id={user_id} list_id={list_id} new_owner_id={new_owner_id}"),
            started_at,
            &result,
        );
        result
    }
}
