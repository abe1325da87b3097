//! To-do item use-case service.
//!
//! Same contract as the list service: pass-through for reads, creates and
//! deletes; payload validation before `update`.

use crate::model::todo_item::{ItemId, TodoItem, UpdateItemInput};
use crate::model::todo_list::ListId;
use crate::model::user::UserId;
use crate::repo::item_repo::TodoItemRepository;
use crate::service::error::{log_outcome, ServiceError, ServiceResult};
use std::time::Instant;

/// Use-case service wrapper for item operations.
pub struct TodoItemService<R: TodoItemRepository> {
    repo: R,
}

impl<R: TodoItemRepository> TodoItemService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create(
        &self,
        user_id: UserId,
        list_id: ListId,
        item: &TodoItem,
    ) -> ServiceResult<ItemId> {
        let started_at = Instant::now();
        let result = self.repo.create(user_id, list_id, item).map_err(ServiceError::from);
        let item_id = result.as_ref().map_or(0, |id| *id);
        log_outcome(
            "item_create",
            &format!("user_id={user_id} list_id={list_id} item_id={item_id}"),
            started_at,
            &result,
        );
        result
    }

    pub fn get_all(&self, user_id: UserId, list_id: ListId) -> ServiceResult<Vec<TodoItem>> {
        let started_at = Instant::now();
        let result = self.repo.get_all(user_id, list_id).map_err(ServiceError::from);
        let count = result.as_ref().map_or(0, Vec::len);
        log_outcome(
            "item_get_all",
            &format!("user_id={user_id} list_id={list_id} count={count}"),
            started_at,
            &result,
        );
        result
    }

    pub fn get_by_id(&self, user_id: UserId, item_id: ItemId) -> ServiceResult<TodoItem> {
        let started_at = Instant::now();
        let result = self.repo.get_by_id(user_id, item_id).map_err(ServiceError::from);
        log_outcome(
            "item_get",
            &format!("user_id={user_id} item_id={item_id}"),
            started_at,
            &result,
        );
        result
    }

    /// Returns affected rows; `0` for missing or foreign items.
    pub fn delete(&self, user_id: UserId, item_id: ItemId) -> ServiceResult<usize> {
        let started_at = Instant::now();
        let result = self.repo.delete(user_id, item_id).map_err(ServiceError::from);
        let affected = result.as_ref().map_or(0, |n| *n);
        log_outcome(
            "item_delete",
            &format!("user_id={user_id} item_id={item_id} affected={affected}"),
            started_at,
            &result,
        );
        result
    }

    pub fn update(
        &self,
        user_id: UserId,
        item_id: ItemId,
        input: &UpdateItemInput,
    ) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = match input.validate() {
            Ok(()) => self
                .repo
                .update(user_id, item_id, input)
                .map_err(ServiceError::from),
            Err(err) => Err(ServiceError::from(err)),
        };
        log_outcome(
            "item_update",
            &format!(
                "user_id={user_id} item_id={item_id} title_set={} description_set={} done_set={}",
                input.title.is_some(),
                input.description.is_some(),
                input.done.is_some()
            ),
            started_at,
            &result,
        );
        result
    }
}
