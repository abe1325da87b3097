//! Core domain logic for the multi-user to-do backend.
//! This crate is the single source of truth for ownership and update rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, ConnectionPool, DbError, PoolConfig, PooledConnection};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::todo_item::{ItemId, TodoItem, UpdateItemInput};
pub use model::todo_list::{ListId, TodoList, UpdateListInput};
pub use model::user::{NewUser, User, UserId};
pub use model::validation::ValidationError;
pub use repo::error::{Entity, RepoError, RepoResult};
pub use repo::item_repo::{SqliteTodoItemRepository, TodoItemRepository};
pub use repo::list_repo::{SqliteTodoListRepository, TodoListRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use service::error::{ServiceError, ServiceResult};
pub use service::item_service::TodoItemService;
pub use service::list_service::TodoListService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
