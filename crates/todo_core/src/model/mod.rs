//! Domain model for lists, items and their owners.
//!
//! # Responsibility
//! - Define the canonical records shared by repository and service layers.
//! - Define partial-update payloads and their validation rules.
//!
//! # Invariants
//! - Every list is reachable from at least one owner via `users_lists`.
//! - Items are owned transitively through their parent list.
//! - Update payloads carry at least one field.

pub mod todo_item;
pub mod todo_list;
pub mod user;
pub mod validation;
