//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every list/item query is scoped by the caller's ownership rows.
//! - Multi-statement writes run inside one transaction.
//! - Repositories never log; logging happens at the service boundary.

pub mod error;
pub mod item_repo;
pub mod list_repo;
mod transaction;
pub mod update;
pub mod user_repo;
