//! Core use-case services.
//!
//! # Responsibility
//! - Validate inputs and orchestrate repository calls.
//! - Emit one structured log line per call at this boundary.

pub mod error;
pub mod item_service;
pub mod list_service;
