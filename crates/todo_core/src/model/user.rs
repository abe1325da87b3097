//! User records referenced by list ownership rows.
//!
//! Credential handling lives outside core: `password_hash` is stored as the
//! opaque string the caller hands in.

use serde::{Deserialize, Serialize};

/// Stable integer identifier of a user row.
pub type UserId = i64;

/// Persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Insert payload for a new user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}
