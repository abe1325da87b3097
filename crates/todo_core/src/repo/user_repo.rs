//! User repository used to seed ownership references.

use crate::model::user::{NewUser, User, UserId};
use crate::repo::error::{Entity, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

pub trait UserRepository {
    /// Inserts a user; a taken username surfaces as a storage error.
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId>;
    fn get_user(&self, user_id: UserId) -> RepoResult<User>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId> {
        self.conn.execute(
            "INSERT INTO users (name, username, password_hash) VALUES (?1, ?2, ?3);",
            params![
                user.name.as_str(),
                user.username.as_str(),
                user.password_hash.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_user(&self, user_id: UserId) -> RepoResult<User> {
        self.conn
            .query_row(
                "SELECT id, name, username, password_hash FROM users WHERE id = ?1;",
                [user_id],
                |row| {
                    Ok(User {
                        id: row.get("id")?,
                        name: row.get("name")?,
                        username: row.get("username")?,
                        password_hash: row.get("password_hash")?,
                    })
                },
            )
            .optional()?
            .ok_or(RepoError::NotFound(Entity::User, user_id))
    }
}
