//! To-do list repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide ownership-scoped CRUD over `todo_lists`.
//! - Keep list + ownership writes atomic.
//!
//! # Invariants
//! - Every read/write filters through `users_lists` for the calling user.
//! - Not-owned rows behave exactly like missing rows.
//! - A list row never exists without at least one ownership row after create.

use crate::model::todo_list::{ListId, TodoList, UpdateListInput};
use crate::model::user::UserId;
use crate::repo::error::{Entity, RepoError, RepoResult};
use crate::repo::transaction::with_immediate_tx;
use crate::repo::update::{ListColumn, PartialUpdate};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};

const LIST_SELECT_SQL: &str = "SELECT
    tl.id,
    tl.title,
    tl.description
FROM todo_lists tl
INNER JOIN users_lists ul ON ul.list_id = tl.id";

const OWNED_LIST_SCOPE: &str =
    "id = ? AND id IN (SELECT list_id FROM users_lists WHERE user_id = ?)";

/// Repository interface for ownership-scoped list operations.
pub trait TodoListRepository {
    /// Inserts the list and its ownership row atomically; returns the new id.
    fn create(&self, user_id: UserId, list: &TodoList) -> RepoResult<ListId>;
    /// Lists owned by `user_id`, oldest first. Empty when none.
    fn get_all(&self, user_id: UserId) -> RepoResult<Vec<TodoList>>;
    /// One owned list, or `NotFound`.
    fn get_by_id(&self, user_id: UserId, list_id: ListId) -> RepoResult<TodoList>;
    /// Deletes an owned list and returns affected rows (0 when not owned).
    fn delete(&self, user_id: UserId, list_id: ListId) -> RepoResult<usize>;
    /// Applies present fields of `input` to an owned list.
    fn update(
        &self,
        user_id: UserId,
        list_id: ListId,
        input: &UpdateListInput,
    ) -> RepoResult<()>;
    /// Grants `new_owner_id` access to a list owned by `user_id`.
    fn add_owner(
        &self,
        user_id: UserId,
        list_id: ListId,
        new_owner_id: UserId,
    ) -> RepoResult<()>;
}

/// SQLite-backed list repository.
pub struct SqliteTodoListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoListRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoListRepository for SqliteTodoListRepository<'_> {
    fn create(&self, user_id: UserId, list: &TodoList) -> RepoResult<ListId> {
        list.validate()?;

        with_immediate_tx(self.conn, |tx| {
            tx.execute(
                "INSERT INTO todo_lists (title, description) VALUES (?1, ?2);",
                params![list.title.as_str(), list.description.as_str()],
            )?;
            let list_id = tx.last_insert_rowid();

            tx.execute(
                "INSERT INTO users_lists (user_id, list_id) VALUES (?1, ?2);",
                params![user_id, list_id],
            )?;

            Ok(list_id)
        })
    }

    fn get_all(&self, user_id: UserId) -> RepoResult<Vec<TodoList>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LIST_SELECT_SQL}
             WHERE ul.user_id = ?1
             ORDER BY tl.id ASC;"
        ))?;

        let mut rows = stmt.query([user_id])?;
        let mut lists = Vec::new();
        while let Some(row) = rows.next()? {
            lists.push(parse_list_row(row)?);
        }

        Ok(lists)
    }

    fn get_by_id(&self, user_id: UserId, list_id: ListId) -> RepoResult<TodoList> {
        let mut stmt = self.conn.prepare(&format!(
            "{LIST_SELECT_SQL}
             WHERE ul.user_id = ?1
               AND tl.id = ?2;"
        ))?;

        let mut rows = stmt.query([user_id, list_id])?;
        match rows.next()? {
            Some(row) => parse_list_row(row),
            None => Err(RepoError::NotFound(Entity::List, list_id)),
        }
    }

    fn delete(&self, user_id: UserId, list_id: ListId) -> RepoResult<usize> {
        let changed = self.conn.execute(
            &format!("DELETE FROM todo_lists WHERE {OWNED_LIST_SCOPE};"),
            params![list_id, user_id],
        )?;
        Ok(changed)
    }

    fn update(
        &self,
        user_id: UserId,
        list_id: ListId,
        input: &UpdateListInput,
    ) -> RepoResult<()> {
        let statement = PartialUpdate::new()
            .set_if_some(ListColumn::Title, input.title.clone())
            .set_if_some(ListColumn::Description, input.description.clone())
            .build(
                "todo_lists",
                OWNED_LIST_SCOPE,
                [Value::Integer(list_id), Value::Integer(user_id)],
            )?;

        if statement.execute(self.conn)? == 0 {
            return Err(RepoError::NotFound(Entity::List, list_id));
        }

        Ok(())
    }

    fn add_owner(
        &self,
        user_id: UserId,
        list_id: ListId,
        new_owner_id: UserId,
    ) -> RepoResult<()> {
        with_immediate_tx(self.conn, |tx| {
            if !list_owned_by(tx, user_id, list_id)? {
                return Err(RepoError::NotFound(Entity::List, list_id));
            }

            let user_exists = tx
                .query_row("SELECT 1 FROM users WHERE id = ?1;", [new_owner_id], |_| {
                    Ok(())
                })
                .optional()?
                .is_some();
            if !user_exists {
                return Err(RepoError::NotFound(Entity::User, new_owner_id));
            }

            tx.execute(
                "INSERT OR IGNORE INTO users_lists (user_id, list_id) VALUES (?1, ?2);",
                params![new_owner_id, list_id],
            )?;
            Ok(())
        })
    }
}

/// Returns whether `user_id` has an ownership row for `list_id`.
pub(crate) fn list_owned_by(
    conn: &Connection,
    user_id: UserId,
    list_id: ListId,
) -> RepoResult<bool> {
    let owned: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM users_lists
            WHERE user_id = ?1 AND list_id = ?2
        );",
        [user_id, list_id],
        |row| row.get(0),
    )?;
    Ok(owned == 1)
}

fn parse_list_row(row: &Row<'_>) -> RepoResult<TodoList> {
    let list = TodoList {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
    };
    list.validate().map_err(|err| {
        RepoError::InvalidData(format!("todo_lists row {}: {err}", list.id))
    })?;
    Ok(list)
}
