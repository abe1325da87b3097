//! To-do item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `todo_items`, scoped through the parent list's owners.
//!
//! # Invariants
//! - An item is visible to a user only if its list has an ownership row for
//!   that user.
//! - Items of foreign lists behave exactly like missing items.

use crate::model::todo_item::{ItemId, TodoItem, UpdateItemInput};
use crate::model::todo_list::ListId;
use crate::model::user::UserId;
use crate::repo::error::{Entity, RepoError, RepoResult};
use crate::repo::list_repo::list_owned_by;
use crate::repo::transaction::with_immediate_tx;
use crate::repo::update::{ItemColumn, PartialUpdate};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

const ITEM_SELECT_SQL: &str = "SELECT
    ti.id,
    ti.list_id,
    ti.title,
    ti.description,
    ti.done
FROM todo_items ti
INNER JOIN users_lists ul ON ul.list_id = ti.list_id";

const OWNED_ITEM_SCOPE: &str =
    "id = ? AND list_id IN (SELECT list_id FROM users_lists WHERE user_id = ?)";

/// Repository interface for items reached through owned lists.
pub trait TodoItemRepository {
    /// Inserts an item into an owned list; returns the new id.
    fn create(&self, user_id: UserId, list_id: ListId, item: &TodoItem) -> RepoResult<ItemId>;
    /// Items of an owned list, oldest first. `NotFound` for foreign lists.
    fn get_all(&self, user_id: UserId, list_id: ListId) -> RepoResult<Vec<TodoItem>>;
    fn get_by_id(&self, user_id: UserId, item_id: ItemId) -> RepoResult<TodoItem>;
    /// Returns affected rows (0 when missing or not owned).
    fn delete(&self, user_id: UserId, item_id: ItemId) -> RepoResult<usize>;
    fn update(
        &self,
        user_id: UserId,
        item_id: ItemId,
        input: &UpdateItemInput,
    ) -> RepoResult<()>;
}

/// SQLite-backed item repository.
pub struct SqliteTodoItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoItemRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoItemRepository for SqliteTodoItemRepository<'_> {
    fn create(&self, user_id: UserId, list_id: ListId, item: &TodoItem) -> RepoResult<ItemId> {
        item.validate()?;

        with_immediate_tx(self.conn, |tx| {
            if !list_owned_by(tx, user_id, list_id)? {
                return Err(RepoError::NotFound(Entity::List, list_id));
            }

            tx.execute(
                "INSERT INTO todo_items (list_id, title, description, done)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    list_id,
                    item.title.as_str(),
                    item.description.as_str(),
                    item.done,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn get_all(&self, user_id: UserId, list_id: ListId) -> RepoResult<Vec<TodoItem>> {
        if !list_owned_by(self.conn, user_id, list_id)? {
            return Err(RepoError::NotFound(Entity::List, list_id));
        }

        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE ul.user_id = ?1
               AND ti.list_id = ?2
             ORDER BY ti.id ASC;"
        ))?;

        let mut rows = stmt.query([user_id, list_id])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn get_by_id(&self, user_id: UserId, item_id: ItemId) -> RepoResult<TodoItem> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE ul.user_id = ?1
               AND ti.id = ?2;"
        ))?;

        let mut rows = stmt.query([user_id, item_id])?;
        match rows.next()? {
            Some(row) => parse_item_row(row),
            None => Err(RepoError::NotFound(Entity::Item, item_id)),
        }
    }

    fn delete(&self, user_id: UserId, item_id: ItemId) -> RepoResult<usize> {
        let changed = self.conn.execute(
            &format!("DELETE FROM todo_items WHERE {OWNED_ITEM_SCOPE};"),
            params![item_id, user_id],
        )?;
        Ok(changed)
    }

    fn update(
        &self,
        user_id: UserId,
        item_id: ItemId,
        input: &UpdateItemInput,
    ) -> RepoResult<()> {
        let statement = PartialUpdate::new()
            .set_if_some(ItemColumn::Title, input.title.clone())
            .set_if_some(ItemColumn::Description, input.description.clone())
            .set_if_some(ItemColumn::Done, input.done)
            .build(
                "todo_items",
                OWNED_ITEM_SCOPE,
                [Value::Integer(item_id), Value::Integer(user_id)],
            )?;

        if statement.execute(self.conn)? == 0 {
            return Err(RepoError::NotFound(Entity::Item, item_id));
        }

        Ok(())
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<TodoItem> {
    let id: ItemId = row.get("id")?;
    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in todo_items row {id}"
            )));
        }
    };

    Ok(TodoItem {
        id,
        list_id: row.get("list_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        done,
    })
}
