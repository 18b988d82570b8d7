//! Todo item repository
//!
//! Items are reached through `lists_items` → `users_lists`; both joins gate
//! every read and write on the caller's user id.

use sqlx::{PgPool, Postgres, QueryBuilder};

use super::DbError;
use crate::models::{ItemPatch, NewItem, TodoItem};

/// Todo item repository
pub struct ItemRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an item inside `list_id`, which `user_id` must own.
    ///
    /// The ownership edge is locked `FOR SHARE` for the whole transaction, so
    /// a concurrent list delete waits and the insert never races it.
    pub async fn create(
        &self,
        user_id: i32,
        list_id: i32,
        item: &NewItem,
    ) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            SELECT list_id FROM users_lists
            WHERE user_id = $1 AND list_id = $2
            FOR SHARE
            "#,
        )
        .bind(user_id)
        .bind(list_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("todo list", list_id))?;

        let (item_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO todo_items (title, description)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(item.title.as_str())
        .bind(&item.description)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO lists_items (list_id, item_id) VALUES ($1, $2)")
            .bind(list_id)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(item_id)
    }

    /// Items in `list_id`, provided `user_id` owns the list.
    pub async fn list_all(&self, user_id: i32, list_id: i32) -> Result<Vec<TodoItem>, DbError> {
        let items = sqlx::query_as::<_, TodoItem>(
            r#"
            SELECT ti.id, ti.title, ti.description, ti.done
            FROM todo_items ti
            JOIN lists_items li ON ti.id = li.item_id
            JOIN users_lists ul ON li.list_id = ul.list_id
            WHERE ul.user_id = $1 AND ul.list_id = $2
            ORDER BY ti.id
            "#,
        )
        .bind(user_id)
        .bind(list_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// A single item, if it sits in a list `user_id` owns.
    pub async fn get(&self, user_id: i32, item_id: i32) -> Result<TodoItem, DbError> {
        sqlx::query_as::<_, TodoItem>(
            r#"
            SELECT ti.id, ti.title, ti.description, ti.done
            FROM todo_items ti
            JOIN lists_items li ON ti.id = li.item_id
            JOIN users_lists ul ON li.list_id = ul.list_id
            WHERE ul.user_id = $1 AND ti.id = $2
            "#,
        )
        .bind(user_id)
        .bind(item_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("todo item", item_id))
    }

    pub async fn delete(&self, user_id: i32, item_id: i32) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todo_items ti
            USING lists_items li, users_lists ul
            WHERE ti.id = li.item_id
              AND li.list_id = ul.list_id
              AND ul.user_id = $1
              AND ti.id = $2
            "#,
        )
        .bind(user_id)
        .bind(item_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("todo item", item_id));
        }
        Ok(())
    }

    /// Apply a partial update to an item reachable from `user_id`.
    pub async fn update(
        &self,
        user_id: i32,
        item_id: i32,
        patch: &ItemPatch,
    ) -> Result<(), DbError> {
        let mut query =
            update_query(user_id, item_id, patch).ok_or(DbError::NothingToUpdate)?;
        tracing::debug!(sql = query.sql(), "update todo item");

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("todo item", item_id));
        }
        Ok(())
    }
}

/// Build `UPDATE todo_items ... SET <given fields>` gated by the
/// item → list → user ownership chain.
///
/// Returns `None` when the patch carries no fields.
pub(crate) fn update_query<'a>(
    user_id: i32,
    item_id: i32,
    patch: &'a ItemPatch,
) -> Option<QueryBuilder<'a, Postgres>> {
    if patch.title.is_none() && patch.description.is_none() && patch.done.is_none() {
        return None;
    }

    let mut query = QueryBuilder::new("UPDATE todo_items ti SET ");
    {
        let mut set = query.separated(", ");
        if let Some(title) = &patch.title {
            set.push("title = ").push_bind_unseparated(title.as_str());
        }
        if let Some(description) = &patch.description {
            set.push("description = ")
                .push_bind_unseparated(description.as_str());
        }
        if let Some(done) = patch.done {
            set.push("done = ").push_bind_unseparated(done);
        }
    }

    query
        .push(
            " FROM lists_items li, users_lists ul \
             WHERE ti.id = li.item_id AND li.list_id = ul.list_id AND ul.user_id = ",
        )
        .push_bind(user_id)
        .push(" AND ti.id = ")
        .push_bind(item_id);

    Some(query)
}
