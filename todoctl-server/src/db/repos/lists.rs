//! Todo list repository
//!
//! Every query joins `users_lists` on the caller's user id, so a list that
//! belongs to someone else behaves exactly like a missing one.

use sqlx::{PgPool, Postgres, QueryBuilder};

use super::DbError;
use crate::models::{ListPatch, NewList, TodoList};

/// Todo list repository
pub struct ListRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ListRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a list owned by `user_id` (list row + ownership edge, atomic).
    pub async fn create(&self, user_id: i32, list: &NewList) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;

        let (list_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO todo_lists (title, description)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(list.title.as_str())
        .bind(&list.description)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO users_lists (user_id, list_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(list_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(list_id)
    }

    /// All lists owned by `user_id`, oldest first.
    pub async fn list_all(&self, user_id: i32) -> Result<Vec<TodoList>, DbError> {
        let lists = sqlx::query_as::<_, TodoList>(
            r#"
            SELECT tl.id, tl.title, tl.description
            FROM todo_lists tl
            JOIN users_lists ul ON tl.id = ul.list_id
            WHERE ul.user_id = $1
            ORDER BY tl.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lists)
    }

    /// A single list, if `user_id` owns it.
    pub async fn get(&self, user_id: i32, list_id: i32) -> Result<TodoList, DbError> {
        sqlx::query_as::<_, TodoList>(
            r#"
            SELECT tl.id, tl.title, tl.description
            FROM todo_lists tl
            JOIN users_lists ul ON tl.id = ul.list_id
            WHERE ul.user_id = $1 AND ul.list_id = $2
            "#,
        )
        .bind(user_id)
        .bind(list_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("todo list", list_id))
    }

    /// Delete a list together with its items.
    pub async fn delete(&self, user_id: i32, list_id: i32) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let items = sqlx::query(
            r#"
            DELETE FROM todo_items ti
            USING lists_items li, users_lists ul
            WHERE ti.id = li.item_id
              AND li.list_id = ul.list_id
              AND ul.user_id = $1
              AND ul.list_id = $2
            "#,
        )
        .bind(user_id)
        .bind(list_id)
        .execute(&mut *tx)
        .await?;

        let lists = sqlx::query(
            r#"
            DELETE FROM todo_lists tl
            USING users_lists ul
            WHERE tl.id = ul.list_id
              AND ul.user_id = $1
              AND ul.list_id = $2
            "#,
        )
        .bind(user_id)
        .bind(list_id)
        .execute(&mut *tx)
        .await?;

        if lists.rows_affected() == 0 {
            return Err(DbError::not_found("todo list", list_id));
        }

        tx.commit().await?;
        tracing::debug!(
            list_id,
            items_deleted = items.rows_affected(),
            "deleted todo list"
        );
        Ok(())
    }

    /// Apply a partial update to a list owned by `user_id`.
    pub async fn update(
        &self,
        user_id: i32,
        list_id: i32,
        patch: &ListPatch,
    ) -> Result<(), DbError> {
        let mut query =
            update_query(user_id, list_id, patch).ok_or(DbError::NothingToUpdate)?;
        tracing::debug!(sql = query.sql(), "update todo list");

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("todo list", list_id));
        }
        Ok(())
    }
}

/// Build `UPDATE todo_lists ... SET <given fields>` gated by ownership.
///
/// Returns `None` when the patch carries no fields.
pub(crate) fn update_query<'a>(
    user_id: i32,
    list_id: i32,
    patch: &'a ListPatch,
) -> Option<QueryBuilder<'a, Postgres>> {
    if patch.title.is_none() && patch.description.is_none() {
        return None;
    }

    let mut query = QueryBuilder::new("UPDATE todo_lists tl SET ");
    {
        let mut set = query.separated(", ");
        if let Some(title) = &patch.title {
            set.push("title = ").push_bind_unseparated(title.as_str());
        }
        if let Some(description) = &patch.description {
            set.push("description = ")
                .push_bind_unseparated(description.as_str());
        }
    }

    query
        .push(" FROM users_lists ul WHERE tl.id = ul.list_id AND ul.list_id = ")
        .push_bind(list_id)
        .push(" AND ul.user_id = ")
        .push_bind(user_id);

    Some(query)
}
