//! User repository
//!
//! - create: INSERT, unique username violations become `DbError::Conflict`
//! - lookup by username for sign-in (hash verification happens in the service)

use sqlx::PgPool;

use super::{is_unique_violation, DbError};
use crate::models::{User, Username};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user and return its id.
    pub async fn create(
        &self,
        name: &str,
        username: &Username,
        password_hash: &str,
    ) -> Result<i32, DbError> {
        let result: Result<(i32,), sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO users (name, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(username.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await;

        match result {
            Ok((id,)) => Ok(id),
            Err(e) if is_unique_violation(&e) => Err(DbError::Conflict {
                resource: "username",
                key: username.as_str().to_owned(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch a user by username.
    pub async fn find_by_username(&self, username: &str) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("user", username))
    }
}
