//! Sign-up, sign-in and token parsing

use sqlx::PgPool;

use super::{ServiceError, ServiceResult};
use crate::auth::{spawn_check_password, spawn_hash_password, TokenIssuer};
use crate::db::{DbError, UserRepo};
use crate::models::{SignInInput, SignUpInput};

pub struct AuthService<'a> {
    pool: &'a PgPool,
    tokens: &'a TokenIssuer,
}

impl<'a> AuthService<'a> {
    pub fn new(pool: &'a PgPool, tokens: &'a TokenIssuer) -> Self {
        Self { pool, tokens }
    }

    /// Register a user and return the new id.
    pub async fn create_user(&self, input: SignUpInput) -> ServiceResult<i32> {
        let user = input.validate()?;
        let password_hash = spawn_hash_password(user.password).await?;

        let id = UserRepo::new(self.pool)
            .create(&user.name, &user.username, &password_hash)
            .await?;

        tracing::info!(user_id = id, username = user.username.as_str(), "user registered");
        Ok(id)
    }

    /// Check credentials and issue a bearer token.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn generate_token(&self, input: SignInInput) -> ServiceResult<String> {
        let user = match UserRepo::new(self.pool)
            .find_by_username(&input.username)
            .await
        {
            Ok(user) => Some(user),
            Err(DbError::NotFound { .. }) => None,
            Err(e) => return Err(e.into()),
        };

        let (user_id, stored) = match user {
            Some(user) => (Some(user.id), Some(user.password_hash)),
            None => (None, None),
        };

        match (user_id, spawn_check_password(input.password, stored).await?) {
            (Some(user_id), true) => Ok(self.tokens.issue(user_id)?),
            _ => {
                tracing::debug!(username = %input.username, "sign-in rejected");
                Err(ServiceError::InvalidCredentials)
            }
        }
    }

    /// Resolve a bearer token to a user id.
    pub fn parse_token(&self, token: &str) -> ServiceResult<i32> {
        Ok(self.tokens.verify(token)?.user_id)
    }
}
