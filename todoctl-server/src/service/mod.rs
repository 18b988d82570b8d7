//! Service layer between HTTP handlers and repositories
//!
//! Mostly pass-through. The service is where inputs are validated, passwords
//! are hashed and verified, and item creation checks list ownership.

pub mod auth;
pub mod items;
pub mod lists;

pub use auth::AuthService;
pub use items::ItemService;
pub use lists::ListService;

use crate::auth::{HashError, TokenError};
use crate::db::DbError;
use crate::models::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Hash(#[from] HashError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
