//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Ownership joins live here and nowhere else
//! - Partial updates are assembled with `sqlx::QueryBuilder`, binding only
//!   the fields the caller supplied
//! - Transactions for inserts/deletes that touch a junction table

pub mod items;
pub mod lists;
pub mod users;

pub use items::ItemRepo;
pub use lists::ListRepo;
pub use users::UserRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} '{key}' already exists")]
    Conflict { resource: &'static str, key: String },

    #[error("update structure has no values")]
    NothingToUpdate,
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// True when the error is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
