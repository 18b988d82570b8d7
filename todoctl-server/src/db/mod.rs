//! Database layer - connection pool, schema, and repositories
//!
//! # Design Principles
//!
//! - Ownership is enforced in SQL: every read/write of a list or item joins
//!   through `users_lists` (and `lists_items` for items) on the caller's id
//! - Multi-row inserts/deletes run in a transaction
//! - Rely on DB constraints (unique username), map violations to `DbError`

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
