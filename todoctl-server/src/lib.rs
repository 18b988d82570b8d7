//! todoctl-server: multi-user todo list REST backend
//!
//! Layers, leaf-first:
//! - `db`: connection pool, schema migrations, ownership-enforcing repositories
//! - `service`: input validation, password hashing, list ownership cross-checks
//! - `auth`: bearer token issue/verify and argon2 password hashes
//! - `http`: axum router, extractors, JSON error mapping

pub mod auth;
pub mod db;
pub mod http;
pub mod models;
pub mod service;

pub use http::{run_server, AppState, ServerConfig};
