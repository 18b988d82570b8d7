//! Route handlers organized by resource

pub mod auth;
pub mod common;
pub mod health;
pub mod items;
pub mod lists;
