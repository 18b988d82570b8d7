//! Authentication primitives

pub mod password;
pub mod token;

pub use password::{
    hash_password, spawn_check_password, spawn_hash_password, verify_password, HashError,
};
pub use token::{
    TokenClaims, TokenError, TokenIssuer, DEFAULT_ISSUER, DEFAULT_TOKEN_TTL,
    MAX_TOKEN_TTL,
};
