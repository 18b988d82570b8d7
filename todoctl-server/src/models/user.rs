//! User model and sign-up/sign-in inputs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use sqlx::FromRow;

use super::ValidationError;

const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 32;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;
const MAX_NAME_LEN: usize = 255;

/// Username charset: ASCII letters, digits, dot, dash, underscore
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("invalid username regex"));

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    /// argon2 PHC string
    pub password_hash: String,
}

/// Validated username
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// # Example
    /// ```
    /// use todoctl_server::models::Username;
    ///
    /// assert!(Username::new("alice_01").is_ok());
    /// assert!(Username::new("al").is_err());        // too short
    /// assert!(Username::new("alice smith").is_err()); // space
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "username" });
        }
        if s.len() < MIN_USERNAME_LEN {
            return Err(ValidationError::TooShort {
                field: "username",
                min: MIN_USERNAME_LEN,
            });
        }
        if s.len() > MAX_USERNAME_LEN {
            return Err(ValidationError::TooLong {
                field: "username",
                max: MAX_USERNAME_LEN,
            });
        }
        if !USERNAME_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "username",
                reason: "must contain only letters, digits, '.', '-' or '_'",
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// POST /auth/sign-up body
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpInput {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// Sign-up input after validation
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: Username,
    pub password: String,
}

impl SignUpInput {
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }

        let username = Username::new(&self.username)?;

        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(ValidationError::TooShort {
                field: "password",
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.password.len() > MAX_PASSWORD_LEN {
            return Err(ValidationError::TooLong {
                field: "password",
                max: MAX_PASSWORD_LEN,
            });
        }

        Ok(NewUser {
            name: name.to_owned(),
            username,
            password: self.password,
        })
    }
}

/// POST /auth/sign-in body
#[derive(Debug, Clone, Deserialize)]
pub struct SignInInput {
    pub username: String,
    pub password: String,
}
