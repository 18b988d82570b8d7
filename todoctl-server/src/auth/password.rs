//! argon2 password hashing

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use once_cell::sync::Lazy;

/// Verified against when the username is unknown, so sign-in costs one
/// argon2 verification either way.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("todoctl-unknown-user").ok());

#[derive(Debug, thiserror::Error)]
#[error("failed to hash password: {0}")]
pub struct HashError(String);

/// Hash a password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC string.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let hash = match PasswordHash::new(password_hash) {
        Ok(hash) => hash,
        Err(err) => {
            tracing::error!("failed to parse password hash: {}", err);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &hash)
        .is_ok()
}

/// Hash on the blocking pool.
pub async fn spawn_hash_password(password: String) -> Result<String, HashError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| HashError(e.to_string()))?
}

/// Verify on the blocking pool. With no stored hash the password is checked
/// against a dummy hash and the result is always `false`.
pub async fn spawn_check_password(
    password: String,
    stored: Option<String>,
) -> Result<bool, HashError> {
    tokio::task::spawn_blocking(move || match stored {
        Some(hash) => verify_password(&password, &hash),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                verify_password(&password, dummy);
            }
            false
        }
    })
    .await
    .map_err(|e| HashError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn salts_differ() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn dummy_hash_is_a_real_argon2_hash() {
        let dummy = DUMMY_HASH.as_deref().unwrap();
        assert!(PasswordHash::new(dummy).is_ok());
    }

    #[tokio::test]
    async fn unknown_user_never_verifies() {
        let ok = spawn_check_password("todoctl-unknown-user".into(), None)
            .await
            .unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn background_hash_then_check() {
        let hash = spawn_hash_password("s3cret-pass".into()).await.unwrap();
        assert!(spawn_check_password("s3cret-pass".into(), Some(hash.clone()))
            .await
            .unwrap());
        assert!(!spawn_check_password("other-pass".into(), Some(hash))
            .await
            .unwrap());
    }
}
