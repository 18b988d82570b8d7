//! Bearer tokens: HS256 JWTs whose subject is the user id

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use hmac::{Hmac, Mac};
use jwt::{Claims, Header, RegisteredClaims, SignWithKey, Token, VerifyWithKey};
use sha2::Sha256;

/// Default token lifetime (12 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Default `iss` claim
pub const DEFAULT_ISSUER: &str = "todoctl";

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("signing key must not be empty")]
    EmptyKey,

    #[error("token ttl must be between 1 second and one year, got {ttl}s")]
    InvalidTtl { ttl: u64 },

    #[error("token expiry is out of range")]
    ExpiryOutOfRange,

    #[error("failed to sign token: {0}")]
    Sign(#[source] jwt::Error),

    #[error("invalid token")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("token is not valid yet")]
    NotYetValid,

    #[error("token issuer mismatch")]
    WrongIssuer,
}

/// Claims carried by a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: i32,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies bearer tokens with a shared HMAC key.
#[derive(Clone)]
pub struct TokenIssuer {
    key: Hmac<Sha256>,
    issuer: String,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(
        signing_key: &[u8],
        issuer: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        if signing_key.is_empty() {
            return Err(TokenError::EmptyKey);
        }
        if ttl.as_secs() == 0 || ttl > MAX_TOKEN_TTL {
            return Err(TokenError::InvalidTtl { ttl: ttl.as_secs() });
        }
        let key = Hmac::<Sha256>::new_from_slice(signing_key).map_err(|_| TokenError::EmptyKey)?;
        Ok(Self {
            key,
            issuer: issuer.into(),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user_id` valid from now.
    pub fn issue(&self, user_id: i32) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: i32, now: DateTime<Utc>) -> Result<String, TokenError> {
        let issued_at = u64::try_from(now.timestamp()).map_err(|_| TokenError::ExpiryOutOfRange)?;
        let expiration = issued_at
            .checked_add(self.ttl.as_secs())
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = Claims::new(RegisteredClaims {
            issuer: Some(self.issuer.clone()),
            subject: Some(user_id.to_string()),
            issued_at: Some(issued_at),
            expiration: Some(expiration),
            ..Default::default()
        });

        claims.sign_with_key(&self.key).map_err(TokenError::Sign)
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let token: Token<Header, Claims, _> = token
            .verify_with_key(&self.key)
            .map_err(|_| TokenError::Invalid)?;
        let registered = &token.claims().registered;

        if registered.issuer.as_deref() != Some(self.issuer.as_str()) {
            return Err(TokenError::WrongIssuer);
        }

        let issued_at = registered
            .issued_at
            .and_then(timestamp)
            .ok_or(TokenError::Invalid)?;
        if issued_at > now {
            return Err(TokenError::NotYetValid);
        }

        let expires_at = registered
            .expiration
            .and_then(timestamp)
            .ok_or(TokenError::Invalid)?;
        if expires_at <= now {
            return Err(TokenError::Expired);
        }

        let user_id = registered
            .subject
            .as_deref()
            .and_then(|s| s.parse::<i32>().ok())
            .ok_or(TokenError::Invalid)?;

        Ok(TokenClaims {
            user_id,
            issued_at,
            expires_at,
        })
    }
}

fn timestamp(secs: u64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs as i64, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"test-signing-key", DEFAULT_ISSUER, DEFAULT_TOKEN_TTL).unwrap()
    }

    #[test]
    fn issue_then_verify() {
        let issuer = issuer();
        let token = issuer.issue(42).unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(
            (claims.expires_at - claims.issued_at).num_seconds(),
            DEFAULT_TOKEN_TTL.as_secs() as i64
        );
    }

    #[test]
    fn rejects_expired() {
        let issuer = issuer();
        let issued = Utc::now() - chrono::Duration::hours(13);
        let token = issuer.issue_at(1, issued).unwrap();
        assert!(matches!(issuer.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn rejects_future_issued() {
        let issuer = issuer();
        let issued = Utc::now() + chrono::Duration::hours(1);
        let token = issuer.issue_at(1, issued).unwrap();
        assert!(matches!(issuer.verify(&token), Err(TokenError::NotYetValid)));
    }

    #[test]
    fn rejects_other_key() {
        let token = issuer().issue(1).unwrap();
        let other = TokenIssuer::new(b"another-key", DEFAULT_ISSUER, DEFAULT_TOKEN_TTL).unwrap();
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn rejects_other_issuer() {
        let token = issuer().issue(1).unwrap();
        let other =
            TokenIssuer::new(b"test-signing-key", "someone-else", DEFAULT_TOKEN_TTL).unwrap();
        assert!(matches!(other.verify(&token), Err(TokenError::WrongIssuer)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(issuer().verify("not.a.token"), Err(TokenError::Invalid)));
        assert!(matches!(issuer().verify(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn ttl_bounds() {
        assert!(TokenIssuer::new(b"k", DEFAULT_ISSUER, MAX_TOKEN_TTL).is_ok());
        assert!(matches!(
            TokenIssuer::new(b"k", DEFAULT_ISSUER, Duration::ZERO),
            Err(TokenError::InvalidTtl { ttl: 0 })
        ));
        let huge = Duration::from_secs(5_124_095_576_030_431 * 3600);
        assert!(matches!(
            TokenIssuer::new(b"k", DEFAULT_ISSUER, huge),
            Err(TokenError::InvalidTtl { .. })
        ));
    }

    #[test]
    fn pre_epoch_issue_time_is_an_error() {
        let before_epoch = Utc.timestamp_opt(-10, 0).single().unwrap();
        assert!(matches!(
            issuer().issue_at(1, before_epoch),
            Err(TokenError::ExpiryOutOfRange)
        ));
    }

    #[test]
    fn empty_key_rejected() {
        assert!(matches!(
            TokenIssuer::new(b"", DEFAULT_ISSUER, DEFAULT_TOKEN_TTL),
            Err(TokenError::EmptyKey)
        ));
    }
}
