//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::server::AppState;
use crate::service::AuthService;

/// Authenticated caller, resolved from `Authorization: Bearer <token>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i32);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::unauthorized("empty auth header"))?;

        let value = header
            .to_str()
            .map_err(|_| ApiError::unauthorized("invalid auth header"))?;
        let token = bearer_token(value)?;

        let user_id = AuthService::new(&state.pool, &state.tokens)
            .parse_token(token)
            .map_err(|e| {
                tracing::debug!("rejected bearer token: {}", e);
                ApiError::from(e)
            })?;

        Ok(Self(user_id))
    }
}

/// Split `Bearer <token>` into the token part.
fn bearer_token(value: &str) -> Result<&str, ApiError> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(""), None) => Err(ApiError::unauthorized("token is empty")),
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(ApiError::unauthorized("invalid auth header")),
    }
}

/// Extract a numeric resource id from the `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i32);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request("invalid id param"))?;

        let id = id
            .parse::<i32>()
            .map_err(|_| ApiError::bad_request("invalid id param"))?;

        Ok(Self(id))
    }
}

/// JSON body whose rejections use the API error format
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}
