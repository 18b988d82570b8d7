//! Sign-up and sign-in endpoints

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use super::common::IdResponse;
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{SignInInput, SignUpInput};
use crate::service::AuthService;

/// Sign-in response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /auth/sign-up - register a user
async fn sign_up(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<SignUpInput>,
) -> Result<Json<IdResponse>, ApiError> {
    let id = AuthService::new(&state.pool, &state.tokens)
        .create_user(input)
        .await?;

    Ok(Json(IdResponse { id }))
}

/// POST /auth/sign-in - exchange credentials for a bearer token
async fn sign_in(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<SignInInput>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = AuthService::new(&state.pool, &state.tokens)
        .generate_token(input)
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// Auth routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
}
