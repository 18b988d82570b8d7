//! Todo item endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use super::common::{IdResponse, StatusResponse};
use crate::http::error::ApiError;
use crate::http::extractors::{AuthUser, JsonBody, ResourceId};
use crate::http::server::AppState;
use crate::models::{CreateItemInput, TodoItem, UpdateItemInput};
use crate::service::ItemService;

/// POST /api/lists/{id}/items - create an item in one of the caller's lists
async fn create_item(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ResourceId(list_id): ResourceId,
    JsonBody(input): JsonBody<CreateItemInput>,
) -> Result<Json<IdResponse>, ApiError> {
    let id = ItemService::new(&state.pool)
        .create(user_id, list_id, input)
        .await?;
    Ok(Json(IdResponse { id }))
}

/// GET /api/lists/{id}/items
async fn get_all_items(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ResourceId(list_id): ResourceId,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let items = ItemService::new(&state.pool)
        .list_all(user_id, list_id)
        .await?;
    Ok(Json(items))
}

/// GET /api/items/{id}
async fn get_item(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ResourceId(item_id): ResourceId,
) -> Result<Json<TodoItem>, ApiError> {
    let item = ItemService::new(&state.pool).get(user_id, item_id).await?;
    Ok(Json(item))
}

/// PUT /api/items/{id} - partial update
async fn update_item(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ResourceId(item_id): ResourceId,
    JsonBody(input): JsonBody<UpdateItemInput>,
) -> Result<Json<StatusResponse>, ApiError> {
    ItemService::new(&state.pool)
        .update(user_id, item_id, input)
        .await?;
    Ok(Json(StatusResponse::ok()))
}

/// DELETE /api/items/{id}
async fn delete_item(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ResourceId(item_id): ResourceId,
) -> Result<Json<StatusResponse>, ApiError> {
    ItemService::new(&state.pool).delete(user_id, item_id).await?;
    Ok(Json(StatusResponse::ok()))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/lists/{id}/items",
            get(get_all_items).post(create_item),
        )
        .route(
            "/api/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}
