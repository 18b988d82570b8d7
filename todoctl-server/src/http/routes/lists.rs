//! Todo list endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::common::{IdResponse, StatusResponse};
use crate::http::error::ApiError;
use crate::http::extractors::{AuthUser, JsonBody, ResourceId};
use crate::http::server::AppState;
use crate::models::{CreateListInput, TodoList, UpdateListInput};
use crate::service::ListService;

/// GET /api/lists response
#[derive(Debug, Serialize)]
pub struct ListsResponse {
    pub data: Vec<TodoList>,
}

/// GET /api/lists/{id} response
#[derive(Debug, Serialize)]
pub struct ListResponse {
    #[serde(rename = "todoList")]
    pub todo_list: TodoList,
}

/// POST /api/lists - create a list owned by the caller
async fn create_list(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    JsonBody(input): JsonBody<CreateListInput>,
) -> Result<Json<IdResponse>, ApiError> {
    let id = ListService::new(&state.pool).create(user_id, input).await?;
    Ok(Json(IdResponse { id }))
}

/// GET /api/lists - all lists owned by the caller
async fn get_all_lists(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ListsResponse>, ApiError> {
    let data = ListService::new(&state.pool).list_all(user_id).await?;
    Ok(Json(ListsResponse { data }))
}

/// GET /api/lists/{id}
async fn get_list(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ResourceId(list_id): ResourceId,
) -> Result<Json<ListResponse>, ApiError> {
    let todo_list = ListService::new(&state.pool).get(user_id, list_id).await?;
    Ok(Json(ListResponse { todo_list }))
}

/// PUT /api/lists/{id} - partial update
async fn update_list(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ResourceId(list_id): ResourceId,
    JsonBody(input): JsonBody<UpdateListInput>,
) -> Result<Json<StatusResponse>, ApiError> {
    ListService::new(&state.pool)
        .update(user_id, list_id, input)
        .await?;
    Ok(Json(StatusResponse::ok()))
}

/// DELETE /api/lists/{id} - removes the list and its items
async fn delete_list(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ResourceId(list_id): ResourceId,
) -> Result<Json<StatusResponse>, ApiError> {
    ListService::new(&state.pool).delete(user_id, list_id).await?;
    Ok(Json(StatusResponse::ok()))
}

/// List routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/lists", get(get_all_lists).post(create_list))
        .route(
            "/api/lists/{id}",
            get(get_list).put(update_list).delete(delete_list),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_list_is_wrapped_in_todo_list() {
        let body = ListResponse {
            todo_list: TodoList {
                id: 7,
                title: "Groceries".into(),
                description: String::new(),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["todoList"]["id"], 7);
        assert_eq!(json["todoList"]["title"], "Groceries");
        assert!(json.get("id").is_none());
    }
}
