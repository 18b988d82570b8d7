//! End-to-end flows against a real PostgreSQL database.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p todoctl-server -- --ignored

use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use todoctl_server::auth::{TokenIssuer, DEFAULT_ISSUER, DEFAULT_TOKEN_TTL};
use todoctl_server::db::{create_pool, migrations};
use todoctl_server::http::build_router;
use todoctl_server::{AppState, ServerConfig};

async fn app() -> Router {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");

    let tokens = TokenIssuer::new(b"api-flow-key", DEFAULT_ISSUER, DEFAULT_TOKEN_TTL).unwrap();
    build_router(AppState { pool, tokens }, &ServerConfig::default())
}

fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}_{}", prefix, nanos % 1_000_000_000_000)
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Register a fresh user and return a bearer token.
async fn signed_in(app: &Router) -> String {
    let username = unique("user");
    let (status, _) = call(
        app,
        Method::POST,
        "/auth/sign-up",
        None,
        Some(json!({"name": "Test User", "username": username, "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        app,
        Method::POST,
        "/auth/sign-in",
        None,
        Some(json!({"username": username, "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_username_conflicts() {
    let app = app().await;
    let username = unique("dup");
    let body = json!({"name": "A", "username": username, "password": "password123"});

    let (status, _) = call(&app, Method::POST, "/auth/sign-up", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, Method::POST, "/auth/sign-up", None, Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn wrong_password_is_401() {
    let app = app().await;
    let username = unique("pw");
    call(
        &app,
        Method::POST,
        "/auth/sign-up",
        None,
        Some(json!({"name": "A", "username": username, "password": "password123"})),
    )
    .await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/auth/sign-in",
        None,
        Some(json!({"username": username, "password": "password124"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_and_item_lifecycle() {
    let app = app().await;
    let token = signed_in(&app).await;
    let token = Some(token.as_str());

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/lists",
        token,
        Some(json!({"title": "Groceries", "description": "weekly"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list_id = body["id"].as_i64().unwrap();

    let (status, body) = call(&app, Method::GET, "/api/lists", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/api/lists/{}/items", list_id),
        token,
        Some(json!({"title": "milk"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let item_id = body["id"].as_i64().unwrap();

    // Partial update touches only `done`
    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/items/{}", item_id),
        token,
        Some(json!({"done": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, Method::GET, &format!("/api/items/{}", item_id), token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "milk");
    assert_eq!(body["done"], true);

    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/lists/{}", list_id),
        token,
        Some(json!({"title": "Shopping"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, Method::GET, &format!("/api/lists/{}", list_id), token, None).await;
    assert_eq!(body["todoList"]["title"], "Shopping");
    assert_eq!(body["todoList"]["description"], "weekly");

    // Deleting the list removes its items too
    let (status, _) = call(&app, Method::DELETE, &format!("/api/lists/{}", list_id), token, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, Method::GET, &format!("/api/items/{}", item_id), token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn other_users_rows_are_invisible() {
    let app = app().await;
    let owner = signed_in(&app).await;
    let intruder = signed_in(&app).await;

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/lists",
        Some(owner.as_str()),
        Some(json!({"title": "Private"})),
    )
    .await;
    let list_id = body["id"].as_i64().unwrap();

    let (_, body) = call(
        &app,
        Method::POST,
        &format!("/api/lists/{}/items", list_id),
        Some(owner.as_str()),
        Some(json!({"title": "secret"})),
    )
    .await;
    let item_id = body["id"].as_i64().unwrap();

    let list_uri = format!("/api/lists/{}", list_id);
    let item_uri = format!("/api/items/{}", item_id);
    let items_uri = format!("/api/lists/{}/items", list_id);

    let (status, _) = call(&app, Method::GET, &list_uri, Some(intruder.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::GET, &items_uri, Some(intruder.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Cannot add items to someone else's list
    let (status, _) = call(
        &app,
        Method::POST,
        &items_uri,
        Some(intruder.as_str()),
        Some(json!({"title": "sneaky"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        Method::PUT,
        &item_uri,
        Some(intruder.as_str()),
        Some(json!({"done": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::DELETE, &item_uri, Some(intruder.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        Method::PUT,
        &list_uri,
        Some(intruder.as_str()),
        Some(json!({"title": "Hijacked"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::DELETE, &list_uri, Some(intruder.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Owner still sees everything untouched
    let (status, body) = call(&app, Method::GET, &item_uri, Some(owner.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["done"], false);

    let (status, body) = call(&app, Method::GET, &list_uri, Some(owner.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["todoList"]["title"], "Private");

    let (_, body) = call(&app, Method::GET, "/api/lists", Some(intruder.as_str()), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
