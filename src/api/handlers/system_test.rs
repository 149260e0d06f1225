//! HTTP tests for the welcome, health and docs routes.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use crate::api::{AppState, create_router};
use crate::db::{SqliteStore, TaskStore};
use crate::mcp::{Catalog, Dispatcher, create_mcp_service};

async fn setup() -> (Router, Arc<SqliteStore>) {
    let store = Arc::new(
        SqliteStore::in_memory("todo_db", "tasks")
            .await
            .expect("Failed to create in-memory store"),
    );
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&store),
        Catalog::standard().unwrap(),
    ));
    let state = AppState::new(Arc::clone(&store));
    let mcp = create_mcp_service(dispatcher, CancellationToken::new());
    (create_router(state, mcp), store)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_root_returns_welcome_message() {
    let (app, _store) = setup().await;

    let (status, body) = get_json(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Welcome to Todo MCP Server" }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_reports_connected_store() {
    let (app, _store) = setup().await;

    let (status, body) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "mongodb": "connected" }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_reports_disconnected_store_with_200() {
    let (app, store) = setup().await;
    store.close().await;

    let (status, body) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "mongodb": "disconnected" }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_docs_are_served() {
    let (app, _store) = setup().await;

    let response = app
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_route_is_not_found() {
    let (app, _store) = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/tasks")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
