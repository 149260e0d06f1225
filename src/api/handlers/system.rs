//! System health and status handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::{instrument, warn};
use utoipa::ToSchema;

use crate::api::state::AppState;
use crate::db::TaskStore;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Process status; always `healthy` while the server answers
    #[schema(example = "healthy")]
    pub status: String,
    /// Store connectivity, `connected` or `disconnected`
    #[schema(example = "connected")]
    pub mongodb: String,
}

/// Welcome response
#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    #[schema(example = "Welcome to Todo MCP Server")]
    pub message: String,
}

/// Welcome endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service banner", body = WelcomeResponse)
    )
)]
#[instrument]
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Todo MCP Server".to_string(),
    })
}

/// Health check endpoint
///
/// Pings the store. An unreachable store is reported in the body, never as
/// an HTTP failure.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check result", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health<S: TaskStore>(State(state): State<AppState<S>>) -> Json<HealthResponse> {
    let connected = state.store().ping().await;
    if !connected {
        warn!("Health check: store unreachable");
    }

    Json(HealthResponse {
        status: "healthy".to_string(),
        mongodb: if connected { "connected" } else { "disconnected" }.to_string(),
    })
}
