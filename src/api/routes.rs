//! HTTP route configuration.

use axum::Router;
use axum::routing::get;
use rmcp::transport::streamable_http_server::StreamableHttpService;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, HealthResponse, WelcomeResponse};
use super::state::AppState;
use crate::db::TaskStore;
use crate::mcp::McpServer;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo MCP Server",
        description = "Shared todo list exposed as MCP tools",
        license(name = "GPL-2.0")
    ),
    paths(handlers::root, handlers::health),
    components(schemas(HealthResponse, WelcomeResponse)),
    tags(
        (name = "system", description = "System health and status endpoints")
    )
)]
pub struct ApiDoc;

/// Create the HTTP router: system routes, API docs and the MCP endpoint.
pub fn create_router<S: TaskStore + 'static>(
    state: AppState<S>,
    mcp_service: StreamableHttpService<McpServer<S>>,
) -> Router {
    let api = ApiDoc::openapi();

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health::<S>))
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
        .nest_service("/mcp", mcp_service)
}
