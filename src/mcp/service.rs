//! MCP Streamable HTTP service creation
//!
//! This module provides functions to create the MCP service
//! that can be integrated with an Axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::db::TaskStore;

use super::dispatcher::Dispatcher;
use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// This function creates a StreamableHttpService that can be nested into an Axum router.
///
/// # Arguments
/// * `dispatcher` - Shared tool dispatcher
/// * `cancellation_token` - Token for graceful shutdown
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use todo_mcp::db::SqliteStore;
/// # use todo_mcp::mcp::{Catalog, Dispatcher, create_mcp_service};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let store = Arc::new(SqliteStore::in_memory("todo_db", "tasks").await?);
///
/// let dispatcher = Arc::new(Dispatcher::new(store, Catalog::standard()?));
/// let mcp_service = create_mcp_service(dispatcher, CancellationToken::new());
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<S: TaskStore + 'static>(
    dispatcher: Arc<Dispatcher<S>>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<S>> {
    // Service factory: creates new McpServer instance per session
    // Note: Returns io::Error to match rmcp's expected signature
    let service_factory = move || -> Result<McpServer<S>, std::io::Error> {
        Ok(McpServer::new(Arc::clone(&dispatcher)))
    };

    let config = StreamableHttpServerConfig {
        stateful_mode: true,
        cancellation_token,
        ..Default::default()
    };

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
