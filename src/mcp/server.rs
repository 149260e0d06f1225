//! MCP server implementation
//!
//! This module adapts the [`Dispatcher`] to the MCP `ServerHandler` contract:
//! `tools/list` returns the catalog and `tools/call` returns the dispatcher's
//! reply as a single text content block.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::dispatcher::{Dispatcher, Reply};
use crate::db::TaskStore;

/// MCP server handler.
///
/// Generic over `S: TaskStore` for zero-cost abstraction (no dynamic dispatch).
/// Cloning is cheap: every clone shares one dispatcher.
pub struct McpServer<S: TaskStore> {
    dispatcher: Arc<Dispatcher<S>>,
}

// Manual Clone impl - only the Arc needs to be cloneable, not S
impl<S: TaskStore> Clone for McpServer<S> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<S: TaskStore> McpServer<S> {
    pub fn new(dispatcher: Arc<Dispatcher<S>>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }
}

impl From<Reply> for CallToolResult {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::Success(text) => CallToolResult::success(vec![Content::text(text)]),
            Reply::Failure(text) => CallToolResult::error(vec![Content::text(text)]),
        }
    }
}

impl<S: TaskStore + 'static> ServerHandler for McpServer<S> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "todo-mcp-server".to_string(),
                title: Some("Todo MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some("Shared todo list: add, list, complete and delete tasks".to_string()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Todo MCP Server - Manage a shared task list. Use list_tasks to find task IDs, \
                 then mark_task_as_done or delete_task with the 24-character ID."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(
            self.dispatcher.catalog().to_tools(),
        ))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = %request.name, "Tool call received");
        let reply = self
            .dispatcher
            .call(&request.name, request.arguments.as_ref())
            .await;
        Ok(reply.into())
    }
}

/// Serve MCP over stdin/stdout until the client disconnects or `ct` fires.
pub async fn serve_stdio<S: TaskStore + 'static>(
    server: McpServer<S>,
    ct: CancellationToken,
) -> Result<(), std::io::Error> {
    info!("MCP stdio transport starting");

    let service = server
        .serve(rmcp::transport::io::stdio())
        .await
        .map_err(std::io::Error::other)?;

    tokio::select! {
        result = service.waiting() => {
            result.map_err(std::io::Error::other)?;
            info!("MCP stdio client disconnected");
        }
        _ = ct.cancelled() => {
            info!("MCP stdio transport shutting down");
        }
    }

    Ok(())
}
