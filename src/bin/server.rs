//! Todo MCP server binary.
//!
//! Serves the task tools over MCP stdio and streamable HTTP, plus the
//! health and welcome routes.

#[tokio::main]
async fn main() -> miette::Result<()> {
    todo_mcp::cli::run().await
}
