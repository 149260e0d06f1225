//! Model Context Protocol (MCP) server implementation
//!
//! # Architecture
//!
//! - **catalog**: Typed tool descriptors, validated once at construction
//! - **dispatcher**: Routes tool calls to the task store and folds every
//!   failure into a uniform reply
//! - **server**: `ServerHandler` adapter plus the stdio transport
//! - **service**: Streamable HTTP transport for mounting under Axum
//!
//! The dispatcher is generic over `S: TaskStore`, so both transports share
//! one store handle without dynamic dispatch.

pub mod catalog;
pub mod dispatcher;
pub mod server;
mod service;


pub use catalog::{ArgKind, ArgSpec, Catalog, CatalogError, ToolDescriptor};
pub use dispatcher::{Dispatcher, Reply, ToolError};
pub use server::{McpServer, serve_stdio};
pub use service::create_mcp_service;
