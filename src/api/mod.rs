//! HTTP surface: welcome and health routes, API docs and the streamable MCP
//! endpoint, all served from one listener.

mod handlers;
mod routes;
mod state;


use std::net::IpAddr;
use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::TaskStore;
use crate::mcp::{Dispatcher, create_mcp_service};

pub use handlers::{HealthResponse, WelcomeResponse};
pub use routes::{ApiDoc, create_router};
pub use state::AppState;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Log verbosity (-v count); ignored when RUST_LOG is set
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            verbosity: 0,
        }
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}")]
    #[diagnostic(
        code(todo_mcp::api::bind_failed),
        help("Is another process listening on this port? Try --port with a free port.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error")]
    #[diagnostic(code(todo_mcp::api::serve_failed))]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

/// Default log filter for a `-v` count.
pub(crate) fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "todo_mcp=info,tower_http=info",
        1 => "todo_mcp=debug,tower_http=debug",
        _ => "todo_mcp=trace,tower_http=trace,rmcp=debug",
    }
}

/// Initialize tracing subscriber with env filter.
///
/// Logs go to stderr; stdout carries the MCP stdio protocol.
pub fn init_tracing(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbosity).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Run the HTTP server until `ct` is cancelled.
pub async fn run<S: TaskStore + 'static>(
    config: Config,
    dispatcher: Arc<Dispatcher<S>>,
    ct: CancellationToken,
) -> Result<(), ApiError> {
    let state = AppState::new(Arc::clone(dispatcher.store()));
    let mcp_service = create_mcp_service(dispatcher, ct.child_token());
    let app = create_router(state, mcp_service).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|source| ApiError::Serve { source })?;

    info!("HTTP server stopped");
    Ok(())
}
