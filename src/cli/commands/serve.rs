//! Serve command - MCP over stdio plus the HTTP listener (health, docs, /mcp)

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::{self, Config};
use crate::cli::error::{ServeError, ServeResult};
use crate::config::StoreConfig;
use crate::db::{SqliteStore, TaskStore};
use crate::mcp::{Catalog, Dispatcher, McpServer, serve_stdio};

/// Open the store and build the dispatcher both transports share.
///
/// Fails before any listener starts when the store is unreachable.
pub async fn prepare(store_config: &StoreConfig) -> ServeResult<Arc<Dispatcher<SqliteStore>>> {
    let store = Arc::new(SqliteStore::connect(store_config).await?);
    let catalog = Catalog::standard()?;
    Ok(Arc::new(Dispatcher::new(store, catalog)))
}

/// Spawn `fut`, cancelling `ct` if it fails so its sibling stops too.
///
/// A clean finish leaves the sibling running.
pub(super) fn spawn_linked<F, E>(ct: &CancellationToken, fut: F) -> JoinHandle<Result<(), E>>
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: Send + 'static,
{
    let ct = ct.clone();
    tokio::spawn(async move {
        let result = fut.await;
        if result.is_err() {
            ct.cancel();
        }
        result
    })
}

/// Run the listeners until Ctrl-C or a listener fails.
///
/// The HTTP listener keeps serving after the stdio session ends. With
/// `stdio` off only the HTTP listener runs.
pub async fn run(store_config: StoreConfig, config: Config, stdio: bool) -> ServeResult<()> {
    let dispatcher = prepare(&store_config).await?;

    // stdout belongs to the MCP stdio stream
    eprintln!();
    eprintln!("🚀 todo-mcp server starting...");
    if stdio {
        eprintln!("   MCP:    stdio");
    }
    eprintln!("   MCP:    http://{}:{}/mcp", config.host, config.port);
    eprintln!("   Health: http://{}:{}/health", config.host, config.port);
    eprintln!("   Docs:   http://{}:{}/docs", config.host, config.port);
    eprintln!();
    eprintln!("   Store:  {} ({})", store_config.uri, dispatcher.store().namespace());
    eprintln!();

    let ct = CancellationToken::new();

    let http = spawn_linked(&ct, api::run(config, Arc::clone(&dispatcher), ct.clone()));
    let stdio = stdio.then(|| {
        spawn_linked(
            &ct,
            serve_stdio(McpServer::new(Arc::clone(&dispatcher)), ct.clone()),
        )
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Ctrl-C received, shutting down"),
        _ = ct.cancelled() => info!("Listener failed, shutting down"),
    }
    ct.cancel();

    let http_result = http.await;
    let stdio_result = match stdio {
        Some(handle) => Some(handle.await),
        None => None,
    };

    dispatcher.store().close().await;
    info!("Task store closed");

    http_result??;
    if let Some(result) = stdio_result {
        result?.map_err(|source| ServeError::Stdio { source })?;
    }
    Ok(())
}
