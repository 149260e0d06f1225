//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::TaskStore;

/// Shared application state.
///
/// Generic over `S: TaskStore` so handlers see the same store handle the
/// MCP transports use.
pub struct AppState<S: TaskStore> {
    store: Arc<S>,
}

// Manual Clone impl - only the Arc needs to be cloneable, not S
impl<S: TaskStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TaskStore> AppState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
