//! Persistence gateway trait.
//!
//! [`TaskStore`] is the narrow contract the dispatcher and the health
//! endpoint depend on, allowing the document store to be swapped without
//! changing business logic.

use std::future::Future;

use crate::db::{DbResult, TaskId};

/// A schemaless stored document.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Partial update of a single document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    /// Fields to overwrite.
    pub set: Document,
    /// Fields written alongside `set`, but only when `set` changes the document.
    pub touch: Document,
}

/// Result of [`TaskStore::update_by_id`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents matching the identifier.
    pub matched: u64,
    /// Documents whose content changed.
    pub modified: u64,
}

/// Document store holding one collection of tasks.
///
/// Implementations must be safe for concurrent use; every operation is
/// atomic on a single document. Operations fail with
/// [`DbError::Unavailable`](crate::db::DbError::Unavailable) on
/// connectivity loss and are never retried.
pub trait TaskStore: Send + Sync {
    /// Insert a document, assigning `_id` when absent.
    fn insert(&self, doc: Document) -> impl Future<Output = DbResult<TaskId>> + Send;

    /// Fetch at most `limit` documents in store-native order.
    fn find_all(&self, limit: usize) -> impl Future<Output = DbResult<Vec<Document>>> + Send;

    /// Apply a partial update. Zero counts are not errors.
    fn update_by_id(
        &self,
        id: &TaskId,
        update: Update,
    ) -> impl Future<Output = DbResult<UpdateOutcome>> + Send;

    /// Delete by identifier, returning the deleted count.
    fn delete_by_id(&self, id: &TaskId) -> impl Future<Output = DbResult<u64>> + Send;

    /// Liveness probe. Never fails; returns `false` on any error.
    fn ping(&self) -> impl Future<Output = bool> + Send;

    /// Release the underlying connections.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
