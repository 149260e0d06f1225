//! Persistence layer.
//!
//! This module provides a trait-based abstraction over the document store,
//! so the backend can be swapped without changing the tool dispatcher.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `id`: Identifier codec (`TaskId`)
//! - `models`: Task entity and its stored document shape
//! - `repository`: The `TaskStore` gateway trait
//! - `sqlite`: SQLite-backed document store

mod error;
mod id;
mod models;
mod repository;
pub mod sqlite;

#[cfg(test)]
mod id_test;
#[cfg(test)]
mod models_test;

pub use error::{DbError, DbResult};
pub use id::TaskId;
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteStore;
