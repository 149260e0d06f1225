//! SQLite implementation of the task store.
//!
//! This module provides a SQLite-backed implementation of the
//! [`TaskStore`](crate::db::TaskStore) gateway defined in the parent module.

mod collection;
mod connection;
mod helpers;

#[cfg(test)]
mod connection_test;

pub use connection::SqliteStore;
pub use helpers::Namespace;
