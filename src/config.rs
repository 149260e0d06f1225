//! Store configuration.
//!
//! Priority for every setting:
//! 1. Explicit override (CLI flag)
//! 2. Environment variable
//! 3. Built-in default

use std::env;

pub const STORE_URI_ENV: &str = "TODO_STORE_URI";
pub const DATABASE_NAME_ENV: &str = "TODO_DATABASE_NAME";
pub const COLLECTION_NAME_ENV: &str = "TODO_COLLECTION_NAME";

pub const DEFAULT_STORE_URI: &str = "sqlite://todo.db?mode=rwc";
pub const DEFAULT_DATABASE_NAME: &str = "todo_db";
pub const DEFAULT_COLLECTION_NAME: &str = "tasks";

/// Where tasks are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store connection URI.
    pub uri: String,
    /// Database name; together with the collection it forms the namespace.
    pub database: String,
    /// Collection holding the task documents.
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_STORE_URI.to_string(),
            database: DEFAULT_DATABASE_NAME.to_string(),
            collection: DEFAULT_COLLECTION_NAME.to_string(),
        }
    }
}

impl StoreConfig {
    /// Read settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            uri: env::var(STORE_URI_ENV).unwrap_or(defaults.uri),
            database: env::var(DATABASE_NAME_ENV).unwrap_or(defaults.database),
            collection: env::var(COLLECTION_NAME_ENV).unwrap_or(defaults.collection),
        }
    }

    pub fn with_uri(mut self, uri: Option<String>) -> Self {
        if let Some(uri) = uri {
            self.uri = uri;
        }
        self
    }

    pub fn with_database(mut self, database: Option<String>) -> Self {
        if let Some(database) = database {
            self.database = database;
        }
        self
    }

    pub fn with_collection(mut self, collection: Option<String>) -> Self {
        if let Some(collection) = collection {
            self.collection = collection;
        }
        self
    }
}
