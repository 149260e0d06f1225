//! Shared helpers for the SQLite store.

use std::fmt;

use crate::db::{DbError, DbResult};

const MAX_NAME_LEN: usize = 64;

/// `<database>.<collection>`, the table holding one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    database: String,
    collection: String,
}

impl Namespace {
    /// Both names must match `[A-Za-z0-9_-]{1,64}`; they are spliced into SQL.
    pub fn new(database: &str, collection: &str) -> DbResult<Self> {
        for (kind, name) in [("database", database), ("collection", collection)] {
            let valid = !name.is_empty()
                && name.len() <= MAX_NAME_LEN
                && name
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
            if !valid {
                return Err(DbError::validation(format!(
                    "invalid {} name '{}': use 1-64 letters, digits, '_' or '-'",
                    kind, name
                )));
            }
        }

        Ok(Self {
            database: database.to_string(),
            collection: collection.to_string(),
        })
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Quoted table identifier.
    pub(crate) fn table(&self) -> String {
        format!("\"{}.{}\"", self.database, self.collection)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}

/// Connectivity faults become `Unavailable`; everything else is a plain
/// database error.
pub(crate) fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match &e {
        sqlx::Error::PoolClosed
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::WorkerCrashed => DbError::Unavailable {
            message: e.to_string(),
        },
        _ => DbError::Database {
            message: e.to_string(),
        },
    }
}

pub(crate) fn map_json_error(e: serde_json::Error) -> DbError {
    DbError::Database {
        message: format!("failed to encode document: {}", e),
    }
}
