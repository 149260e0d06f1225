//! Database error types.
//!
//! This module provides abstracted error types for store operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Store operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Invalid task ID '{value}': expected a 24-character hex string")]
    #[diagnostic(code(todo_mcp::db::invalid_identifier))]
    InvalidIdentifier { value: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(todo_mcp::db::validation_error))]
    Validation { message: String },

    #[error("Corrupt record '{id}': {message}")]
    #[diagnostic(
        code(todo_mcp::db::corrupt_record),
        help("The stored document does not match the task layout")
    )]
    CorruptRecord { id: String, message: String },

    #[error("Store unavailable: {message}")]
    #[diagnostic(
        code(todo_mcp::db::unavailable),
        help("Check TODO_STORE_URI and that the database file is reachable")
    )]
    Unavailable { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(todo_mcp::db::database_error))]
    Database { message: String },
}

impl DbError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        DbError::Validation {
            message: message.into(),
        }
    }
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;
