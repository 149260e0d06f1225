use miette::Diagnostic;
use thiserror::Error;

use crate::api::ApiError;
use crate::db::DbError;
use crate::mcp::CatalogError;

#[derive(Error, Diagnostic, Debug)]
pub enum ServeError {
    #[error("Failed to open the task store")]
    #[diagnostic(
        code(todo_mcp::serve::store),
        help(
            "Check TODO_STORE_URI (or --store-uri). The default is sqlite://todo.db?mode=rwc in the working directory."
        )
    )]
    Store {
        #[source]
        source: DbError,
    },

    #[error("Tool catalog is invalid")]
    #[diagnostic(code(todo_mcp::serve::catalog))]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Api(#[from] ApiError),

    #[error("MCP stdio transport failed")]
    #[diagnostic(code(todo_mcp::serve::stdio))]
    Stdio {
        #[source]
        source: std::io::Error,
    },

    #[error("Listener task panicked or was aborted")]
    #[diagnostic(code(todo_mcp::serve::join))]
    Join(#[from] tokio::task::JoinError),
}

impl From<DbError> for ServeError {
    fn from(source: DbError) -> Self {
        ServeError::Store { source }
    }
}

pub type ServeResult<T> = Result<T, ServeError>;
