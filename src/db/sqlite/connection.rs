//! SQLite connection management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use super::helpers::{Namespace, map_sqlx_error};
use crate::config::StoreConfig;
use crate::db::{DbError, DbResult};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed document store.
///
/// Holds one connection pool for the lifetime of the process. Clones of the
/// pool handle are cheap; share the store itself behind an `Arc`.
pub struct SqliteStore {
    pub(crate) pool: SqlitePool,
    pub(crate) namespace: Namespace,
    pub(crate) table: String,
}

impl SqliteStore {
    /// Connect, verify liveness and make sure the collection exists.
    ///
    /// Any failure is reported as [`DbError::Unavailable`]; callers should
    /// treat it as fatal at startup.
    pub async fn connect(config: &StoreConfig) -> DbResult<Self> {
        let namespace = Namespace::new(&config.database, &config.collection)?;

        let options = SqliteConnectOptions::from_str(&config.uri).map_err(|e| {
            DbError::Unavailable {
                message: format!("invalid store URI '{}': {}", config.uri, e),
            }
        })?;

        let in_memory = config.uri.contains(":memory:") || config.uri.contains("mode=memory");
        let pool = pool_options(in_memory)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Unavailable {
                message: e.to_string(),
            })?;

        let store = Self::with_pool(pool, namespace).await?;
        info!(namespace = %store.namespace, "Connected to task store");
        Ok(store)
    }

    /// Create an in-memory store (useful for testing).
    pub async fn in_memory(database: &str, collection: &str) -> DbResult<Self> {
        let namespace = Namespace::new(database, collection)?;

        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(map_sqlx_error)?;
        let pool = pool_options(true)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        Self::with_pool(pool, namespace).await
    }

    async fn with_pool(pool: SqlitePool, namespace: Namespace) -> DbResult<Self> {
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| DbError::Unavailable {
                message: e.to_string(),
            })?;

        let table = namespace.table();
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                _id TEXT NOT NULL UNIQUE,
                doc TEXT NOT NULL CHECK (json_valid(doc))
            )
            "#,
            table
        ))
        .execute(&pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Self {
            pool,
            namespace,
            table,
        })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }
}

/// Every in-memory connection is its own database, so those pools pin a
/// single connection for their whole lifetime.
fn pool_options(in_memory: bool) -> SqlitePoolOptions {
    let options = SqlitePoolOptions::new().acquire_timeout(ACQUIRE_TIMEOUT);
    if in_memory {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options
    }
}
