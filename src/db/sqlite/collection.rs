//! `TaskStore` implementation over a single SQLite table.
//!
//! Each row keeps the identifier in `_id` and the rest of the document as
//! canonical JSON in `doc`. `seq` preserves insertion order and is never
//! reused, so neither are identifiers of deleted documents.

use std::time::Duration;

use serde_json::Value;
use sqlx::Row;
use tracing::{debug, warn};

use super::connection::SqliteStore;
use super::helpers::{map_json_error, map_sqlx_error};
use crate::db::{DbError, DbResult, Document, TaskId, TaskStore, Update, UpdateOutcome};

const PING_TIMEOUT: Duration = Duration::from_secs(2);

impl TaskStore for SqliteStore {
    async fn insert(&self, mut doc: Document) -> DbResult<TaskId> {
        let id = match doc.remove("_id") {
            None | Some(Value::Null) => TaskId::generate(),
            Some(Value::String(text)) => TaskId::decode(&text)?,
            Some(other) => {
                return Err(DbError::validation(format!(
                    "_id must be a string, got {}",
                    other
                )));
            }
        };

        let body = serde_json::to_string(&doc).map_err(map_json_error)?;

        sqlx::query(&format!(
            "INSERT INTO {} (_id, doc) VALUES (?, json(?))",
            self.table
        ))
        .bind(id.encode())
        .bind(body)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(%id, "Inserted document");
        Ok(id)
    }

    async fn find_all(&self, limit: usize) -> DbResult<Vec<Document>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query(&format!("SELECT _id, doc FROM {} LIMIT ?", self.table))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("_id").map_err(map_sqlx_error)?;
            let body: String = row.try_get("doc").map_err(map_sqlx_error)?;

            // Non-object bodies come back with only `_id`; the model layer
            // reports them as corrupt.
            let mut doc = match serde_json::from_str::<Value>(&body) {
                Ok(Value::Object(doc)) => doc,
                _ => {
                    warn!(%id, "Stored document body is not a JSON object");
                    Document::new()
                }
            };
            doc.insert("_id".to_string(), Value::String(id));
            docs.push(doc);
        }

        Ok(docs)
    }

    async fn update_by_id(&self, id: &TaskId, update: Update) -> DbResult<UpdateOutcome> {
        let set = serde_json::to_string(&update.set).map_err(map_json_error)?;
        let touch = serde_json::to_string(&update.touch).map_err(map_json_error)?;

        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let modified = sqlx::query(&format!(
            r#"
            UPDATE {}
            SET doc = json_patch(json_patch(doc, ?), ?)
            WHERE _id = ? AND json(json_patch(doc, ?)) IS NOT json(doc)
            "#,
            self.table
        ))
        .bind(&set)
        .bind(&touch)
        .bind(id.encode())
        .bind(&set)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?
        .rows_affected();

        let matched = if modified > 0 {
            modified
        } else {
            let count: i64 =
                sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {} WHERE _id = ?", self.table))
                    .bind(id.encode())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(map_sqlx_error)?;
            count as u64
        };

        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(%id, matched, modified, "Updated document");
        Ok(UpdateOutcome { matched, modified })
    }

    async fn delete_by_id(&self, id: &TaskId) -> DbResult<u64> {
        let deleted = sqlx::query(&format!("DELETE FROM {} WHERE _id = ?", self.table))
            .bind(id.encode())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .rows_affected();

        debug!(%id, deleted, "Deleted document");
        Ok(deleted)
    }

    async fn ping(&self) -> bool {
        if self.pool.is_closed() {
            return false;
        }

        matches!(
            tokio::time::timeout(PING_TIMEOUT, sqlx::query("SELECT 1").execute(&self.pool)).await,
            Ok(Ok(_))
        )
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
