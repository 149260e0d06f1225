//! Domain models for the task store.
//!
//! These models are storage-agnostic. Conversion to and from the stored
//! document shape happens only through [`Task::to_stored`],
//! [`Task::from_stored`] and [`TaskPatch::to_update`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::{DbError, DbResult, Document, TaskId, Update};

/// Maximum title length, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn is_done(self) -> bool {
        self == TaskStatus::Done
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "todo"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(format!("Invalid TaskStatus: {}", s)),
        }
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned by the store; `None` until first persisted.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Check the 1..=200 character bound on a title.
pub fn validate_title(title: &str) -> DbResult<()> {
    if title.trim().is_empty() {
        return Err(DbError::validation("empty title"));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(DbError::validation("title too long"));
    }
    // One task per rendered line
    if title.chars().any(char::is_control) {
        return Err(DbError::validation("title contains control characters"));
    }
    Ok(())
}

impl Task {
    /// Build a new, not yet persisted task.
    pub fn validate_create(title: &str) -> DbResult<Self> {
        validate_title(title)?;
        let now = Utc::now();
        Ok(Self {
            id: None,
            title: title.to_string(),
            status: TaskStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Deserialize a stored document.
    pub fn from_stored(doc: &Document) -> DbResult<Self> {
        serde_json::from_value(Value::Object(doc.clone())).map_err(|e| DbError::CorruptRecord {
            id: doc
                .get("_id")
                .and_then(Value::as_str)
                .unwrap_or("<unknown>")
                .to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize for persistence. `_id` is left out while unassigned.
    pub fn to_stored(&self) -> DbResult<Document> {
        match serde_json::to_value(self) {
            Ok(Value::Object(doc)) => Ok(doc),
            Ok(other) => Err(DbError::Database {
                message: format!("task serialized to non-object: {}", other),
            }),
            Err(e) => Err(DbError::Database {
                message: e.to_string(),
            }),
        }
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }
}

/// Partial update of a persisted task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Patch that completes a task.
    pub fn mark_done() -> Self {
        Self {
            status: Some(TaskStatus::Done),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> DbResult<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        Ok(())
    }

    /// Convert into a store update that refreshes `updated_at` only when the
    /// patch actually changes the document.
    pub fn to_update(&self, now: DateTime<Utc>) -> DbResult<Update> {
        self.validate()?;

        let mut set = Document::new();
        if let Some(title) = &self.title {
            set.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(status) = self.status {
            set.insert("status".to_string(), Value::String(status.to_string()));
        }

        let mut touch = Document::new();
        touch.insert(
            "updated_at".to_string(),
            serde_json::to_value(now).map_err(|e| DbError::Database {
                message: e.to_string(),
            })?,
        );

        Ok(Update { set, touch })
    }
}
