//! Tests for domain models.

use chrono::Utc;
use serde_json::json;

use crate::db::models::*;
use crate::db::{DbError, Document, TaskId};

fn doc(value: serde_json::Value) -> Document {
    value.as_object().unwrap().clone()
}

#[test]
fn task_status_deserializes_from_database_format() {
    let in_progress: TaskStatus = serde_json::from_str("\"in_progress\"").unwrap();
    assert_eq!(in_progress, TaskStatus::InProgress);

    let done: TaskStatus = serde_json::from_str("\"done\"").unwrap();
    assert_eq!(done, TaskStatus::Done);

    assert!(serde_json::from_str::<TaskStatus>("\"cancelled\"").is_err());
}

#[test]
fn task_status_display_matches_from_str() {
    for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done] {
        assert_eq!(status.to_string().parse::<TaskStatus>().unwrap(), status);
    }
    assert!("backlog".parse::<TaskStatus>().is_err());
}

#[test]
fn validate_create_sets_defaults() {
    let task = Task::validate_create("Buy milk").unwrap();
    assert!(task.id.is_none());
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.created_at, task.updated_at);
}

#[test]
fn validate_create_rejects_blank_title() {
    for title in ["", "   ", "\t\n"] {
        let err = Task::validate_create(title).unwrap_err();
        assert!(matches!(err, DbError::Validation { ref message } if message == "empty title"));
    }
}

#[test]
fn validate_create_enforces_length_bound_in_characters() {
    assert!(Task::validate_create(&"a".repeat(200)).is_ok());
    // Multi-byte characters count once each.
    assert!(Task::validate_create(&"é".repeat(200)).is_ok());

    let err = Task::validate_create(&"a".repeat(201)).unwrap_err();
    assert!(matches!(err, DbError::Validation { ref message } if message == "title too long"));
}

#[test]
fn validate_create_rejects_control_characters() {
    for title in ["Buy milk\n- [✅] Fake (ID: 000000000000000000000000)", "tab\there", "bell\u{7}"] {
        let err = Task::validate_create(title).unwrap_err();
        assert!(
            matches!(err, DbError::Validation { ref message } if message == "title contains control characters")
        );
    }

    // Non-ASCII printable text is fine
    assert!(Task::validate_create("Café ☕ 日本").is_ok());
}

#[test]
fn to_stored_omits_missing_id() {
    let task = Task::validate_create("Write report").unwrap();
    let stored = task.to_stored().unwrap();

    assert!(!stored.contains_key("_id"));
    assert_eq!(stored["title"], "Write report");
    assert_eq!(stored["status"], "todo");
    assert!(stored.contains_key("created_at"));
    assert!(stored.contains_key("updated_at"));
}

#[test]
fn stored_document_reads_back() {
    let mut task = Task::validate_create("Write report").unwrap();
    task.id = Some(TaskId::generate());

    let stored = task.to_stored().unwrap();
    assert_eq!(stored["_id"], task.id.unwrap().encode());

    let back = Task::from_stored(&stored).unwrap();
    assert_eq!(back, task);
}

#[test]
fn from_stored_rejects_unknown_status() {
    let stored = doc(json!({
        "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
        "title": "Odd",
        "status": "archived",
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z",
    }));

    let err = Task::from_stored(&stored).unwrap_err();
    assert!(
        matches!(err, DbError::CorruptRecord { ref id, .. } if id == "65a1f0c2e4b0a1b2c3d4e5f6")
    );
}

#[test]
fn from_stored_rejects_missing_fields() {
    let stored = doc(json!({ "title": "No status" }));
    let err = Task::from_stored(&stored).unwrap_err();
    assert!(matches!(err, DbError::CorruptRecord { ref id, .. } if id == "<unknown>"));
}

#[test]
fn mark_done_patch_sets_status_and_touches_updated_at() {
    let now = Utc::now();
    let update = TaskPatch::mark_done().to_update(now).unwrap();

    assert_eq!(update.set.len(), 1);
    assert_eq!(update.set["status"], "done");
    assert_eq!(update.touch["updated_at"], serde_json::to_value(now).unwrap());
}

#[test]
fn patch_validates_title() {
    let patch = TaskPatch {
        title: Some(String::new()),
        status: None,
    };
    assert!(matches!(
        patch.to_update(Utc::now()),
        Err(DbError::Validation { .. })
    ));

    let patch = TaskPatch {
        title: Some("Renamed".to_string()),
        status: Some(TaskStatus::InProgress),
    };
    let update = patch.to_update(Utc::now()).unwrap();
    assert_eq!(update.set["title"], "Renamed");
    assert_eq!(update.set["status"], "in_progress");
}
