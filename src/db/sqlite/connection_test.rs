//! Tests for SQLite store connection and collection setup.

use crate::config::StoreConfig;
use crate::db::sqlite::Namespace;
use crate::db::{DbError, SqliteStore, TaskStore};

#[tokio::test(flavor = "multi_thread")]
async fn in_memory_creates_collection_table() {
    let store = SqliteStore::in_memory("todo_db", "tasks")
        .await
        .expect("Failed to create in-memory store");

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(store.pool())
            .await
            .expect("Query should succeed");

    assert!(
        tables.iter().any(|t| t == "todo_db.tasks"),
        "Missing collection table. Found tables: {:?}",
        tables
    );
    assert_eq!(store.namespace().to_string(), "todo_db.tasks");
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_with_memory_uri_succeeds() {
    let config = StoreConfig {
        uri: "sqlite::memory:".to_string(),
        ..StoreConfig::default()
    };

    let store = SqliteStore::connect(&config).await.expect("connect");
    assert!(store.ping().await);
    assert_eq!(store.namespace().database(), "todo_db");
    assert_eq!(store.namespace().collection(), "tasks");
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_fails_fast_on_unreachable_store() {
    let config = StoreConfig {
        uri: "sqlite:///nonexistent-dir/for/sure/todo.db?mode=ro".to_string(),
        ..StoreConfig::default()
    };

    let err = SqliteStore::connect(&config).await.err().expect("must fail");
    assert!(matches!(err, DbError::Unavailable { .. }), "got {:?}", err);
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_rejects_malformed_uri() {
    let config = StoreConfig {
        uri: "mongodb://localhost:27017".to_string(),
        ..StoreConfig::default()
    };

    let err = SqliteStore::connect(&config).await.err().expect("must fail");
    assert!(matches!(err, DbError::Unavailable { .. }), "got {:?}", err);
}

#[tokio::test(flavor = "multi_thread")]
async fn ping_reports_false_after_close() {
    let store = SqliteStore::in_memory("todo_db", "tasks").await.unwrap();
    assert!(store.ping().await);

    store.close().await;
    assert!(!store.ping().await);
}

#[tokio::test(flavor = "multi_thread")]
async fn operations_after_close_are_unavailable() {
    let store = SqliteStore::in_memory("todo_db", "tasks").await.unwrap();
    store.close().await;

    let err = store.find_all(10).await.unwrap_err();
    assert!(matches!(err, DbError::Unavailable { .. }), "got {:?}", err);
}

#[test]
fn namespace_rejects_unsafe_names() {
    assert!(Namespace::new("todo_db", "tasks").is_ok());
    assert!(Namespace::new("todo-db", "tasks_2").is_ok());

    for (db, coll) in [
        ("", "tasks"),
        ("todo_db", ""),
        ("todo\"db", "tasks"),
        ("todo_db", "tasks; DROP TABLE x"),
        ("todo.db", "tasks"),
    ] {
        assert!(
            matches!(Namespace::new(db, coll), Err(DbError::Validation { .. })),
            "expected rejection for {:?}.{:?}",
            db,
            coll
        );
    }

    assert!(Namespace::new(&"a".repeat(65), "tasks").is_err());
}
