use serial_test::serial;
use std::env;

use crate::config::*;

fn clear_env() {
    unsafe {
        env::remove_var(STORE_URI_ENV);
        env::remove_var(DATABASE_NAME_ENV);
        env::remove_var(COLLECTION_NAME_ENV);
    }
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clear_env();

    let config = StoreConfig::from_env();
    assert_eq!(config.uri, "sqlite://todo.db?mode=rwc");
    assert_eq!(config.database, "todo_db");
    assert_eq!(config.collection, "tasks");
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    clear_env();
    unsafe {
        env::set_var(STORE_URI_ENV, "sqlite::memory:");
        env::set_var(COLLECTION_NAME_ENV, "chores");
    }

    let config = StoreConfig::from_env();
    assert_eq!(config.uri, "sqlite::memory:");
    assert_eq!(config.database, "todo_db");
    assert_eq!(config.collection, "chores");

    clear_env();
}

#[test]
#[serial]
fn test_flag_overrides_env() {
    clear_env();
    unsafe {
        env::set_var(DATABASE_NAME_ENV, "from_env");
    }

    let config = StoreConfig::from_env()
        .with_database(Some("from_flag".to_string()))
        .with_uri(None);

    assert_eq!(config.database, "from_flag", "flag should override env var");
    assert_eq!(config.uri, DEFAULT_STORE_URI);

    clear_env();
}
