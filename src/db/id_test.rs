//! Tests for task identifiers.

use std::collections::HashSet;

use crate::db::{DbError, TaskId};

#[test]
fn decode_accepts_24_hex_chars() {
    let id = TaskId::decode("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
    assert_eq!(id.encode(), "65a1f0c2e4b0a1b2c3d4e5f6");
}

#[test]
fn decode_accepts_uppercase_and_encodes_lowercase() {
    let id = TaskId::decode("65A1F0C2E4B0A1B2C3D4E5F6").unwrap();
    assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
}

#[test]
fn decode_rejects_malformed_input() {
    for bad in [
        "",
        "not-an-id",
        "65a1f0c2e4b0a1b2c3d4e5f",
        "65a1f0c2e4b0a1b2c3d4e5f6a",
        "65a1f0c2e4b0a1b2c3d4e5fg",
        "65a1f0c2e4b0a1b2c3d4e5é",
    ] {
        let err = TaskId::decode(bad).unwrap_err();
        assert!(
            matches!(err, DbError::InvalidIdentifier { ref value } if value == bad),
            "expected InvalidIdentifier for {:?}, got {:?}",
            bad,
            err
        );
    }
}

#[test]
fn generated_ids_have_external_form() {
    let id = TaskId::generate();
    let text = id.encode();
    assert_eq!(text.len(), 24);
    assert!(text.bytes().all(|b| b.is_ascii_hexdigit()));
    assert_eq!(TaskId::decode(&text).unwrap(), id);
}

#[test]
fn generated_ids_embed_current_time() {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as u32;
    let id = TaskId::generate();
    assert!(id.timestamp().abs_diff(now) <= 1);
}

#[test]
fn generated_ids_are_distinct_across_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| (0..500).map(|_| TaskId::generate()).collect::<Vec<_>>()))
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id), "duplicate id generated: {}", id);
        }
    }
    assert_eq!(seen.len(), 4000);
}

#[test]
fn serde_uses_string_form() {
    let id = TaskId::decode("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"65a1f0c2e4b0a1b2c3d4e5f6\"");

    let back: TaskId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);

    assert!(serde_json::from_str::<TaskId>("\"nope\"").is_err());
}
