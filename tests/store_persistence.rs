//! Store durability tests.
//!
//! The record log must hand back exactly what was acknowledged, across
//! process restarts, and must refuse to hand back anything it cannot
//! verify.

use serde_json::json;
use soulregistry::store::{DocumentStore, NamePattern, StoreError};
use std::fs;
use tempfile::TempDir;

fn create_temp_data_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

#[test]
fn records_survive_reopen_in_insertion_order() {
    let temp_dir = create_temp_data_dir();

    {
        let mut store = DocumentStore::open(temp_dir.path()).unwrap();
        store
            .insert("wielders", "1", &json!({"name": "Ichigo"}))
            .unwrap();
        store
            .insert("wielders", "2", &json!({"name": "Rukia"}))
            .unwrap();
    }

    let store = DocumentStore::open(temp_dir.path()).unwrap();
    let all = store.find_all("wielders").unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["name"], "Ichigo");
    assert_eq!(all[1]["name"], "Rukia");
}

#[test]
fn latest_record_wins_across_reopen() {
    let temp_dir = create_temp_data_dir();

    {
        let mut store = DocumentStore::open(temp_dir.path()).unwrap();
        store
            .insert("wielders", "1", &json!({"name": "Ichigo", "zanpakuto": "zangetsu"}))
            .unwrap();
        store
            .update_first_matching("wielders", "name", &NamePattern::new("ichigo"), |doc| {
                doc["zanpakuto"] = json!("tensa zangetsu");
            })
            .unwrap()
            .unwrap();
    }

    let store = DocumentStore::open(temp_dir.path()).unwrap();
    let all = store.find_all("wielders").unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["zanpakuto"], "tensa zangetsu");
}

#[test]
fn tombstone_removes_document_across_reopen() {
    let temp_dir = create_temp_data_dir();

    {
        let mut store = DocumentStore::open(temp_dir.path()).unwrap();
        store
            .insert("zanpakutos", "1", &json!({"name": "Zangetsu"}))
            .unwrap();
        store
            .insert("zanpakutos", "2", &json!({"name": "Senbonzakura"}))
            .unwrap();
        store
            .delete_first_matching("zanpakutos", "name", &NamePattern::new("zangetsu"))
            .unwrap()
            .unwrap();
    }

    let store = DocumentStore::open(temp_dir.path()).unwrap();
    assert_eq!(store.count("zanpakutos"), 1);
    let all = store.find_all("zanpakutos").unwrap();
    assert_eq!(all[0]["name"], "Senbonzakura");

    // The tombstoned document does not match anymore
    let found = store
        .find_first_matching("zanpakutos", "name", &NamePattern::new("zangetsu"))
        .unwrap();
    assert!(found.is_none());
}

#[test]
fn corrupted_log_fails_open_with_corruption_error() {
    let temp_dir = create_temp_data_dir();
    let log_path = DocumentStore::log_path_for(temp_dir.path());

    {
        let mut store = DocumentStore::open(temp_dir.path()).unwrap();
        store
            .insert("wielders", "1", &json!({"name": "Ichigo"}))
            .unwrap();
    }

    // Flip one byte in the middle of the record
    let mut contents = fs::read(&log_path).unwrap();
    let mid = contents.len() / 2;
    contents[mid] ^= 0xFF;
    fs::write(&log_path, contents).unwrap();

    let result = DocumentStore::open(temp_dir.path());
    match result {
        Err(StoreError::Corruption { .. }) => {}
        other => panic!("expected corruption error, got {:?}", other.err()),
    }
}

#[test]
fn truncated_log_fails_open() {
    let temp_dir = create_temp_data_dir();
    let log_path = DocumentStore::log_path_for(temp_dir.path());

    {
        let mut store = DocumentStore::open(temp_dir.path()).unwrap();
        store
            .insert("wielders", "1", &json!({"name": "Ichigo"}))
            .unwrap();
    }

    let contents = fs::read(&log_path).unwrap();
    fs::write(&log_path, &contents[..contents.len() - 5]).unwrap();

    let result = DocumentStore::open(temp_dir.path());
    assert!(matches!(result, Err(StoreError::Corruption { .. })));
}

#[test]
fn collections_are_independent() {
    let temp_dir = create_temp_data_dir();
    let mut store = DocumentStore::open(temp_dir.path()).unwrap();

    store
        .insert("wielders", "1", &json!({"name": "Ichigo", "zanpakuto": "zangetsu"}))
        .unwrap();
    store
        .insert("zanpakutos", "1", &json!({"name": "Zangetsu", "bankai": "Tensa Zangetsu"}))
        .unwrap();

    // Same pattern, different collections
    let pattern = NamePattern::new("zangetsu");
    store
        .delete_first_matching("zanpakutos", "name", &pattern)
        .unwrap()
        .unwrap();

    assert_eq!(store.count("zanpakutos"), 0);
    assert_eq!(store.count("wielders"), 1);

    // The wielder's reference string is untouched
    let wielder = store
        .find_first_matching("wielders", "name", &NamePattern::new("ichigo"))
        .unwrap()
        .unwrap();
    assert_eq!(wielder["zanpakuto"], "zangetsu");
}
