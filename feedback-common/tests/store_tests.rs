//! Integration tests for the persistence adapters
//!
//! Every behaviour is checked against both backends through the
//! `FeedbackStore` trait object returned by `open_store`.

use feedback_common::config::StorageConfig;
use feedback_common::{open_store, FeedbackRecord, FeedbackStore, StorageBackend};
use std::sync::Arc;
use tempfile::TempDir;

/// Test helper: open a fresh store of the given backend in a temp dir
async fn fresh_store(backend: StorageBackend) -> (Arc<dyn FeedbackStore>, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = StorageConfig {
        backend,
        csv_path: dir.path().join("data").join("feedback.csv"),
        db_path: dir.path().join("data").join("feedback.db"),
    };
    let store = open_store(&config).await.expect("Failed to open store");
    (store, dir)
}

const BACKENDS: [StorageBackend; 2] = [StorageBackend::Csv, StorageBackend::Sqlite];

#[tokio::test]
async fn test_list_all_empty_on_first_use() {
    for backend in BACKENDS {
        let (store, _dir) = fresh_store(backend).await;
        let records = store.list_all().await.unwrap();
        assert!(records.is_empty(), "{} store should start empty", backend);
    }
}

#[tokio::test]
async fn test_append_preserves_insertion_order() {
    for backend in BACKENDS {
        let (store, _dir) = fresh_store(backend).await;

        for (rating, review) in [(5, "Loved it"), (1, "Never again"), (3, "Fine")] {
            store
                .append(&FeedbackRecord::new(rating, review, "r", "s", "a"))
                .await
                .unwrap();
        }

        let reviews: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.review)
            .collect();
        assert_eq!(reviews, vec!["Loved it", "Never again", "Fine"], "backend {}", backend);
    }
}

#[tokio::test]
async fn test_delimiter_characters_round_trip() {
    let tricky = "Great food, \"friendly\" staff,\nbut the wait\r\nwas long; 10/10?";

    for backend in BACKENDS {
        let (store, _dir) = fresh_store(backend).await;
        let record = FeedbackRecord::new(4, tricky, "Thanks, \"really\"", "Mixed,\nvisit", "Staff more");
        store.append(&record).await.unwrap();

        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].review, tricky, "backend {}", backend);
        assert_eq!(records[0].ai_response, "Thanks, \"really\"");
        assert_eq!(records[0].ai_summary, "Mixed,\nvisit");
    }
}

#[tokio::test]
async fn test_all_fields_persisted() {
    for backend in BACKENDS {
        let (store, _dir) = fresh_store(backend).await;
        let record = FeedbackRecord::new(-2, "out of range rating", "resp", "summ", "act");
        store.append(&record).await.unwrap();

        let stored = store.list_all().await.unwrap().remove(0);
        assert_eq!(stored.rating, -2);
        assert_eq!(stored.ai_response, "resp");
        assert_eq!(stored.ai_summary, "summ");
        assert_eq!(stored.ai_action, "act");
        assert_eq!(
            stored.timestamp.timestamp_micros(),
            record.timestamp.timestamp_micros(),
            "backend {}",
            backend
        );
    }
}

#[tokio::test]
async fn test_backend_names() {
    for backend in BACKENDS {
        let (store, _dir) = fresh_store(backend).await;
        assert_eq!(store.backend_name(), backend.as_str());
    }
}

#[tokio::test]
async fn test_csv_file_has_fixed_header() {
    let (store, dir) = fresh_store(StorageBackend::Csv).await;
    store
        .append(&FeedbackRecord::new(5, "Great service!", "Thanks!", "Happy customer", "None needed"))
        .await
        .unwrap();

    let contents = std::fs::read_to_string(dir.path().join("data").join("feedback.csv")).unwrap();
    let header = contents.lines().next().unwrap();
    assert_eq!(header, "timestamp,rating,review,ai_response,ai_summary,ai_action");
}

#[tokio::test]
async fn test_csv_unwritable_location_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the parent directory should be
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let config = StorageConfig {
        backend: StorageBackend::Csv,
        csv_path: blocker.join("feedback.csv"),
        db_path: dir.path().join("unused.db"),
    };
    let store = open_store(&config).await.unwrap();

    let result = store
        .append(&FeedbackRecord::new(3, "x", "y", "z", "w"))
        .await;
    assert!(result.is_err());
}
