use std::sync::Arc;

use notelock::{
    FixedClock,
    note::{NoteUpdate, Position},
    service::NoteService,
    store::{InMemory, JsonFile, NoteStore},
};
use tempfile::TempDir;

pub const TWO_SUM: &str = "https://leetcode.com/problems/two-sum/";
pub const THREE_SUM: &str = "https://leetcode.com/problems/3sum/";

/// A store plus whatever must outlive it.
pub struct TestStore {
    pub store: Arc<dyn NoteStore>,
    // Keeps the JSON file's directory alive for the test's duration
    _dir: Option<TempDir>,
}

/// Creates a test store based on TEST_BACKEND env var.
///
/// Supported values:
/// - "inmemory" or unset: InMemory store (default)
/// - "json": JsonFile store in a fresh temp directory
///
/// # Example
/// ```bash
/// TEST_BACKEND=json cargo test
/// ```
pub async fn test_store() -> TestStore {
    match std::env::var("TEST_BACKEND").as_deref() {
        Ok("json") => json_store().await,
        Ok("inmemory") | Ok("") | Err(_) => TestStore {
            store: Arc::new(InMemory::new()),
            _dir: None,
        },
        Ok(other) => panic!("Unknown TEST_BACKEND value: {other}. Supported: inmemory, json"),
    }
}

/// A JsonFile store regardless of TEST_BACKEND.
pub async fn json_store() -> TestStore {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = JsonFile::open(dir.path().join("notelock.json"))
        .await
        .expect("Failed to open JSON store");
    TestStore {
        store: Arc::new(store),
        _dir: Some(dir),
    }
}

/// Both store implementations, for tests that must hold for each.
pub async fn all_stores() -> Vec<(&'static str, TestStore)> {
    vec![
        (
            "inmemory",
            TestStore {
                store: Arc::new(InMemory::new()),
                _dir: None,
            },
        ),
        ("json", json_store().await),
    ]
}

/// A service over the TEST_BACKEND store, with a pinned clock.
///
/// Returns the clock so tests can advance it.
pub async fn test_service() -> (NoteService, Arc<FixedClock>, TestStore) {
    let test_store = test_store().await;
    let clock = Arc::new(FixedClock::default());
    let service = NoteService::with_clock(test_store.store.clone(), clock.clone());
    (service, clock, test_store)
}

/// A fresh UI note for `problem_url`.
pub fn new_note(problem_url: &str, content: &str) -> NoteUpdate {
    NoteUpdate {
        problem_url: Some(problem_url.to_string()),
        problem_title: Some("Two Sum".to_string()),
        title: Some("Approach".to_string()),
        content: Some(content.to_string()),
        position: Some(Position::new(100.0, 100.0)),
        minimized: Some(false),
        hidden: Some(false),
        created_at: Some("2024-01-01T00:00:00.000Z".to_string()),
        ..Default::default()
    }
}

/// An update for an existing note id.
pub fn edit(id: &str) -> NoteUpdate {
    NoteUpdate {
        id: Some(id.to_string()),
        ..Default::default()
    }
}
