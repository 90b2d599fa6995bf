use notelock::{
    FixedClock,
    note::{NoteRecord, lock},
    store::{InMemory, JsonFile, NoteStore},
};

use crate::helpers::TWO_SUM;

#[tokio::test]
async fn test_in_memory_snapshot_opens_as_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notelock.json");

    let memory = InMemory::new();
    let id = memory.next_id().await.unwrap();
    let locked = lock::lock(
        &NoteRecord::new(&id, TWO_SUM, "shared"),
        "pw",
        &FixedClock::default(),
    )
    .unwrap();
    memory.put(locked.clone()).await.unwrap();
    memory.save_to_file(&path).await.unwrap();

    let file = JsonFile::open(&path).await.unwrap();
    assert_eq!(file.get(&id).await.unwrap(), Some(locked));
    assert_eq!(file.next_id().await.unwrap(), "note_2");
}

#[tokio::test]
async fn test_json_file_is_readable_by_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notelock.json");

    {
        let file = JsonFile::open(&path).await.unwrap();
        file.put(NoteRecord::new("note_1", TWO_SUM, "from file")).await.unwrap();
    }

    let memory = InMemory::load_from_file(&path).await.unwrap();
    let note = memory.get("note_1").await.unwrap().unwrap();
    assert_eq!(note.content(), Some("from file"));
}

#[tokio::test]
async fn test_json_file_write_failure_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested");
    let store = JsonFile::open(nested.join("notelock.json")).await.unwrap();
    store.put(NoteRecord::new("note_1", TWO_SUM, "v1")).await.unwrap();
    let counter_before = store.next_id().await.unwrap();

    std::fs::remove_dir_all(&nested).unwrap();

    let err = store.next_id().await.unwrap_err();
    assert!(err.is_storage_error());
    assert!(err.is_io_error());

    std::fs::create_dir_all(&nested).unwrap();
    // The failed mint did not advance the counter.
    let next = store.next_id().await.unwrap();
    assert_eq!(counter_before, "note_2");
    assert_eq!(next, "note_3");
    assert_eq!(
        store.get("note_1").await.unwrap().unwrap().content(),
        Some("v1")
    );
}

#[tokio::test]
async fn test_open_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notelock.json");
    std::fs::write(&path, "{\"leetcodeNotes\": 42}").unwrap();

    assert!(JsonFile::open(&path).await.is_err());
    assert!(InMemory::load_from_file(&path).await.is_err());
}
