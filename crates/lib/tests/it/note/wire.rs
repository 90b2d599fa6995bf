use notelock::{
    FixedClock,
    note::{NoteRecord, lock},
};
use serde_json::{Value, json};

use crate::helpers::{TWO_SUM, new_note};

#[test]
fn test_locked_record_json_has_no_plaintext() {
    let clock = FixedClock::default();
    let note = NoteRecord::from_update("note_1", &new_note(TWO_SUM, "two sum approach")).unwrap();
    let locked = lock::lock(&note, "abc123", &clock).unwrap();

    let value = serde_json::to_value(&locked).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(value["isLocked"], true);
    assert!(!object.contains_key("content"));
    assert!(!object.contains_key("password"));
    assert!(!value.to_string().contains("two sum approach"));
    assert!(!value.to_string().contains("abc123"));

    let hash = value["passwordHash"].as_str().unwrap();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_locked_record_survives_json_round_trip() {
    let clock = FixedClock::default();
    let note = NoteRecord::from_update("note_1", &new_note(TWO_SUM, "persist me")).unwrap();
    let locked = lock::lock(&note, "pw", &clock).unwrap();

    let json = serde_json::to_string(&locked).unwrap();
    let back: NoteRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, locked);
    assert_eq!(lock::unlock(&back, "pw", &clock).unwrap().1, "persist me");
}

#[test]
fn test_record_written_by_extension() {
    let value: Value = json!({
        "id": "note_12",
        "title": "DP",
        "content": "bottom up",
        "position": {"x": 340, "y": null},
        "minimized": true,
        "hidden": false,
        "problemUrl": TWO_SUM,
        "problemTitle": "Two Sum",
        "createdAt": "2024-03-01T09:30:00.000Z",
        "lastModified": "2024-03-02T10:00:00.000Z",
        "isLocked": false
    });
    let record: NoteRecord = serde_json::from_value(value).unwrap();
    assert_eq!(record.id(), "note_12");
    assert_eq!(record.content(), Some("bottom up"));
    assert!(record.minimized);
    assert_eq!(record.position.unwrap().y, 0.0);
}
