use notelock::{
    Clock, FixedClock,
    crypto::decrypt,
    note::{NoteRecord, NoteUpdate, Position, lock},
};

use crate::helpers::{TWO_SUM, new_note};

fn fresh(content: &str) -> NoteRecord {
    NoteRecord::from_update("note_1", &new_note(TWO_SUM, content)).unwrap()
}

#[test]
fn test_lock_unlock_scenario() {
    let clock = FixedClock::default();
    let note = fresh("two sum approach");

    let locked = lock::lock(&note, "abc123", &clock).unwrap();
    let body = locked.locked().unwrap();
    assert_eq!(decrypt(&body.encrypted_content, "abc123").unwrap(), "two sum approach");

    let err = lock::unlock(&locked, "wrong", &clock).unwrap_err();
    assert_eq!(err.to_string(), "Incorrect password");

    let (unlocked, content) = lock::unlock(&locked, "abc123", &clock).unwrap();
    assert_eq!(content, "two sum approach");
    assert!(!unlocked.is_locked());
    assert!(unlocked.locked().is_none());
}

#[test]
fn test_lock_preserves_metadata() {
    let clock = FixedClock::from_millis(1_710_000_000_000);
    let note = fresh("x");
    let locked = lock::lock(&note, "pw", &clock).unwrap();

    assert_eq!(locked.id(), note.id());
    assert_eq!(locked.problem_url(), note.problem_url());
    assert_eq!(locked.problem_title, note.problem_title);
    assert_eq!(locked.title, note.title);
    assert_eq!(locked.position, note.position);
    assert_eq!(locked.created_at, note.created_at);
    assert_eq!(locked.last_modified, Some(clock.now_iso()));
}

#[test]
fn test_locked_note_ignores_content_edit() {
    let clock = FixedClock::default();
    let locked = lock::lock(&fresh("secret"), "pw", &clock).unwrap();

    let update = NoteUpdate {
        content: Some("new text".to_string()),
        position: Some(Position::new(5.0, 5.0)),
        ..Default::default()
    };
    let saved = lock::save(Some(&locked), "note_1", &update, &clock).unwrap();

    assert_eq!(saved.position, Some(Position::new(5.0, 5.0)));
    assert_eq!(
        saved.locked().unwrap().encrypted_content,
        locked.locked().unwrap().encrypted_content
    );
    let (_, content) = lock::unlock(&saved, "pw", &clock).unwrap();
    assert_eq!(content, "secret");
}

#[test]
fn test_locked_note_accepts_whitelisted_fields() {
    let clock = FixedClock::default();
    let locked = lock::lock(&fresh("secret"), "pw", &clock).unwrap();

    let update = NoteUpdate {
        title: Some("Renamed".to_string()),
        minimized: Some(true),
        hidden: Some(true),
        problem_title: Some("Ignored".to_string()),
        created_at: Some("1999-01-01T00:00:00.000Z".to_string()),
        ..Default::default()
    };
    let saved = lock::update_locked(&locked, &update, &clock).unwrap();
    assert_eq!(saved.title.as_deref(), Some("Renamed"));
    assert!(saved.minimized);
    assert!(saved.hidden);
    assert_eq!(saved.problem_title, locked.problem_title);
    assert_eq!(saved.created_at, locked.created_at);
}

#[test]
fn test_unlock_then_relock_changes_every_secret() {
    let clock = FixedClock::default();
    let first = lock::lock(&fresh("same"), "pw", &clock).unwrap();
    let (unlocked, _) = lock::unlock(&first, "pw", &clock).unwrap();
    let second = lock::lock(&unlocked, "pw", &clock).unwrap();

    let (a, b) = (first.locked().unwrap(), second.locked().unwrap());
    assert_ne!(a.encrypted_content, b.encrypted_content);
    assert_ne!(a.password_salt, b.password_salt);
    assert_ne!(a.password_hash, b.password_hash);
}

#[test]
fn test_relock_with_new_password() {
    let clock = FixedClock::default();
    let locked = lock::lock(&fresh("rotate me"), "old", &clock).unwrap();
    let (unlocked, _) = lock::unlock(&locked, "old", &clock).unwrap();
    let relocked = lock::lock(&unlocked, "new", &clock).unwrap();

    assert!(lock::unlock(&relocked, "old", &clock).unwrap_err().is_wrong_password());
    assert_eq!(lock::unlock(&relocked, "new", &clock).unwrap().1, "rotate me");
}
