use std::collections::HashSet;

use notelock::{
    note::{NoteUpdate, Position},
    service::{Request, ServiceHandle},
};

use crate::helpers::{TWO_SUM, edit, new_note, test_service};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_keep_lock() {
    let (service, _clock, _store) = test_service().await;
    let mut note = new_note(TWO_SUM, "guarded");
    note.password = Some("pw".to_string());
    let locked = service.save_note(note).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..16 {
        let service = service.clone();
        let id = locked.id().to_string();
        tasks.push(tokio::spawn(async move {
            service
                .save_note(NoteUpdate {
                    position: Some(Position::new(i as f64, i as f64)),
                    content: Some(format!("overwrite {i}")),
                    ..edit(&id)
                })
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stored = service.store().get(locked.id()).await.unwrap().unwrap();
    assert!(stored.is_locked());
    assert_eq!(stored.locked(), locked.locked());
    assert_eq!(service.unlock_note(locked.id(), "pw").await.unwrap(), "guarded");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unlock_races_with_metadata_saves() {
    let (service, _clock, _store) = test_service().await;
    let mut note = new_note(TWO_SUM, "race");
    note.password = Some("pw".to_string());
    let locked = service.save_note(note).await.unwrap();
    let id = locked.id().to_string();

    let unlock = {
        let service = service.clone();
        let id = id.clone();
        tokio::spawn(async move { service.unlock_note(&id, "pw").await })
    };
    let save = {
        let service = service.clone();
        let id = id.clone();
        tokio::spawn(async move {
            service
                .save_note(NoteUpdate {
                    hidden: Some(true),
                    ..edit(&id)
                })
                .await
        })
    };

    assert_eq!(unlock.await.unwrap().unwrap(), "race");
    save.await.unwrap().unwrap();

    // Whichever ran second saw the other's result; the note ends unlocked and hidden.
    let stored = service.store().get(&id).await.unwrap().unwrap();
    assert!(!stored.is_locked());
    assert_eq!(stored.content(), Some("race"));
    assert!(stored.hidden);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_actor_mints_unique_ids() {
    let (service, _clock, _store) = test_service().await;
    let handle = ServiceHandle::spawn(service);

    let mut tasks = Vec::new();
    for i in 0..20 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move {
            handle
                .send(Request::SaveNote {
                    note: new_note(TWO_SUM, &format!("note {i}")),
                })
                .await
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        let response = task.await.unwrap().unwrap();
        assert!(response.success);
        ids.insert(response.note.unwrap().id().to_string());
    }
    assert_eq!(ids.len(), 20);

    let all = handle.send(Request::GetAllNotes).await.unwrap();
    assert_eq!(all.notes.unwrap().len(), 20);
    handle.shutdown().await;
}
