//! Per-note mutual exclusion.
//!
//! A transition reads a note, runs the state machine and writes the result.
//! Holding a [`NoteGuard`] across those steps keeps two requests for the same
//! id from interleaving, while requests for different ids proceed in parallel.
//! Slots are created on demand and removed when the last holder or waiter is
//! gone.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slot = Arc<AsyncMutex<()>>;

/// Registry of per-id async mutexes.
#[derive(Debug, Clone, Default)]
pub struct NoteLocks {
    slots: Arc<Mutex<HashMap<String, Slot>>>,
}

impl NoteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`.
    pub async fn acquire(&self, id: &str) -> NoteGuard {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.entry(id.to_string()).or_default().clone()
        };
        let guard = slot.clone().lock_owned().await;
        NoteGuard {
            id: id.to_string(),
            slots: self.slots.clone(),
            slot,
            guard: Some(guard),
        }
    }

    /// Number of ids with a live holder or waiter.
    pub fn active(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Exclusive access to one note id; released on drop.
#[derive(Debug)]
pub struct NoteGuard {
    id: String,
    slots: Arc<Mutex<HashMap<String, Slot>>>,
    slot: Slot,
    guard: Option<OwnedMutexGuard<()>>,
}

impl NoteGuard {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for NoteGuard {
    fn drop(&mut self) {
        self.guard.take();
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map and ours: nobody else is waiting.
        if Arc::strong_count(&self.slot) == 2 {
            slots.remove(&self.id);
        }
    }
}
