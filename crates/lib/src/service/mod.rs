//! The note message API.
//!
//! [`NoteService`] answers the five UI actions against a [`NoteStore`].
//! Mutations on one note id are serialized through [`NoteLocks`], and each
//! transition runs together with its write while the guard is held, so a
//! caller never observes a half-applied lock or unlock. PBKDF2 and AES work
//! is moved to the blocking pool.
//!
//! ```
//! # use std::sync::Arc;
//! # use notelock::{service::{NoteService, Request}, store::InMemory, note::NoteUpdate};
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = NoteService::new(Arc::new(InMemory::new()));
//! let response = service
//!     .handle(Request::SaveNote {
//!         note: NoteUpdate {
//!             problem_url: Some("https://leetcode.com/problems/two-sum/".into()),
//!             content: Some("hash map".into()),
//!             ..Default::default()
//!         },
//!     })
//!     .await;
//! assert!(response.success);
//! # }
//! ```

use std::sync::Arc;

use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::{
    Clock, Error, Result, SystemClock,
    note::{NoteError, NoteRecord, NoteUpdate, lock},
    store::NoteStore,
};

pub mod actor;
mod locks;
mod protocol;

pub use actor::ServiceHandle;
pub use locks::{NoteGuard, NoteLocks};
pub use protocol::{Request, Response};

/// Run CPU-heavy crypto work off the async executor.
async fn blocking<F, T>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

/// The storage-owning side of the message API.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
    clock: Arc<dyn Clock>,
    locks: NoteLocks,
}

impl std::fmt::Debug for NoteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteService")
            .field("clock", &self.clock)
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

impl NoteService {
    /// Create a service stamping wall-clock time.
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn NoteStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            locks: NoteLocks::new(),
        }
    }

    pub fn store(&self) -> &Arc<dyn NoteStore> {
        &self.store
    }

    /// Answer one UI message. Errors become `{success: false, error}`.
    pub async fn handle(&self, request: Request) -> Response {
        let action = request.action();
        let result = async {
            match request {
                Request::SaveNote { note } => self.save_note(note).await.map(Response::with_note),
                Request::LoadNotes { problem_url } => {
                    self.load_notes(&problem_url).await.map(Response::with_notes)
                }
                Request::DeleteNote { note_id } => {
                    self.delete_note(&note_id).await.map(|_| Response::ok())
                }
                Request::GetAllNotes => self.get_all_notes().await.map(Response::with_notes),
                Request::UnlockNote { note_id, password } => self
                    .unlock_note(&note_id, &password)
                    .await
                    .map(Response::with_content),
            }
        }
        .instrument(info_span!("handle", action))
        .await;

        result.unwrap_or_else(|e| {
            log_failure(action, &e);
            Response::failure(e)
        })
    }

    /// Create or update a note, locking it if the update carries a password.
    ///
    /// A note without an id, or with an empty one, gets a freshly minted `note_<n>`.
    pub async fn save_note(&self, update: NoteUpdate) -> Result<NoteRecord> {
        let id = match update.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => self.store.next_id().await?,
        };

        let _guard = self.locks.acquire(&id).await;
        let existing = self.store.get(&id).await?;
        let created = existing.is_none();

        let record = {
            let id = id.clone();
            let clock = self.clock.clone();
            blocking(move || lock::save(existing.as_ref(), &id, &update, clock.as_ref())).await?
        };
        self.store.put(record.clone()).await?;

        if created {
            info!(note_id = %id, locked = record.is_locked(), "Note created");
        } else {
            debug!(note_id = %id, locked = record.is_locked(), "Note saved");
        }
        Ok(record)
    }

    /// Notes for one problem page.
    pub async fn load_notes(&self, problem_url: &str) -> Result<Vec<NoteRecord>> {
        self.store.list_by_problem(problem_url).await
    }

    /// Delete a note. Returns whether it existed; unknown ids are not an error.
    pub async fn delete_note(&self, id: &str) -> Result<bool> {
        let _guard = self.locks.acquire(id).await;
        let removed = self.store.delete(id).await?;
        if removed {
            info!(note_id = %id, "Note deleted");
        } else {
            debug!(note_id = %id, "Delete of unknown note ignored");
        }
        Ok(removed)
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteRecord>> {
        self.store.list_all().await
    }

    /// Unlock a note and return its plaintext.
    ///
    /// The unlocked record is persisted before the content is returned. On a
    /// wrong password nothing is written.
    pub async fn unlock_note(&self, id: &str, password: &str) -> Result<String> {
        let _guard = self.locks.acquire(id).await;
        let record = self.require(id).await?;

        let (unlocked, content) = {
            let password = password.to_string();
            let clock = self.clock.clone();
            blocking(move || lock::unlock(&record, &password, clock.as_ref())).await?
        };
        self.store.put(unlocked).await?;

        info!(note_id = %id, "Note unlocked");
        Ok(content)
    }

    /// Lock an existing unlocked note.
    pub async fn lock_note(&self, id: &str, password: &str) -> Result<NoteRecord> {
        let _guard = self.locks.acquire(id).await;
        let record = self.require(id).await?;

        let locked = {
            let password = password.to_string();
            let clock = self.clock.clone();
            blocking(move || lock::lock(&record, &password, clock.as_ref())).await?
        };
        self.store.put(locked.clone()).await?;

        info!(note_id = %id, "Note locked");
        Ok(locked)
    }

    async fn require(&self, id: &str) -> Result<NoteRecord> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| NoteError::NotFound { id: id.to_string() }.into())
    }
}

fn log_failure(action: &str, err: &Error) {
    match err {
        Error::Note(note) if note.is_corruption() => {
            error!(action, "Stored note failed to decrypt: {err}")
        }
        Error::Note(_) => warn!(action, "Request rejected: {err}"),
        _ => error!(action, "Request failed: {err}"),
    }
}
