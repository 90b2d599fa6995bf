//! Note storage
//!
//! The [`NoteStore`] trait is the only way the service touches persisted
//! notes. Two implementations are provided:
//!
//! - [`InMemory`]: maps behind a tokio `RwLock`, with optional JSON snapshots
//! - [`JsonFile`]: the same map committed to a file on every mutation
//!
//! Both persist the document layout the extension uses
//! (`{"leetcodeNotes": {...}, "noteCounter": n}`), so a file written by one can
//! be opened by the other.

use std::any::Any;

use async_trait::async_trait;

use crate::{Result, note::NoteRecord};

mod errors;
pub mod in_memory;
pub mod json_file;
mod layout;

pub use errors::StoreError;
pub use in_memory::InMemory;
pub use json_file::JsonFile;

/// Persisted mapping from note id to [`NoteRecord`].
///
/// Each call is atomic with respect to other calls on the same store.
/// Read-modify-write sequences spanning several calls are the caller's
/// responsibility; the service serializes them per note id.
#[async_trait]
pub trait NoteStore: Send + Sync + Any {
    /// Fetch a note by id.
    async fn get(&self, id: &str) -> Result<Option<NoteRecord>>;

    /// Insert or replace a note, keyed by its id.
    async fn put(&self, record: NoteRecord) -> Result<()>;

    /// Remove a note. Returns whether a note was removed.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// All notes, ordered by `createdAt` then id.
    async fn list_all(&self) -> Result<Vec<NoteRecord>>;

    /// Notes belonging to one problem page, in the same order as [`list_all`](Self::list_all).
    async fn list_by_problem(&self, problem_url: &str) -> Result<Vec<NoteRecord>> {
        let mut notes = self.list_all().await?;
        notes.retain(|note| note.problem_url() == problem_url);
        Ok(notes)
    }

    /// Number of stored notes.
    async fn count(&self) -> Result<usize> {
        Ok(self.list_all().await?.len())
    }

    /// Advance the persisted counter and return a fresh `note_<n>` id.
    async fn next_id(&self) -> Result<String>;

    /// Returns a reference to the store as a dynamic `Any` type.
    ///
    /// This allows for downcasting to a concrete store, e.g. to snapshot an
    /// [`InMemory`] store on shutdown.
    fn as_any(&self) -> &dyn Any;
}
