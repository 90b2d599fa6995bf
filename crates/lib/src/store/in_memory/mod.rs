//! In-memory note store
//!
//! Suitable for tests, development, or a server that snapshots its state
//! itself (see [`InMemory::save_to_file`]).

mod persistence;

use std::{any::Any, path::Path};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{NoteStore, layout::NoteMap};
use crate::{Result, note::NoteRecord};

/// A note store holding everything in a single map.
///
/// Notes only reach disk when [`save_to_file`](Self::save_to_file) is called.
#[derive(Debug, Default)]
pub struct InMemory {
    pub(crate) map: RwLock<NoteMap>,
}

impl InMemory {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves all notes and the id counter to `path` as JSON.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persistence::save_to_file(self, path).await
    }

    /// Loads a store from a JSON file.
    ///
    /// If the file does not exist, a new, empty store is returned.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        persistence::load_from_file(path).await
    }
}

#[async_trait]
impl NoteStore for InMemory {
    async fn get(&self, id: &str) -> Result<Option<NoteRecord>> {
        Ok(self.map.read().await.notes.get(id).cloned())
    }

    async fn put(&self, record: NoteRecord) -> Result<()> {
        let mut map = self.map.write().await;
        map.notes.insert(record.id().to_string(), record);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.map.write().await.notes.remove(id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<NoteRecord>> {
        Ok(self.map.read().await.sorted(|_| true))
    }

    async fn list_by_problem(&self, problem_url: &str) -> Result<Vec<NoteRecord>> {
        Ok(self
            .map
            .read()
            .await
            .sorted(|note| note.problem_url() == problem_url))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.map.read().await.notes.len())
    }

    async fn next_id(&self) -> Result<String> {
        Ok(self.map.write().await.mint_id()?)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
