//! Persistence operations for the InMemory store
//!
//! Serializes the whole note map to a JSON file and back.

use std::path::Path;

use tokio::sync::RwLock;

use super::InMemory;
use crate::{
    Result,
    store::{errors::StoreError, layout::NoteMap},
};

/// Saves the store to `path` as JSON.
pub(crate) async fn save_to_file<P: AsRef<Path>>(store: &InMemory, path: P) -> Result<()> {
    // Serialize under the read lock so the snapshot is consistent.
    let json = store.map.read().await.to_json()?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| StoreError::FileIo { source }.into())
}

/// Loads a store from `path`.
///
/// If the file does not exist, a new, empty `InMemory` store is returned.
pub(crate) async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<InMemory> {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => Ok(InMemory {
            map: RwLock::new(NoteMap::from_json(&json)?),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(InMemory::new()),
        Err(source) => Err(StoreError::FileIo { source }.into()),
    }
}
