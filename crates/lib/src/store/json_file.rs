//! File-backed note store
//!
//! The whole note map is rewritten on every mutation. Each write goes to a
//! sibling temp file which is then renamed over the store file, so the file on
//! disk is always either the old or the new document. The in-memory map is
//! only replaced after the rename succeeds.

use std::{
    any::Any,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{NoteStore, errors::StoreError, layout::NoteMap};
use crate::{Result, note::NoteRecord};

/// A note store persisted to a single JSON file.
#[derive(Debug)]
pub struct JsonFile {
    path: PathBuf,
    map: RwLock<NoteMap>,
}

impl JsonFile {
    /// Opens the store at `path`, creating parent directories as needed.
    ///
    /// A missing file is an empty store; the file is first written on the
    /// first mutation.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::FileIo { source })?;
        }

        let map = match tokio::fs::read_to_string(&path).await {
            Ok(json) => NoteMap::from_json(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => NoteMap::default(),
            Err(source) => return Err(StoreError::FileIo { source }.into()),
        };

        debug!(path = %path.display(), notes = map.notes.len(), "Opened note store");
        Ok(Self {
            path,
            map: RwLock::new(map),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write `next` to disk and, only on success, make it the live map.
    async fn commit(&self, current: &mut NoteMap, next: NoteMap) -> Result<()> {
        let json = next.to_json()?;
        let temp = self.temp_path();

        let written = async {
            tokio::fs::write(&temp, json).await?;
            tokio::fs::rename(&temp, &self.path).await
        }
        .await;

        if let Err(source) = written {
            warn!(path = %self.path.display(), "Note store write failed, keeping previous state: {source}");
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StoreError::WriteFailed {
                path: self.path.clone(),
                source,
            }
            .into());
        }

        *current = next;
        Ok(())
    }
}

#[async_trait]
impl NoteStore for JsonFile {
    async fn get(&self, id: &str) -> Result<Option<NoteRecord>> {
        Ok(self.map.read().await.notes.get(id).cloned())
    }

    async fn put(&self, record: NoteRecord) -> Result<()> {
        let mut map = self.map.write().await;
        let mut next = map.clone();
        next.notes.insert(record.id().to_string(), record);
        self.commit(&mut map, next).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut map = self.map.write().await;
        if !map.notes.contains_key(id) {
            return Ok(false);
        }
        let mut next = map.clone();
        next.notes.remove(id);
        self.commit(&mut map, next).await?;
        Ok(true)
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
        let mut map = self.map.write().await;
        let mut next = map.clone();
        let id = next.mint_id()?;
        self.commit(&mut map, next).await?;
        Ok(id)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
