//! Store creation and utility functions.

use std::{
    fs::OpenOptions,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use notelock::store::{InMemory, JsonFile, NoteStore};

use crate::cli::{Backend, StoreConfig};

/// File name of the persisted note document inside the data directory.
pub const STORE_FILE: &str = "notelock.json";

/// Path of the store file for this configuration.
pub fn store_path(config: &StoreConfig) -> PathBuf {
    config
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STORE_FILE)
}

/// Path of the claim file guarding the store file.
pub fn lock_path(config: &StoreConfig) -> PathBuf {
    let mut path = store_path(config).into_os_string();
    path.push(".lock");
    PathBuf::from(path)
}

/// Exclusive claim on a data directory for the one process allowed to write it.
///
/// Both stores keep the whole document in memory, so a second writer's changes
/// would be overwritten by the first one's next write or shutdown snapshot.
/// The claim is a file holding the owner's pid, created with `create_new` and
/// removed on drop. A killed owner leaves it behind; delete it by hand once that
/// process is gone.
#[derive(Debug)]
pub struct StoreClaim {
    path: PathBuf,
}

impl StoreClaim {
    pub fn acquire(config: &StoreConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let path = lock_path(config);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let owner = std::fs::read_to_string(&path).unwrap_or_default();
                return Err(format!(
                    "Note store {} is in use by process {} (remove {} if it is no longer running)",
                    store_path(config).display(),
                    owner.trim(),
                    path.display()
                )
                .into());
            }
            Err(e) => return Err(e.into()),
        };

        let claim = Self { path };
        writeln!(file, "{}", std::process::id())?;
        tracing::debug!("Claimed note store via {}", claim.path.display());
        Ok(claim)
    }
}

impl Drop for StoreClaim {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!("Failed to release {}: {e}", self.path.display());
        }
    }
}

/// Create the appropriate store based on configuration
pub async fn create_store(
    config: &StoreConfig,
) -> Result<Arc<dyn NoteStore>, Box<dyn std::error::Error>> {
    let path = store_path(config);

    match config.backend {
        Backend::Json => {
            tracing::info!("Using JSON file store at {}", path.display());
            Ok(Arc::new(JsonFile::open(&path).await?))
        }
        Backend::Inmemory => {
            tracing::info!(
                "Using in-memory store with persistence at {}",
                path.display()
            );
            // An unreadable snapshot is an error: starting empty would overwrite it on save.
            let store = InMemory::load_from_file(&path).await?;
            Ok(Arc::new(store))
        }
    }
}

/// Write an in-memory store back to its snapshot file. Other stores persist themselves.
pub async fn persist(
    store: &Arc<dyn NoteStore>,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(in_memory) = store.as_any().downcast_ref::<InMemory>() {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        in_memory.save_to_file(path).await?;
        tracing::info!("Notes saved to {}", path.display());
    }
    Ok(())
}
