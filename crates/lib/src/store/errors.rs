//! Error types for note storage.
//!
//! These cover persistence failures only. Lookups of missing notes are not an
//! error at this layer: [`NoteStore::get`](super::NoteStore::get) returns `None`
//! and the service decides whether that is a `NotFound`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the note store.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Serialization of the note map failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// The persisted document could not be parsed.
    #[error("Deserialization failed")]
    DeserializationFailed {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The store file could not be committed; the previous contents remain.
    #[error("Failed to write note store {}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The id counter cannot be advanced any further.
    #[error("Note id counter exhausted")]
    CounterExhausted,
}

impl StoreError {
    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            StoreError::FileIo { .. } | StoreError::WriteFailed { .. }
        )
    }

    /// Check if this error is related to the JSON encoding of the store.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            StoreError::SerializationFailed { .. } | StoreError::DeserializationFailed { .. }
        )
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
