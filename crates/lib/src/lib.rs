//!
//! Notelock: password-locked sticky notes for coding-practice problem pages.
//! This library provides the storage and security core behind the browser extension.
//!
//! ## Core Concepts
//!
//! * **Notes (`note::NoteRecord`)**: One sticky note, keyed by `note_<n>` and owned by a problem URL.
//!   Its body is either plaintext content or a locked body holding ciphertext plus a password verifier.
//! * **Lock transitions (`note::lock`)**: Lock, unlock, locked-metadata updates and the generic save, each
//!   producing a new record without touching the original.
//! * **Crypto (`crypto`)**: PBKDF2-HMAC-SHA256 key derivation, AES-256-GCM content encryption and
//!   constant-time password verification, with independent salts for key and verifier.
//! * **Stores (`store::NoteStore`)**: A pluggable persisted map of notes, in memory or in a JSON file.
//! * **Service (`service::NoteService`)**: The message API the extension calls
//!   (`saveNote`, `loadNotes`, `deleteNote`, `getAllNotes`, `unlockNote`), serialized per note id.

pub mod clock;
pub mod constants;
pub mod crypto;
pub mod note;
pub mod service;
pub mod store;

pub use clock::{Clock, SystemClock};

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;

/// Result type used throughout the Notelock library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Notelock library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured cryptographic errors from the crypto module
    #[error(transparent)]
    Crypto(crypto::CryptoError),

    /// Structured note and lock-state errors from the note module
    #[error(transparent)]
    Note(note::NoteError),

    /// Structured persistence errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// A blocking crypto task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Crypto(_) => "crypto",
            Error::Note(_) => "note",
            Error::Store(_) => "store",
            Error::Task(_) => "task",
        }
    }

    /// Check if this error indicates the note was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Note(note_err) => note_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is a rejected password.
    pub fn is_wrong_password(&self) -> bool {
        match self {
            Error::Note(note_err) => note_err.is_wrong_password(),
            _ => false,
        }
    }

    /// Check if an unlock was requested for a note that is not locked.
    pub fn is_not_locked(&self) -> bool {
        matches!(self, Error::Note(note::NoteError::NotLocked { .. }))
    }

    /// Check if this error comes from a ciphertext that would not decrypt.
    pub fn is_decryption_error(&self) -> bool {
        match self {
            Error::Crypto(crypto_err) => crypto_err.is_decryption_error(),
            Error::Note(note_err) => note_err.is_corruption(),
            _ => false,
        }
    }

    /// Check if this error is persistence-related.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_io_error(),
            _ => false,
        }
    }

    /// Check if this error is caused by invalid caller input.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Note(note_err) => note_err.is_validation_error(),
            _ => false,
        }
    }
}
