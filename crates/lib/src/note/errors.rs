//! Error types for note records and lock transitions.
//!
//! The `Display` text of each variant is what the extension shows the user,
//! so the messages stay short and free of identifiers where the UI already
//! knows them.

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NoteError {
    /// No note with the requested id exists.
    #[error("Note not found")]
    NotFound { id: String },

    /// Unlock was requested for a note that is not locked.
    #[error("Note is not locked")]
    NotLocked { id: String },

    /// Lock (or a password-bearing save) was requested for a locked note.
    #[error("Note is already locked")]
    AlreadyLocked { id: String },

    /// The supplied password does not match the stored verification hash.
    #[error("Incorrect password")]
    WrongPassword { id: String },

    /// A lock was requested with an empty or whitespace-only password.
    #[error("Password must not be empty")]
    EmptyPassword,

    /// The password verified but the stored blob would not decrypt.
    #[error("Stored note data is corrupted")]
    Corrupted { id: String, reason: String },

    /// A new note was saved without a field it cannot exist without.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// A record's JSON form breaks the locked/unlocked field invariants.
    #[error("Invalid note record: {reason}")]
    InvalidRecord { reason: String },
}

impl NoteError {
    /// Check if this error indicates the note was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NoteError::NotFound { .. })
    }

    /// Check if this error is a rejected password.
    pub fn is_wrong_password(&self) -> bool {
        matches!(self, NoteError::WrongPassword { .. })
    }

    /// Check if this error stems from the note's lock state.
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            NoteError::NotLocked { .. } | NoteError::AlreadyLocked { .. }
        )
    }

    /// Check if this error indicates unrecoverable stored data.
    pub fn is_corruption(&self) -> bool {
        matches!(self, NoteError::Corrupted { .. })
    }

    /// Check if this error is caused by the caller's input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            NoteError::EmptyPassword
                | NoteError::MissingField { .. }
                | NoteError::InvalidRecord { .. }
        )
    }

    /// The note id this error refers to, if any.
    pub fn note_id(&self) -> Option<&str> {
        match self {
            NoteError::NotFound { id }
            | NoteError::NotLocked { id }
            | NoteError::AlreadyLocked { id }
            | NoteError::WrongPassword { id }
            | NoteError::Corrupted { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl From<NoteError> for crate::Error {
    fn from(err: NoteError) -> Self {
        crate::Error::Note(err)
    }
}
