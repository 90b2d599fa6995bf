//! Message shapes exchanged with the extension UI.
//!
//! Requests are JSON objects tagged by `action`:
//!
//! ```json
//! {"action": "unlockNote", "noteId": "note_3", "password": "abc123"}
//! ```
//!
//! Every response carries `success`; the other fields depend on the action.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::note::{NoteRecord, NoteUpdate};

/// A UI request.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "action",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Request {
    /// Create or update a note. A `password` on the note locks it.
    SaveNote { note: NoteUpdate },
    /// Notes of one problem page.
    LoadNotes { problem_url: String },
    /// Remove a note. Unknown ids succeed.
    DeleteNote { note_id: String },
    /// Every stored note.
    GetAllNotes,
    /// Verify the password, decrypt and persist the note as unlocked.
    UnlockNote { note_id: String, password: String },
}

impl Request {
    /// The message's `action` tag.
    pub fn action(&self) -> &'static str {
        match self {
            Request::SaveNote { .. } => "saveNote",
            Request::LoadNotes { .. } => "loadNotes",
            Request::DeleteNote { .. } => "deleteNote",
            Request::GetAllNotes => "getAllNotes",
            Request::UnlockNote { .. } => "unlockNote",
        }
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::SaveNote { note } => f.debug_struct("SaveNote").field("note", note).finish(),
            Request::LoadNotes { problem_url } => f
                .debug_struct("LoadNotes")
                .field("problem_url", problem_url)
                .finish(),
            Request::DeleteNote { note_id } => f
                .debug_struct("DeleteNote")
                .field("note_id", note_id)
                .finish(),
            Request::GetAllNotes => f.write_str("GetAllNotes"),
            Request::UnlockNote { note_id, .. } => f
                .debug_struct("UnlockNote")
                .field("note_id", note_id)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Reply to a [`Request`].
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<NoteRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// Bare `{"success": true}`.
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn with_note(note: NoteRecord) -> Self {
        Self {
            note: Some(note),
            ..Self::ok()
        }
    }

    pub fn with_notes(notes: Vec<NoteRecord>) -> Self {
        Self {
            notes: Some(notes),
            ..Self::ok()
        }
    }

    pub fn with_content(content: String) -> Self {
        Self {
            content: Some(content),
            ..Self::ok()
        }
    }

    /// `{"success": false, "error": <message>}`.
    pub fn failure(error: impl fmt::Display) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("success", &self.success)
            .field("note", &self.note.as_ref().map(|n| n.id()))
            .field("notes", &self.notes.as_ref().map(Vec::len))
            .field("content", &self.content.as_ref().map(|_| "<redacted>"))
            .field("error", &self.error)
            .finish()
    }
}
