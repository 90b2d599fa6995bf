//! The loosely-typed note shape exchanged with the extension UI.
//!
//! The UI sends whatever subset of fields it knows about, so every field is
//! optional. The same shape is the JSON form of a stored [`NoteRecord`]; see
//! `record.rs` for the checked conversion.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::record::NoteRecord;

/// Pixel offset of a note widget on the page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(deserialize_with = "coordinate")]
    pub x: f64,
    #[serde(deserialize_with = "coordinate")]
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// `parseInt` on an unset style yields NaN, which the UI serializes as `null`.
fn coordinate<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// A partial note as sent in a `saveNote` message.
///
/// `password` is only ever read on the way in; it is never stored and never
/// part of a serialized [`NoteRecord`].
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimized: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_salt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// UI fields this crate does not interpret, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NoteUpdate {
    /// A password-bearing update requests a lock.
    pub fn requests_lock(&self) -> bool {
        self.password.is_some()
    }

    /// Whether the payload carries any of the locked-state fields.
    pub fn carries_locked_fields(&self) -> bool {
        self.encrypted_content.is_some()
            || self.password_hash.is_some()
            || self.password_salt.is_some()
    }

    /// Apply only the fields a locked note may change.
    ///
    /// Returns `true` if the update also tried to change the content.
    pub(crate) fn apply_locked_metadata(&self, record: &mut NoteRecord) -> bool {
        if let Some(title) = &self.title {
            record.title = Some(title.clone());
        }
        if let Some(position) = self.position {
            record.position = Some(position);
        }
        if let Some(minimized) = self.minimized {
            record.minimized = minimized;
        }
        if let Some(hidden) = self.hidden {
            record.hidden = hidden;
        }
        if let Some(last_modified) = &self.last_modified {
            record.last_modified = Some(last_modified.clone());
        }
        self.content.is_some()
    }

    /// Apply every presentation field. `id` and `problemUrl` are immutable and
    /// the security fields are handled by the lock transitions.
    pub(crate) fn apply_metadata(&self, record: &mut NoteRecord) {
        self.apply_locked_metadata(record);
        if let Some(problem_title) = &self.problem_title {
            record.problem_title = Some(problem_title.clone());
        }
        if let Some(created_at) = &self.created_at {
            record.created_at = Some(created_at.clone());
        }
        for (key, value) in &self.extra {
            record.extra.insert(key.clone(), value.clone());
        }
    }
}

impl fmt::Debug for NoteUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteUpdate")
            .field("id", &self.id)
            .field("problem_url", &self.problem_url)
            .field("title", &self.title)
            .field("position", &self.position)
            .field("minimized", &self.minimized)
            .field("hidden", &self.hidden)
            .field("content", &self.content.as_ref().map(|c| c.len()))
            .field("is_locked", &self.is_locked)
            .field("carries_locked_fields", &self.carries_locked_fields())
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}
