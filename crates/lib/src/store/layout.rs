//! The persisted document shared by every store backend.
//!
//! ```json
//! { "leetcodeNotes": { "note_1": { ... } }, "noteCounter": 1 }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::StoreError;
use crate::{constants::NOTE_ID_PREFIX, note::NoteRecord};

/// The current persistence format version.
/// v0 is the layout the extension itself writes, so it is never emitted.
const PERSISTENCE_VERSION: u8 = 0;

fn is_v0(v: &u8) -> bool {
    *v == 0
}

fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// All notes plus the id counter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct NoteMap {
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    #[serde(rename = "leetcodeNotes", default)]
    pub(crate) notes: HashMap<String, NoteRecord>,
    #[serde(rename = "noteCounter", default)]
    pub(crate) counter: u64,
}

impl NoteMap {
    pub(crate) fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|source| StoreError::DeserializationFailed { source })
    }

    pub(crate) fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|source| StoreError::SerializationFailed { source })
    }

    /// Advance the counter and return the next unused `note_<n>` id.
    ///
    /// Ids already present (e.g. written by an older counter) are skipped.
    pub(crate) fn mint_id(&mut self) -> Result<String, StoreError> {
        loop {
            self.counter = self
                .counter
                .checked_add(1)
                .ok_or(StoreError::CounterExhausted)?;
            let id = format!("{NOTE_ID_PREFIX}{}", self.counter);
            if !self.notes.contains_key(&id) {
                return Ok(id);
            }
        }
    }

    /// Notes matching `filter`, ordered by `createdAt` then id.
    pub(crate) fn sorted<F>(&self, filter: F) -> Vec<NoteRecord>
    where
        F: Fn(&NoteRecord) -> bool,
    {
        let mut notes: Vec<NoteRecord> = self.notes.values().filter(|n| filter(n)).cloned().collect();
        sort_notes(&mut notes);
        notes
    }
}

/// Order notes by `createdAt` (missing first), then by id.
pub(crate) fn sort_notes(notes: &mut [NoteRecord]) {
    notes.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id().cmp(b.id()))
    });
}
