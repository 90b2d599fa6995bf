//! The persisted note record.
//!
//! A note is either unlocked (plaintext `content`) or locked (ciphertext blob
//! plus verification hash and salt). [`NoteBody`] makes those two states
//! exclusive by construction. On the wire the record keeps the flat JSON
//! shape the extension expects, with `isLocked` mirroring the active variant;
//! a JSON record whose fields disagree with its lock flag is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    errors::NoteError,
    update::{NoteUpdate, Position},
};

/// Ciphertext and verification material of a locked note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedBody {
    /// Base64 blob `salt || iv || ciphertext || tag`
    pub encrypted_content: String,
    /// Lowercase hex PBKDF2 verification bits
    pub password_hash: String,
    /// Base64 verification salt, independent of the blob's salt
    pub password_salt: String,
}

/// The security-relevant half of a note.
#[derive(Clone, PartialEq, Eq)]
pub enum NoteBody {
    Unlocked { content: String },
    Locked(LockedBody),
}

impl NoteBody {
    pub fn is_locked(&self) -> bool {
        matches!(self, NoteBody::Locked(_))
    }
}

impl fmt::Debug for NoteBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteBody::Unlocked { content } => f
                .debug_struct("Unlocked")
                .field("content_len", &content.len())
                .finish(),
            NoteBody::Locked(locked) => f.debug_tuple("Locked").field(locked).finish(),
        }
    }
}

/// One persisted sticky note.
///
/// `id` and `problem_url` are fixed at creation. The body only changes through
/// the transitions in [`crate::note::lock`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NoteUpdate", into = "NoteUpdate")]
pub struct NoteRecord {
    id: String,
    problem_url: String,
    pub problem_title: Option<String>,
    pub title: Option<String>,
    pub position: Option<Position>,
    pub minimized: bool,
    pub hidden: bool,
    pub created_at: Option<String>,
    pub last_modified: Option<String>,
    /// UI fields this crate does not interpret.
    pub extra: Map<String, Value>,
    body: NoteBody,
}

impl NoteRecord {
    /// Create an unlocked note.
    pub fn new(
        id: impl Into<String>,
        problem_url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            problem_url: problem_url.into(),
            problem_title: None,
            title: None,
            position: None,
            minimized: false,
            hidden: false,
            created_at: None,
            last_modified: None,
            extra: Map::new(),
            body: NoteBody::Unlocked {
                content: content.into(),
            },
        }
    }

    /// Build a brand-new unlocked note from a UI save.
    ///
    /// Locked-state fields in the payload are dropped: a note only becomes
    /// locked through the lock transition.
    pub fn from_update(id: impl Into<String>, update: &NoteUpdate) -> Result<Self, NoteError> {
        let problem_url = update
            .problem_url
            .clone()
            .ok_or(NoteError::MissingField {
                field: "problemUrl",
            })?;

        let mut record = Self::new(id, problem_url, update.content.clone().unwrap_or_default());
        update.apply_metadata(&mut record);
        Ok(record)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn problem_url(&self) -> &str {
        &self.problem_url
    }

    pub fn body(&self) -> &NoteBody {
        &self.body
    }

    pub fn is_locked(&self) -> bool {
        self.body.is_locked()
    }

    /// Plaintext content, present only while unlocked.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            NoteBody::Unlocked { content } => Some(content),
            NoteBody::Locked(_) => None,
        }
    }

    /// Locked material, present only while locked.
    pub fn locked(&self) -> Option<&LockedBody> {
        match &self.body {
            NoteBody::Unlocked { .. } => None,
            NoteBody::Locked(locked) => Some(locked),
        }
    }

    pub(crate) fn set_body(&mut self, body: NoteBody) {
        self.body = body;
    }

    /// Replace plaintext content. Has no effect on a locked note.
    pub(crate) fn set_content(&mut self, new_content: String) -> bool {
        match &mut self.body {
            NoteBody::Unlocked { content } => {
                *content = new_content;
                true
            }
            NoteBody::Locked(_) => false,
        }
    }
}

/// Resolve the body from the flat fields, enforcing the lock invariants.
fn body_from_fields(
    content: Option<String>,
    encrypted_content: Option<String>,
    password_hash: Option<String>,
    password_salt: Option<String>,
    is_locked: Option<bool>,
) -> Result<NoteBody, NoteError> {
    let invalid = |reason: &str| NoteError::InvalidRecord {
        reason: reason.to_string(),
    };

    if content.is_some() && encrypted_content.is_some() {
        return Err(invalid("both content and encryptedContent are present"));
    }

    match (encrypted_content, password_hash, password_salt) {
        (Some(encrypted_content), Some(password_hash), Some(password_salt)) => {
            if is_locked == Some(false) {
                return Err(invalid("isLocked is false but locked fields are present"));
            }
            Ok(NoteBody::Locked(LockedBody {
                encrypted_content,
                password_hash,
                password_salt,
            }))
        }
        (None, None, None) => {
            if is_locked == Some(true) {
                return Err(invalid("isLocked is true but locked fields are missing"));
            }
            Ok(NoteBody::Unlocked {
                content: content.unwrap_or_default(),
            })
        }
        _ => Err(invalid(
            "encryptedContent, passwordHash and passwordSalt must appear together",
        )),
    }
}

impl TryFrom<NoteUpdate> for NoteRecord {
    type Error = NoteError;

    fn try_from(raw: NoteUpdate) -> Result<Self, Self::Error> {
        if raw.password.is_some() {
            return Err(NoteError::InvalidRecord {
                reason: "a stored note must not carry a password".to_string(),
            });
        }

        let id = raw.id.ok_or(NoteError::MissingField { field: "id" })?;
        let problem_url = raw.problem_url.ok_or(NoteError::MissingField {
            field: "problemUrl",
        })?;

        let body = body_from_fields(
            raw.content,
            raw.encrypted_content,
            raw.password_hash,
            raw.password_salt,
            raw.is_locked,
        )?;

        Ok(NoteRecord {
            id,
            problem_url,
            problem_title: raw.problem_title,
            title: raw.title,
            position: raw.position,
            minimized: raw.minimized.unwrap_or_default(),
            hidden: raw.hidden.unwrap_or_default(),
            created_at: raw.created_at,
            last_modified: raw.last_modified,
            extra: raw.extra,
            body,
        })
    }
}

impl From<NoteRecord> for NoteUpdate {
    fn from(record: NoteRecord) -> Self {
        let is_locked = record.is_locked();
        let mut raw = NoteUpdate {
            id: Some(record.id),
            problem_url: Some(record.problem_url),
            problem_title: record.problem_title,
            title: record.title,
            position: record.position,
            minimized: Some(record.minimized),
            hidden: Some(record.hidden),
            created_at: record.created_at,
            last_modified: record.last_modified,
            is_locked: Some(is_locked),
            extra: record.extra,
            ..Default::default()
        };

        match record.body {
            NoteBody::Unlocked { content } => raw.content = Some(content),
            NoteBody::Locked(locked) => {
                raw.encrypted_content = Some(locked.encrypted_content);
                raw.password_hash = Some(locked.password_hash);
                raw.password_salt = Some(locked.password_salt);
            }
        }
        raw
    }
}
