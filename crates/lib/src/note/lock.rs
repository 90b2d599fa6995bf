//! Lock state machine for note records.
//!
//! Every transition takes the current record by reference and returns a new
//! one, so a failed transition leaves the caller's record untouched. All of
//! these functions run PBKDF2 and should be called off the async executor
//! (the service uses `spawn_blocking`).
//!
//! ```text
//!            lock(password)
//!  Unlocked ────────────────▶ Locked
//!     ▲                         │
//!     └──────── unlock ─────────┘
//!          (verify, then decrypt)
//! ```

use tracing::{debug, error, warn};

use super::{
    errors::NoteError,
    record::{LockedBody, NoteBody, NoteRecord},
    update::NoteUpdate,
};
use crate::{
    Clock, Result,
    crypto::{self, PasswordHash},
};

/// Lock an unlocked note under `password`.
///
/// The content is encrypted under its own salt inside the blob and the
/// verification hash is computed under a second, independent salt.
pub fn lock(record: &NoteRecord, password: &str, clock: &dyn Clock) -> Result<NoteRecord> {
    if password.trim().is_empty() {
        return Err(NoteError::EmptyPassword.into());
    }

    let content = record.content().ok_or_else(|| NoteError::AlreadyLocked {
        id: record.id().to_string(),
    })?;

    let encrypted_content = crypto::encrypt(content, password)?;
    let PasswordHash { hash, salt } = crypto::hash_password(password);

    let mut locked = record.clone();
    locked.set_body(NoteBody::Locked(LockedBody {
        encrypted_content,
        password_hash: hash,
        password_salt: salt,
    }));
    locked.last_modified = Some(clock.now_iso());

    debug!(note_id = record.id(), "Note locked");
    Ok(locked)
}

/// Unlock a locked note, returning the unlocked record and its plaintext.
///
/// The password is checked against the stored hash before decryption is
/// attempted. A blob that fails to decrypt after the password verified is
/// reported as corruption.
pub fn unlock(record: &NoteRecord, password: &str, clock: &dyn Clock) -> Result<(NoteRecord, String)> {
    let id = record.id().to_string();
    let locked = record
        .locked()
        .ok_or_else(|| NoteError::NotLocked { id: id.clone() })?;

    if !crypto::verify_password(password, &locked.password_hash, &locked.password_salt) {
        warn!(note_id = %id, "Unlock rejected: incorrect password");
        return Err(NoteError::WrongPassword { id }.into());
    }

    let content = match crypto::decrypt(&locked.encrypted_content, password) {
        Ok(content) => content,
        Err(e) => {
            error!(note_id = %id, "Password verified but content failed to decrypt: {e}");
            return Err(NoteError::Corrupted {
                id,
                reason: e.to_string(),
            }
            .into());
        }
    };

    let mut unlocked = record.clone();
    unlocked.set_body(NoteBody::Unlocked {
        content: content.clone(),
    });
    unlocked.last_modified = Some(clock.now_iso());

    debug!(note_id = record.id(), "Note unlocked");
    Ok((unlocked, content))
}

/// Apply a metadata-only update to a locked note.
///
/// Only `position`, `minimized`, `hidden`, `title` and `lastModified` are
/// taken from the update; the encrypted payload is carried over unchanged.
/// An empty title is kept as sent; the UI owns default titles.
pub fn update_locked(record: &NoteRecord, update: &NoteUpdate, clock: &dyn Clock) -> Result<NoteRecord> {
    if !record.is_locked() {
        return Err(NoteError::NotLocked {
            id: record.id().to_string(),
        }
        .into());
    }

    let mut updated = record.clone();
    if update.apply_locked_metadata(&mut updated) {
        debug!(note_id = record.id(), "Ignoring content change on locked note");
    }
    updated.last_modified = Some(clock.now_iso());
    Ok(updated)
}

/// Generic save: merge a UI update onto the existing record and route it to
/// the right transition.
///
/// * existing locked, no password: [`update_locked`]
/// * existing locked, password: rejected, the note must be unlocked first
/// * otherwise, password: merge then [`lock`]
/// * otherwise: merge and stay unlocked; stale locked fields in the payload are discarded
pub fn save(
    existing: Option<&NoteRecord>,
    id: &str,
    update: &NoteUpdate,
    clock: &dyn Clock,
) -> Result<NoteRecord> {
    if let Some(current) = existing
        && current.is_locked()
    {
        if update.requests_lock() {
            return Err(NoteError::AlreadyLocked { id: id.to_string() }.into());
        }
        return update_locked(current, update, clock);
    }

    let mut merged = match existing {
        Some(current) => {
            let mut merged = current.clone();
            update.apply_metadata(&mut merged);
            if let Some(content) = &update.content {
                merged.set_content(content.clone());
            }
            merged
        }
        None => NoteRecord::from_update(id, update)?,
    };

    if update.carries_locked_fields() {
        debug!(note_id = id, "Discarding stale locked fields on unlocked save");
    }

    if let Some(password) = &update.password {
        return lock(&merged, password, clock);
    }

    merged.last_modified = Some(clock.now_iso());
    Ok(merged)
}
