//! Constants used throughout the Notelock library.
//!
//! This module provides central definitions for cryptographic parameters
//! and persisted layout keys.

/// Length in bytes of every PBKDF2 salt (encryption salt and verification salt).
pub const SALT_LENGTH: usize = 16;

/// AES-GCM nonce length (12 bytes standard).
pub const IV_LENGTH: usize = 12;

/// AES-GCM authentication tag length.
pub const TAG_LENGTH: usize = 16;

/// Derived key length for AES-256 and for verification bits (32 bytes).
pub const KEY_LENGTH: usize = 32;

/// PBKDF2-HMAC-SHA256 iteration count for both key and verification derivation.
///
/// Changing this invalidates every stored note; the count is not recorded in the blob.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Smallest decodable blob: salt, IV and a bare tag for empty plaintext.
pub const MIN_BLOB_LENGTH: usize = SALT_LENGTH + IV_LENGTH + TAG_LENGTH;

/// Persisted key holding the `{ noteId: NoteRecord }` map.
pub const NOTES_KEY: &str = "leetcodeNotes";

/// Persisted key holding the monotonically increasing id counter.
pub const COUNTER_KEY: &str = "noteCounter";

/// Prefix of minted note identifiers (`note_<n>`).
pub const NOTE_ID_PREFIX: &str = "note_";
