//! Password verification without decryption.
//!
//! A locked note stores `passwordHash` (lowercase hex of PBKDF2 output) next to
//! `passwordSalt` (base64 of its own 16-byte salt). Unlock checks the password
//! here first so a wrong password is reported before any decryption runs.

use base64ct::{Base64, Encoding};
use subtle::ConstantTimeEq;
use tracing::debug;

use super::kdf::{Salt, derive_verification_bits, generate_salt, salt_from_slice};

/// The stored verification pair for a locked note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    /// Lowercase hex of the 32 derived bytes
    pub hash: String,
    /// Base64 of the 16-byte verification salt
    pub salt: String,
}

/// Hash a password under a freshly generated verification salt.
pub fn hash_password(password: impl AsRef<str>) -> PasswordHash {
    hash_password_with_salt(password, &generate_salt())
}

/// Hash a password under a caller-supplied salt.
pub fn hash_password_with_salt(password: impl AsRef<str>, salt: &Salt) -> PasswordHash {
    PasswordHash {
        hash: hex::encode(derive_verification_bits(password, salt)),
        salt: Base64::encode_string(salt),
    }
}

/// Check a password against a stored hash and salt.
///
/// Never fails outward: an undecodable or wrongly sized salt verifies as `false`.
/// The hex comparison runs in constant time.
pub fn verify_password(
    password: impl AsRef<str>,
    stored_hash: impl AsRef<str>,
    stored_salt_b64: impl AsRef<str>,
) -> bool {
    let salt = match decode_salt(stored_salt_b64.as_ref()) {
        Some(salt) => salt,
        None => return false,
    };

    let computed = hex::encode(derive_verification_bits(password, &salt));
    computed.as_bytes().ct_eq(stored_hash.as_ref().as_bytes()).into()
}

fn decode_salt(salt_b64: &str) -> Option<Salt> {
    let bytes = match Base64::decode_vec(salt_b64.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Stored password salt is not valid base64: {e}");
            return None;
        }
    };

    match salt_from_slice(&bytes) {
        Ok(salt) => Some(salt),
        Err(e) => {
            debug!("Stored password salt rejected: {e}");
            None
        }
    }
}
