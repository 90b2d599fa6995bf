//! PBKDF2-HMAC-SHA256 key derivation.
//!
//! One primitive serves two call sites: the AES-256-GCM key that protects the
//! note body, and the verification bits stored as `passwordHash`. Each call
//! site generates and stores its own salt.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::CryptoError;
use crate::{
    Result,
    constants::{KEY_LENGTH, PBKDF2_ITERATIONS, SALT_LENGTH},
};

/// A 16-byte PBKDF2 salt.
pub type Salt = [u8; SALT_LENGTH];

/// A derived AES-256 key, wiped when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey([u8; KEY_LENGTH]);

impl EncryptionKey {
    /// Raw key bytes for the cipher.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(<redacted>)")
    }
}

/// Generate a fresh random salt from the OS RNG.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Convert decoded bytes into a [`Salt`], rejecting the wrong length.
pub fn salt_from_slice(bytes: &[u8]) -> Result<Salt> {
    bytes.try_into().map_err(|_| {
        CryptoError::InvalidSaltLength {
            expected: SALT_LENGTH,
            actual: bytes.len(),
        }
        .into()
    })
}

fn pbkdf2_sha256(password: &str, salt: &Salt) -> [u8; KEY_LENGTH] {
    let mut out = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut out);
    out
}

/// Derive the AES-256-GCM key for a note body.
///
/// # Arguments
/// * `password` - The note password
/// * `salt` - The salt embedded in the ciphertext blob
pub fn derive_key(password: impl AsRef<str>, salt: &Salt) -> EncryptionKey {
    EncryptionKey(pbkdf2_sha256(password.as_ref(), salt))
}

/// Derive the raw verification bits stored (hex-encoded) as `passwordHash`.
///
/// # Arguments
/// * `password` - The note password
/// * `salt` - The verification salt stored as `passwordSalt`
pub fn derive_verification_bits(password: impl AsRef<str>, salt: &Salt) -> [u8; KEY_LENGTH] {
    pbkdf2_sha256(password.as_ref(), salt)
}
