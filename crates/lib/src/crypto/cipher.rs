//! Authenticated encryption of note content.
//!
//! A locked note stores its body as a single self-describing blob:
//!
//! ```text
//! base64( salt[16] || iv[12] || AES-256-GCM ciphertext || tag[16] )
//! ```
//!
//! The salt feeds PBKDF2 for the content key, so decryption needs nothing but
//! the blob and the password. Every call to [`encrypt`] draws a fresh salt and IV.

use aes_gcm::{Aes256Gcm, KeyInit, Nonce, aead::Aead};
use base64ct::{Base64, Encoding};
use rand::{RngCore, rngs::OsRng};
use zeroize::Zeroize;

use super::{
    errors::CryptoError,
    kdf::{Salt, derive_key, generate_salt, salt_from_slice},
};
use crate::{
    Result,
    constants::{IV_LENGTH, MIN_BLOB_LENGTH, SALT_LENGTH},
};

/// The decoded pieces of a ciphertext blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobParts {
    /// PBKDF2 salt for the content key
    pub salt: Salt,
    /// AES-GCM nonce
    pub iv: [u8; IV_LENGTH],
    /// Ciphertext with the 16-byte tag appended
    pub ciphertext: Vec<u8>,
}

impl BlobParts {
    /// Concatenate and base64-encode.
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(SALT_LENGTH + IV_LENGTH + self.ciphertext.len());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.iv);
        bytes.extend_from_slice(&self.ciphertext);
        Base64::encode_string(&bytes)
    }

    /// Decode a blob and split it at the fixed offsets.
    pub fn decode(blob: &str) -> Result<Self> {
        let bytes = Base64::decode_vec(blob.trim()).map_err(|e| CryptoError::MalformedBlob {
            reason: format!("invalid base64: {e}"),
        })?;

        if bytes.len() < MIN_BLOB_LENGTH {
            return Err(CryptoError::MalformedBlob {
                reason: format!(
                    "expected at least {} bytes, got {}",
                    MIN_BLOB_LENGTH,
                    bytes.len()
                ),
            }
            .into());
        }

        let (salt, rest) = bytes.split_at(SALT_LENGTH);
        let (iv, ciphertext) = rest.split_at(IV_LENGTH);

        let mut iv_bytes = [0u8; IV_LENGTH];
        iv_bytes.copy_from_slice(iv);

        Ok(Self {
            salt: salt_from_slice(salt)?,
            iv: iv_bytes,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

/// Encrypt note text under a password.
///
/// # Arguments
/// * `plaintext` - The note content
/// * `password` - The note password
///
/// # Returns
/// The base64 blob described in the module docs.
pub fn encrypt(plaintext: impl AsRef<str>, password: impl AsRef<str>) -> Result<String> {
    let salt = generate_salt();
    let mut iv = [0u8; IV_LENGTH];
    OsRng.fill_bytes(&mut iv);

    let key = derive_key(password, &salt);
    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|e| CryptoError::EncryptionFailed {
            reason: format!("Failed to create cipher: {e}"),
        })?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext.as_ref().as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed {
            reason: format!("Encryption failed: {e}"),
        })?;

    Ok(BlobParts {
        salt,
        iv,
        ciphertext,
    }
    .encode())
}

/// Decrypt a blob produced by [`encrypt`].
///
/// Fails with [`CryptoError::MalformedBlob`] when the blob cannot be framed and
/// with [`CryptoError::DecryptionFailed`] when the tag does not verify.
pub fn decrypt(blob: impl AsRef<str>, password: impl AsRef<str>) -> Result<String> {
    let parts = BlobParts::decode(blob.as_ref())?;

    let key = derive_key(password, &parts.salt);
    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|e| CryptoError::DecryptionFailed {
            reason: format!("Failed to create cipher: {e}"),
        })?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&parts.iv), parts.ciphertext.as_ref())
        .map_err(|_| CryptoError::DecryptionFailed {
            reason: "authentication tag mismatch".to_string(),
        })?;

    String::from_utf8(plaintext).map_err(|e| {
        let mut bytes = e.into_bytes();
        bytes.zeroize();
        CryptoError::DecryptionFailed {
            reason: "plaintext is not valid UTF-8".to_string(),
        }
        .into()
    })
}
