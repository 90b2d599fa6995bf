//! Error types for note cryptography.

use thiserror::Error;

/// Errors raised by key derivation and the content cipher.
///
/// Password verification never produces one of these: a malformed stored
/// hash or salt simply fails to verify.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The ciphertext blob could not be split into salt, IV and ciphertext.
    #[error("Malformed ciphertext blob: {reason}")]
    MalformedBlob {
        /// What was wrong with the blob
        reason: String,
    },

    /// Authenticated decryption failed (wrong key or tampered blob).
    #[error("Decryption failed: {reason}")]
    DecryptionFailed {
        /// Description of the failure
        reason: String,
    },

    /// The cipher refused to encrypt.
    #[error("Encryption failed: {reason}")]
    EncryptionFailed {
        /// Description of the failure
        reason: String,
    },

    /// A salt of the wrong size was supplied.
    #[error("Invalid salt length: expected {expected}, got {actual}")]
    InvalidSaltLength { expected: usize, actual: usize },
}

impl CryptoError {
    /// Check if this error means stored ciphertext could not be recovered.
    pub fn is_decryption_error(&self) -> bool {
        matches!(
            self,
            CryptoError::DecryptionFailed { .. } | CryptoError::MalformedBlob { .. }
        )
    }

    /// Check if this error came from bad input framing rather than the cipher.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            CryptoError::MalformedBlob { .. } | CryptoError::InvalidSaltLength { .. }
        )
    }
}

impl From<CryptoError> for crate::Error {
    fn from(err: CryptoError) -> Self {
        crate::Error::Crypto(err)
    }
}
