//! Cryptographic primitives for password-locked notes
//!
//! Provides key derivation, content encryption and password verification using:
//! - PBKDF2-HMAC-SHA256 (100 000 iterations) for both keys and verification bits
//! - AES-256-GCM for note content
//!
//! The content key and the verification hash are always derived under two
//! independently generated salts.

pub mod cipher;
mod errors;
pub mod kdf;
pub mod verifier;

pub use cipher::{BlobParts, decrypt, encrypt};
pub use errors::CryptoError;
pub use kdf::{EncryptionKey, Salt, derive_key, derive_verification_bits, generate_salt};
pub use verifier::{PasswordHash, hash_password, hash_password_with_salt, verify_password};
