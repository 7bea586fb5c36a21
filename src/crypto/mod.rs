//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM vault encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 password stretching (`kdf`)
//! - Purpose-bound derivation of the auth credential and vault key (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_encryption_key, ...};
pub use encryption::{decrypt, encrypt, NONCE_LEN};
pub use kdf::{decode_salt, encode_salt, generate_salt, KdfParams, SALT_LEN};
pub use keys::{derive_auth_credential, derive_encryption_key, AuthCredential, EncryptionKey};
