//! AES-256-GCM authenticated encryption for the vault blob.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! returns it alongside the ciphertext.  The two stay separate because
//! the server contract stores them as distinct fields
//! (`encrypted_data` / `iv`).
//!
//! Nonce generation is internal and mandatory — there is no write path
//! that accepts a caller-supplied nonce.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{PassVaultError, Result};

use super::keys::EncryptionKey;

/// Size of the AES-256-GCM nonce in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` under `key` with a fresh random nonce.
///
/// Returns `(ciphertext, nonce)`.  The ciphertext carries the GCM auth
/// tag, so decryption detects any tampering.
pub fn encrypt(key: &EncryptionKey, plaintext: &[u8]) -> Result<(Vec<u8>, [u8; NONCE_LEN])> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Generate a random 12-byte nonce.  Never reused under the same key.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok((ciphertext, nonce.into()))
}

/// Decrypt data that was produced by `encrypt`.
///
/// Fails closed with `AuthenticationFailure` if the key, nonce, or
/// ciphertext has been altered or does not match — a wrong password and
/// a tampered blob are deliberately indistinguishable, and no partial
/// plaintext is ever returned.
pub fn decrypt(key: &EncryptionKey, ciphertext: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
    // A nonce of the wrong length is undecodable input, not a failed
    // integrity check.
    if nonce.len() != NONCE_LEN {
        return Err(PassVaultError::Encoding(format!(
            "nonce must be {NONCE_LEN} bytes (got {})",
            nonce.len()
        )));
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|_| PassVaultError::AuthenticationFailure)?;

    let nonce = Nonce::from_slice(nonce);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| PassVaultError::AuthenticationFailure)
}
