//! The two purpose-bound secrets derived from the master password.
//!
//! From (master password, account salt) we derive:
//! - An **authentication credential** shown to the server at login.
//! - A **vault encryption key** that never leaves client memory.
//!
//! Each path stretches the password with its own PBKDF2 work factor,
//! then runs HKDF-SHA256 expand with a distinct purpose label so the
//! two outputs are cryptographically independent.  Knowing one must
//! not help recover the master password or the other.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{PassVaultError, Result};

use super::kdf::{stretch_password, KdfParams, KEY_LEN};

/// HKDF purpose label for the authentication credential.
const AUTH_PURPOSE: &[u8] = b"passvault-auth-credential";

/// HKDF purpose label for the vault encryption key.
const ENC_PURPOSE: &[u8] = b"passvault-vault-key";

/// Derive the authentication credential for (password, salt).
///
/// Deterministic: the same inputs always yield the same credential, so
/// the server can verify it across logins.  This is the only derived
/// value that ever crosses the client/server boundary.
pub fn derive_auth_credential(
    password: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<AuthCredential> {
    params.validate()?;
    let mut stretched = stretch_password(password, salt, params.auth_iterations)?;
    let okm = hkdf_expand(&stretched, AUTH_PURPOSE);
    stretched.zeroize();
    Ok(AuthCredential { bytes: okm? })
}

/// Derive the vault encryption key for (password, salt).
///
/// Deterministic for the same inputs, but unlinkable to the
/// authentication credential without knowledge of the password.
pub fn derive_encryption_key(
    password: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<EncryptionKey> {
    params.validate()?;
    let mut stretched = stretch_password(password, salt, params.enc_iterations)?;
    let okm = hkdf_expand(&stretched, ENC_PURPOSE);
    stretched.zeroize();
    Ok(EncryptionKey { bytes: okm? })
}

/// Internal helper: run HKDF-SHA256 expand with the given purpose label.
///
/// We skip the `extract` step and use the stretched password directly
/// as the pseudo-random key (PRK), because it already has high entropy
/// (it came out of PBKDF2).
fn hkdf_expand(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    // `salt` is None — HKDF will use a zero-filled salt internally.
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// The credential transmitted to the server at registration and login.
///
/// The server stores and verifies it but can never recover the master
/// password or the encryption key from it.  Zeroed on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct AuthCredential {
    bytes: [u8; KEY_LEN],
}

impl AuthCredential {
    /// Encode as base64 for the `auth_key_hash` wire field.
    pub fn to_base64(&self) -> String {
        use base64::engine::general_purpose::STANDARD as BASE64;
        use base64::Engine;
        BASE64.encode(self.bytes)
    }

    /// Access the raw credential bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// The symmetric key protecting the vault blob.
///
/// Held only in client memory for the lifetime of a session; never
/// transmitted or persisted in any form.  Zeroed on drop so logout
/// actually discards the key rather than merely dereferencing it.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct EncryptionKey {
    bytes: [u8; KEY_LEN],
}

impl EncryptionKey {
    /// Create an `EncryptionKey` from raw bytes (used by tests).
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build the AEAD cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
