//! Password-based key stretching using PBKDF2-HMAC-SHA256.
//!
//! PBKDF2 stretches the low-entropy master password into 32 bytes of
//! key material, tunable for attacker cost via the iteration count.
//! Iteration counts are configurable via `KdfParams` (loaded from
//! `.passvault.toml` or sensible defaults).

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::errors::{PassVaultError, Result};

/// Length of the account salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of stretched key material in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Minimum safe iteration count for either derivation path.
const MIN_ITERATIONS: u32 = 10_000;

/// Configurable PBKDF2 iteration counts.
///
/// These map 1:1 to the fields in `Settings` so the CLI can pass
/// whatever the user configured in `.passvault.toml`.  All clients of
/// one account must use the same values — the server stores only the
/// salt, not the work factors.
#[derive(Debug, Clone, Copy)]
pub struct KdfParams {
    /// Iterations for the authentication credential (default: 100 000).
    ///
    /// Tuned for login latency; enough to blunt offline brute force on
    /// a compromised credential store.
    pub auth_iterations: u32,
    /// Iterations for the vault encryption key (default: 310 000).
    ///
    /// Higher than the auth path — this key protects data
    /// confidentiality, not just authentication.
    pub enc_iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            auth_iterations: 100_000,
            enc_iterations: 310_000,
        }
    }
}

impl KdfParams {
    /// Reject iteration counts below the safety floor.
    pub fn validate(&self) -> Result<()> {
        if self.auth_iterations < MIN_ITERATIONS {
            return Err(PassVaultError::KeyDerivationFailed(format!(
                "auth_iterations must be at least {MIN_ITERATIONS} (got {})",
                self.auth_iterations
            )));
        }
        if self.enc_iterations < MIN_ITERATIONS {
            return Err(PassVaultError::KeyDerivationFailed(format!(
                "enc_iterations must be at least {MIN_ITERATIONS} (got {})",
                self.enc_iterations
            )));
        }
        Ok(())
    }
}

/// Stretch a password into 32 bytes of key material.
///
/// The same password + salt + iteration count will always produce the
/// same output.  Callers pick the iteration count per derivation path;
/// purpose separation happens one layer up in `keys`.
pub fn stretch_password(password: &[u8], salt: &[u8], iterations: u32) -> Result<[u8; KEY_LEN]> {
    if iterations < MIN_ITERATIONS {
        return Err(PassVaultError::KeyDerivationFailed(format!(
            "iteration count must be at least {MIN_ITERATIONS} (got {iterations})"
        )));
    }
    if salt.is_empty() {
        return Err(PassVaultError::KeyDerivationFailed(
            "salt must not be empty".into(),
        ));
    }

    let mut out = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out);
    Ok(out)
}

/// Generate a cryptographically random 32-byte account salt.
///
/// Generated once at registration; the server stores and returns it,
/// and it stays fixed for the lifetime of the account.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

/// Encode an account salt for the registration payload.
pub fn encode_salt(salt: &[u8]) -> String {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    BASE64.encode(salt)
}

/// Decode a base64 account salt received from the server.
pub fn decode_salt(salt_b64: &str) -> Result<Vec<u8>> {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    let salt = BASE64
        .decode(salt_b64)
        .map_err(|e| PassVaultError::Encoding(format!("account salt: {e}")))?;

    if salt.is_empty() {
        return Err(PassVaultError::Encoding("account salt is empty".into()));
    }

    Ok(salt)
}
