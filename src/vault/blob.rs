//! The encrypted vault blob and its transport encoding.
//!
//! A `VaultBlob` is what the server actually stores: an authenticated
//! ciphertext plus the nonce it was sealed under.  Both travel as
//! base64 strings in the `encrypted_data` / `iv` wire fields and are
//! opaque to the server — only a client holding the encryption key can
//! interpret them.

use serde::{Deserialize, Serialize};

use crate::crypto::{decrypt, encrypt, EncryptionKey};
use crate::errors::{PassVaultError, Result};

/// An encrypted vault: ciphertext and the nonce it was sealed under.
#[derive(Debug, Clone)]
pub struct VaultBlob {
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
}

/// Wire form of a vault blob: base64-encoded ciphertext and nonce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireVault {
    pub encrypted_data: String,
    pub iv: String,
}

impl VaultBlob {
    /// Encrypt `plaintext` into a fresh blob under `key`.
    ///
    /// A new random nonce is generated for every call.
    pub fn seal(key: &EncryptionKey, plaintext: &[u8]) -> Result<Self> {
        let (ciphertext, nonce) = encrypt(key, plaintext)?;
        Ok(Self {
            ciphertext,
            nonce: nonce.to_vec(),
        })
    }

    /// Decrypt the blob, verifying its integrity.
    pub fn open(&self, key: &EncryptionKey) -> Result<Vec<u8>> {
        decrypt(key, &self.ciphertext, &self.nonce)
    }

    /// Encode for transmission to the server.
    pub fn to_wire(&self) -> WireVault {
        WireVault {
            encrypted_data: BASE64.encode(&self.ciphertext),
            iv: BASE64.encode(&self.nonce),
        }
    }

    /// Decode a blob received from the server.
    pub fn from_wire(wire: &WireVault) -> Result<Self> {
        let ciphertext = BASE64
            .decode(&wire.encrypted_data)
            .map_err(|e| PassVaultError::Encoding(format!("encrypted_data: {e}")))?;
        let nonce = BASE64
            .decode(&wire.iv)
            .map_err(|e| PassVaultError::Encoding(format!("iv: {e}")))?;

        Ok(Self { ciphertext, nonce })
    }
}

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
