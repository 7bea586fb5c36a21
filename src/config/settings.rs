use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::crypto::KdfParams;
use crate::errors::{PassVaultError, Result};

/// Client configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works against a
/// local server without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the vault server API.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// PBKDF2 iterations for the authentication credential.
    #[serde(default = "default_auth_iterations")]
    pub auth_iterations: u32,

    /// PBKDF2 iterations for the vault encryption key.
    #[serde(default = "default_enc_iterations")]
    pub enc_iterations: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_server_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_auth_iterations() -> u32 {
    100_000
}

fn default_enc_iterations() -> u32 {
    310_000
}

fn default_timeout_secs() -> u64 {
    10
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            auth_iterations: default_auth_iterations(),
            enc_iterations: default_enc_iterations(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Load settings from the current working directory, falling back
    /// to the home directory.
    pub fn discover() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        if cwd.join(Self::FILE_NAME).exists() {
            return Self::load(&cwd);
        }

        if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
            let home = std::path::PathBuf::from(home);
            if home.join(Self::FILE_NAME).exists() {
                return Self::load(&home);
            }
        }

        Ok(Self::default())
    }

    /// Convert the iteration settings into crypto-layer params.
    ///
    /// All clients of one account must agree on these — the server
    /// stores only the salt, never the work factors.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            auth_iterations: self.auth_iterations,
            enc_iterations: self.enc_iterations,
        }
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
