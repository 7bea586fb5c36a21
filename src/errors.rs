use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Encoding errors ---
    #[error("Malformed encoding: {0}")]
    Encoding(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Vault could not be decrypted — wrong master password or corrupted data")]
    AuthenticationFailure,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Policy / input errors ---
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password mismatch — passwords do not match")]
    PasswordMismatch,

    // --- Sync errors ---
    #[error("A vault save is already in flight")]
    Busy,

    #[error("Vault state is unknown — load the vault before saving")]
    SyncStateUnknown,

    #[error("Entry '{0}' not found in vault")]
    EntryNotFound(String),

    // --- Transport errors ---
    #[error("Server request failed: {0}")]
    Transport(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
