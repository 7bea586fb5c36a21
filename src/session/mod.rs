//! The in-memory session: the only holder of the encryption key and
//! the plaintext entry collection.
//!
//! A `Session` is created by `login`, lives entirely in memory, and is
//! consumed by `logout`, which zeroizes the key and the decrypted
//! passwords.  Nothing in here is ever persisted to disk.
//!
//! The entry collection is the single source of truth; the stored
//! blob is re-derived from it on every save, and every mutation runs
//! through the sync state machine so the server sees saves strictly
//! in the order they were issued.

use uuid::Uuid;
use zeroize::Zeroize;

use crate::api::{ServerApi, VaultFetch};
use crate::crypto::{
    decode_salt, derive_auth_credential, derive_encryption_key, encode_salt, generate_salt,
    EncryptionKey, KdfParams,
};
use crate::errors::{PassVaultError, Result};
use crate::vault::{
    deserialize_entries, serialize_entries, Entry, SaveOp, SyncState, VaultBlob, VaultSync,
};

/// Minimum master password length at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Register a new account.
///
/// Generates the account salt, derives the authentication credential,
/// and transmits both.  The encryption key is not derived here — it
/// only exists inside a logged-in session.
pub fn register(
    api: &dyn ServerApi,
    email: &str,
    password: &str,
    confirm: &str,
    params: &KdfParams,
) -> Result<()> {
    if email.trim().is_empty() {
        return Err(PassVaultError::Validation("email must not be empty".into()));
    }
    if password != confirm {
        return Err(PassVaultError::PasswordMismatch);
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(PassVaultError::Validation(format!(
            "master password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let salt = generate_salt();
    let credential = derive_auth_credential(password.as_bytes(), &salt, params)?;

    api.register(email, &credential.to_base64(), &encode_salt(&salt))
}

/// A logged-in session.
pub struct Session {
    api: Box<dyn ServerApi>,

    /// Account email, kept for display only.
    email: String,

    /// Server-issued bearer token; opaque to the client.
    token: String,

    /// The vault encryption key (zeroized on drop).
    key: EncryptionKey,

    /// The decrypted entry collection — the single source of truth.
    entries: Vec<Entry>,

    /// Existence/save state machine.
    sync: VaultSync,
}

impl Session {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Log in and load the vault.
    ///
    /// Fetches the account salt, derives the auth credential, exchanges
    /// it for a token, derives the encryption key, and performs the
    /// initial vault load.  A decryption failure during that load is
    /// fatal: no session is returned and the caller must
    /// re-authenticate — continuing with partially decrypted data is
    /// not an option.
    pub fn login(
        api: Box<dyn ServerApi>,
        email: &str,
        password: &str,
        params: &KdfParams,
    ) -> Result<Self> {
        if password.is_empty() {
            return Err(PassVaultError::Validation(
                "master password must not be empty".into(),
            ));
        }

        let salt_b64 = api.fetch_salt(email)?;
        let salt = decode_salt(&salt_b64)?;

        let credential = derive_auth_credential(password.as_bytes(), &salt, params)?;
        let token = api.login(email, &credential.to_base64())?;

        let key = derive_encryption_key(password.as_bytes(), &salt, params)?;

        let mut session = Self {
            api,
            email: email.to_string(),
            token,
            key,
            entries: Vec::new(),
            sync: VaultSync::new(),
        };

        // If this fails the session is dropped on the spot, which
        // zeroizes the freshly derived key.
        session.load()?;

        Ok(session)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The decrypted entries, in vault order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries in the vault.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Current vault existence state.
    pub fn sync_state(&self) -> SyncState {
        self.sync.state()
    }

    /// Find an entry by site name (case-insensitive exact match).
    pub fn find_by_site(&self, site: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.site.eq_ignore_ascii_case(site))
    }

    /// Entries whose site or username contains `term` (case-insensitive).
    pub fn search(&self, term: &str) -> Vec<&Entry> {
        let term = term.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.site.to_lowercase().contains(&term)
                    || e.username.to_lowercase().contains(&term)
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Vault load/save
    // ------------------------------------------------------------------

    /// Fetch and decrypt the stored vault.
    ///
    /// A not-found response resolves the state to `Absent` with an
    /// empty collection.  Success replaces the collection and resolves
    /// to `Present`.  Any other failure leaves the state exactly as it
    /// was, so the call is safe to retry.
    pub fn load(&mut self) -> Result<()> {
        match self.api.load_vault(&self.token)? {
            VaultFetch::Absent => {
                self.entries.clear();
                self.sync.record_load_absent();
            }
            VaultFetch::Found(wire) => {
                let blob = VaultBlob::from_wire(&wire)?;
                let mut plaintext = blob.open(&self.key)?;
                let entries = deserialize_entries(&plaintext);
                plaintext.zeroize();
                self.entries = entries?;
                self.sync.record_load_present();
            }
        }
        Ok(())
    }

    /// Encrypt the entry collection and push it to the server.
    ///
    /// The sync machine decides create-vs-update and rejects a save
    /// while another is in flight.  State advances only after the
    /// server confirms; on failure everything is left retryable.
    pub fn save(&mut self) -> Result<()> {
        let mut plaintext = serialize_entries(&self.entries)?;
        let blob = VaultBlob::seal(&self.key, &plaintext);
        plaintext.zeroize();
        let wire = blob?.to_wire();

        let pending = self.sync.begin_save()?;
        let result = match pending.op() {
            SaveOp::Create => self.api.create_vault(&self.token, &wire),
            SaveOp::Update => self.api.update_vault(&self.token, &wire),
        };
        self.sync.complete_save(pending, result.is_ok());

        result
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Append a new entry and save the vault.
    ///
    /// The in-memory collection keeps the new entry even if the save
    /// fails — it is the source of truth, and a later `save` retries.
    pub fn add_entry(&mut self, entry: Entry) -> Result<()> {
        if entry.site.trim().is_empty() {
            return Err(PassVaultError::Validation("site must not be empty".into()));
        }
        if entry.password.is_empty() {
            return Err(PassVaultError::Validation(
                "entry password must not be empty".into(),
            ));
        }

        self.entries.push(entry);
        self.save()
    }

    /// Replace the entry with the same id and save the vault.
    pub fn update_entry(&mut self, updated: Entry) -> Result<()> {
        let slot = self
            .entries
            .iter_mut()
            .find(|e| e.id == updated.id)
            .ok_or_else(|| PassVaultError::EntryNotFound(updated.site.clone()))?;

        let mut old = std::mem::replace(slot, updated);
        old.password.zeroize();

        self.save()
    }

    /// Remove an entry by id and save the vault.
    pub fn remove_entry(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| PassVaultError::EntryNotFound(id.to_string()))?;

        let mut removed = self.entries.remove(index);
        removed.password.zeroize();

        self.save()
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// End the session, wiping the decrypted material.
    ///
    /// The encryption key zeroizes itself on drop; entry passwords and
    /// notes are wiped here because `Entry` is otherwise a plain value
    /// type.
    pub fn logout(mut self) {
        for entry in &mut self.entries {
            entry.password.zeroize();
            entry.notes.zeroize();
        }
        self.entries.clear();
        self.token.zeroize();
        // `key` drops (and zeroizes) with `self`.
    }
}
