//! Entry type stored inside the vault plaintext.
//!
//! The full ordered collection of entries *is* the vault's plaintext:
//! it serializes to canonical JSON before encryption, and the stored
//! blob is nothing more than a derived, disposable encoding of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{PassVaultError, Result};

/// A single password entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Unique entry id.
    pub id: Uuid,

    /// The site or service name (e.g. "github").
    pub site: String,

    /// Username or account identifier at the site.
    pub username: String,

    /// The stored password.
    pub password: String,

    /// Optional site URL.
    #[serde(default)]
    pub url: String,

    /// Optional free-form notes.
    #[serde(default)]
    pub notes: String,

    /// When this entry was first created.
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Create a new entry with a fresh id and timestamp.
    pub fn new(site: &str, username: &str, password: &str, url: &str, notes: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            site: site.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            url: url.to_string(),
            notes: notes.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Serialize the entry collection to its canonical JSON form.
pub fn serialize_entries(entries: &[Entry]) -> Result<Vec<u8>> {
    serde_json::to_vec(entries)
        .map_err(|e| PassVaultError::SerializationError(format!("entries: {e}")))
}

/// Parse a decrypted vault plaintext back into entries.
///
/// The plaintext authenticated correctly if we got this far, so a
/// parse failure means the stored collection itself is malformed.
pub fn deserialize_entries(plaintext: &[u8]) -> Result<Vec<Entry>> {
    serde_json::from_slice(plaintext)
        .map_err(|e| PassVaultError::SerializationError(format!("entries: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_roundtrip_preserves_entries() {
        let entries = vec![
            Entry::new("github", "octocat", "hunter2", "https://github.com", ""),
            Entry::new("mail", "me@example.com", "s3cret", "", "personal"),
        ];

        let bytes = serialize_entries(&entries).unwrap();
        let back = deserialize_entries(&bytes).unwrap();

        assert_eq!(back.len(), 2);
        assert_eq!(back[0].id, entries[0].id);
        assert_eq!(back[0].site, "github");
        assert_eq!(back[1].password, "s3cret");
        assert_eq!(back[1].notes, "personal");
    }

    #[test]
    fn optional_fields_default_when_missing() {
        // Older payloads may omit url/notes entirely.
        let json = format!(
            r#"[{{"id":"{}","site":"a","username":"b","password":"c","created_at":"2024-01-01T00:00:00Z"}}]"#,
            Uuid::new_v4()
        );
        let entries = deserialize_entries(json.as_bytes()).unwrap();
        assert_eq!(entries[0].url, "");
        assert_eq!(entries[0].notes, "");
    }

    #[test]
    fn garbage_plaintext_is_rejected() {
        assert!(deserialize_entries(b"not json at all").is_err());
    }
}
