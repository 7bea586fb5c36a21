//! End-to-end session tests against an in-memory server.
//!
//! The mock implements the same six-operation contract as the HTTP
//! client and stores exactly what a real backend would: the salt, the
//! auth credential, and one opaque blob.  It never verifies the
//! credential — which is precisely what lets the wrong-password test
//! reach the decryption layer.

use std::cell::RefCell;
use std::rc::Rc;

use passvault::api::{ServerApi, VaultFetch};
use passvault::crypto::KdfParams;
use passvault::errors::{PassVaultError, Result};
use passvault::session::{self, Session};
use passvault::vault::{Entry, SyncState, WireVault};

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ServerState {
    salt: Option<String>,
    auth_key_hash: Option<String>,
    vault: Option<WireVault>,
    create_calls: usize,
    update_calls: usize,
    fail_saves: bool,
}

/// Cloneable handle to shared server state, so a test can keep
/// inspecting the backend after handing a clone to the session.
#[derive(Clone, Default)]
struct MockServer(Rc<RefCell<ServerState>>);

impl MockServer {
    fn state(&self) -> std::cell::Ref<'_, ServerState> {
        self.0.borrow()
    }

    fn set_fail_saves(&self, fail: bool) {
        self.0.borrow_mut().fail_saves = fail;
    }

    /// Overwrite the stored salt with something undecodable.
    fn corrupt_salt(&self) {
        self.0.borrow_mut().salt = Some("!!not base64!!".to_string());
    }
}

impl ServerApi for MockServer {
    fn register(&self, _email: &str, auth_key_hash: &str, salt: &str) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.salt = Some(salt.to_string());
        state.auth_key_hash = Some(auth_key_hash.to_string());
        Ok(())
    }

    fn fetch_salt(&self, _email: &str) -> Result<String> {
        self.state()
            .salt
            .clone()
            .ok_or_else(|| PassVaultError::Transport("fetch salt: unknown account (404)".into()))
    }

    fn login(&self, _email: &str, _auth_key_hash: &str) -> Result<String> {
        Ok("test-token".to_string())
    }

    fn load_vault(&self, _token: &str) -> Result<VaultFetch> {
        match self.state().vault.clone() {
            Some(wire) => Ok(VaultFetch::Found(wire)),
            None => Ok(VaultFetch::Absent),
        }
    }

    fn create_vault(&self, _token: &str, vault: &WireVault) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.create_calls += 1;
        if state.fail_saves {
            return Err(PassVaultError::Transport("create vault: server error (500)".into()));
        }
        state.vault = Some(vault.clone());
        Ok(())
    }

    fn update_vault(&self, _token: &str, vault: &WireVault) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.update_calls += 1;
        if state.fail_saves {
            return Err(PassVaultError::Transport("update vault: server error (500)".into()));
        }
        state.vault = Some(vault.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const EMAIL: &str = "user@example.com";
const PASSWORD: &str = "correct-password";

fn params() -> KdfParams {
    KdfParams {
        auth_iterations: 10_000,
        enc_iterations: 12_000,
    }
}

fn register(server: &MockServer) {
    session::register(server, EMAIL, PASSWORD, PASSWORD, &params()).expect("register");
}

fn login(server: &MockServer) -> Session {
    Session::login(Box::new(server.clone()), EMAIL, PASSWORD, &params()).expect("login")
}

fn entry(site: &str) -> Entry {
    Entry::new(site, "someone", "s3cret!", "", "")
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn register_stores_salt_and_credential() {
    let server = MockServer::default();
    register(&server);

    let state = server.state();
    assert!(state.salt.is_some());
    assert!(state.auth_key_hash.is_some());
    // The vault itself is only created on first save, not at signup.
    assert!(state.vault.is_none());
}

#[test]
fn register_rejects_short_password() {
    let server = MockServer::default();
    let result = session::register(&server, EMAIL, "short", "short", &params());
    assert!(matches!(result, Err(PassVaultError::Validation(_))));
}

#[test]
fn register_rejects_mismatched_confirmation() {
    let server = MockServer::default();
    let result = session::register(&server, EMAIL, "long-enough-pw", "different-pw", &params());
    assert!(matches!(result, Err(PassVaultError::PasswordMismatch)));
}

#[test]
fn register_rejects_empty_email() {
    let server = MockServer::default();
    let result = session::register(&server, "  ", PASSWORD, PASSWORD, &params());
    assert!(matches!(result, Err(PassVaultError::Validation(_))));
}

// ---------------------------------------------------------------------------
// Login and initial load
// ---------------------------------------------------------------------------

#[test]
fn login_against_empty_backend_resolves_absent() {
    let server = MockServer::default();
    register(&server);

    let session = login(&server);
    assert_eq!(session.sync_state(), SyncState::Absent);
    assert_eq!(session.entry_count(), 0);
}

#[test]
fn login_rejects_empty_password() {
    let server = MockServer::default();
    register(&server);

    let result = Session::login(Box::new(server), EMAIL, "", &params());
    assert!(matches!(result, Err(PassVaultError::Validation(_))));
}

#[test]
fn corrupted_salt_is_an_encoding_error() {
    let server = MockServer::default();
    register(&server);
    server.corrupt_salt();

    let result = Session::login(Box::new(server.clone()), EMAIL, PASSWORD, &params());
    assert!(matches!(result, Err(PassVaultError::Encoding(_))));
}

// ---------------------------------------------------------------------------
// Save sequencing: exactly one create, then updates
// ---------------------------------------------------------------------------

#[test]
fn first_save_creates_then_updates() {
    let server = MockServer::default();
    register(&server);

    let mut session = login(&server);

    session.add_entry(entry("github")).expect("first save");
    assert_eq!(session.sync_state(), SyncState::Present);
    assert_eq!(server.state().create_calls, 1);
    assert_eq!(server.state().update_calls, 0);

    session.add_entry(entry("mail")).expect("second save");
    assert_eq!(server.state().create_calls, 1, "no second create call");
    assert_eq!(server.state().update_calls, 1);
}

#[test]
fn entries_survive_a_fresh_login() {
    let server = MockServer::default();
    register(&server);

    let mut session = login(&server);
    session.add_entry(entry("github")).expect("save 1");
    session
        .add_entry(Entry::new("mail", "me", "pw-two", "https://mail.example", "personal"))
        .expect("save 2");
    session.logout();

    let session = login(&server);
    assert_eq!(session.sync_state(), SyncState::Present);
    assert_eq!(session.entry_count(), 2);

    let mail = session.find_by_site("mail").expect("mail entry");
    assert_eq!(mail.username, "me");
    assert_eq!(mail.password, "pw-two");
    assert_eq!(mail.notes, "personal");
}

#[test]
fn update_and_remove_roundtrip() {
    let server = MockServer::default();
    register(&server);

    let mut session = login(&server);
    session.add_entry(entry("github")).expect("add");

    // Edit the password.
    let mut edited = session.find_by_site("github").unwrap().clone();
    let original_created = edited.created_at;
    edited.password = "rotated!".to_string();
    session.update_entry(edited).expect("update");

    let reloaded = login(&server);
    let gh = reloaded.find_by_site("github").expect("entry");
    assert_eq!(gh.password, "rotated!");
    assert_eq!(gh.created_at, original_created);

    // Remove it.
    let mut session = login(&server);
    let id = session.find_by_site("github").unwrap().id;
    session.remove_entry(id).expect("remove");
    assert_eq!(session.entry_count(), 0);

    let session = login(&server);
    assert_eq!(session.entry_count(), 0);
}

#[test]
fn removing_a_missing_entry_fails_without_a_save() {
    let server = MockServer::default();
    register(&server);

    let mut session = login(&server);
    session.add_entry(entry("github")).expect("add");
    let saves_before = server.state().create_calls + server.state().update_calls;

    let result = session.remove_entry(uuid::Uuid::new_v4());
    assert!(matches!(result, Err(PassVaultError::EntryNotFound(_))));

    let saves_after = server.state().create_calls + server.state().update_calls;
    assert_eq!(saves_before, saves_after);
}

// ---------------------------------------------------------------------------
// Failure handling
// ---------------------------------------------------------------------------

#[test]
fn failed_create_is_retryable() {
    let server = MockServer::default();
    register(&server);

    let mut session = login(&server);
    server.set_fail_saves(true);

    let result = session.add_entry(entry("github"));
    assert!(matches!(result, Err(PassVaultError::Transport(_))));

    // The entry stays in memory (source of truth) and the state did
    // not advance, so the retry issues a create — not an update.
    assert_eq!(session.entry_count(), 1);
    assert_eq!(session.sync_state(), SyncState::Absent);

    server.set_fail_saves(false);
    session.save().expect("retry");
    assert_eq!(session.sync_state(), SyncState::Present);
    assert_eq!(server.state().create_calls, 2);
    assert_eq!(server.state().update_calls, 0);
}

#[test]
fn wrong_password_fails_with_authentication_failure() {
    let server = MockServer::default();
    register(&server);

    let mut session = login(&server);
    session.add_entry(entry("github")).expect("save");
    session.logout();

    // The mock backend issues a token regardless of the credential, so
    // the failure below can only come from the integrity check.
    let result = Session::login(
        Box::new(server.clone()),
        EMAIL,
        "wrong-password",
        &params(),
    );
    assert!(matches!(
        result,
        Err(PassVaultError::AuthenticationFailure)
    ));
}

#[test]
fn tampered_blob_fails_like_a_wrong_password() {
    let server = MockServer::default();
    register(&server);

    let mut session = login(&server);
    session.add_entry(entry("github")).expect("save");
    session.logout();

    // Flip one character of the stored ciphertext.
    {
        let mut state = server.0.borrow_mut();
        let wire = state.vault.as_mut().expect("stored vault");
        let mut bytes = wire.encrypted_data.clone().into_bytes();
        bytes[0] = if bytes[0] == b'A' { b'B' } else { b'A' };
        wire.encrypted_data = String::from_utf8(bytes).unwrap();
    }

    let result = Session::login(Box::new(server.clone()), EMAIL, PASSWORD, &params());
    assert!(matches!(
        result,
        Err(PassVaultError::AuthenticationFailure) | Err(PassVaultError::Encoding(_))
    ));
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn search_matches_site_and_username() {
    let server = MockServer::default();
    register(&server);

    let mut session = login(&server);
    session
        .add_entry(Entry::new("GitHub", "octocat", "pw1!", "", ""))
        .expect("add 1");
    session
        .add_entry(Entry::new("mail", "octopus", "pw2!", "", ""))
        .expect("add 2");
    session
        .add_entry(Entry::new("bank", "someone", "pw3!", "", ""))
        .expect("add 3");

    assert_eq!(session.search("octo").len(), 2);
    assert_eq!(session.search("github").len(), 1);
    assert_eq!(session.search("nothing").len(), 0);
}
