//! Server API contract and its HTTP implementation.
//!
//! The core consumes this interface; it never owns transport policy.
//! Status handling is deliberately minimal: 2xx is success, 404 on the
//! vault fetch means no vault exists yet, and everything else is a
//! transport error.  The server only ever sees the auth credential,
//! the account salt, and the opaque blob — never the master password
//! or the encryption key.

use std::time::Duration;

use serde::Deserialize;

use crate::errors::{PassVaultError, Result};
use crate::vault::WireVault;

/// Outcome of fetching the stored vault.
#[derive(Debug)]
pub enum VaultFetch {
    /// The server returned a vault blob.
    Found(WireVault),
    /// The server confirmed no vault exists (404).
    Absent,
}

/// The six server operations the client consumes.
pub trait ServerApi {
    /// POST /auth/register — create an account.
    fn register(&self, email: &str, auth_key_hash: &str, salt: &str) -> Result<()>;

    /// POST /auth/salt — fetch the account salt for an email.
    fn fetch_salt(&self, email: &str) -> Result<String>;

    /// POST /auth/login — exchange the auth credential for a token.
    fn login(&self, email: &str, auth_key_hash: &str) -> Result<String>;

    /// GET /vault/ — fetch the stored vault, if any.
    fn load_vault(&self, token: &str) -> Result<VaultFetch>;

    /// POST /vault/ — store a first vault.
    fn create_vault(&self, token: &str, vault: &WireVault) -> Result<()>;

    /// PUT /vault/ — replace the stored vault.
    fn update_vault(&self, token: &str, vault: &WireVault) -> Result<()>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SaltResponse {
    salt: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// `ServerApi` over HTTP via a blocking `ureq` agent.
pub struct HttpServer {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpServer {
    /// Build a client for the given API base URL (e.g.
    /// `http://localhost:8000/api/v1`).
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }
}

impl ServerApi for HttpServer {
    fn register(&self, email: &str, auth_key_hash: &str, salt: &str) -> Result<()> {
        self.agent
            .post(&self.url("/auth/register"))
            .send_json(serde_json::json!({
                "email": email,
                "auth_key_hash": auth_key_hash,
                "salt": salt,
            }))
            .map_err(|e| transport_error("register", e))?;
        Ok(())
    }

    fn fetch_salt(&self, email: &str) -> Result<String> {
        let resp: SaltResponse = self
            .agent
            .post(&self.url("/auth/salt"))
            .send_json(serde_json::json!({ "email": email }))
            .map_err(|e| transport_error("fetch salt", e))?
            .into_json()
            .map_err(|e| PassVaultError::Transport(format!("salt response body: {e}")))?;
        Ok(resp.salt)
    }

    fn login(&self, email: &str, auth_key_hash: &str) -> Result<String> {
        let resp: LoginResponse = self
            .agent
            .post(&self.url("/auth/login"))
            .send_json(serde_json::json!({
                "email": email,
                "auth_key_hash": auth_key_hash,
            }))
            .map_err(|e| transport_error("login", e))?
            .into_json()
            .map_err(|e| PassVaultError::Transport(format!("login response body: {e}")))?;
        Ok(resp.access_token)
    }

    fn load_vault(&self, token: &str) -> Result<VaultFetch> {
        let result = self
            .agent
            .get(&self.url("/vault/"))
            .set("Authorization", &Self::bearer(token))
            .call();

        match result {
            Ok(resp) => {
                let wire: WireVault = resp
                    .into_json()
                    .map_err(|e| PassVaultError::Transport(format!("vault response body: {e}")))?;
                Ok(VaultFetch::Found(wire))
            }
            // 404 is not an error here: it is the server confirming
            // that no vault exists for this account yet.
            Err(ureq::Error::Status(404, _)) => Ok(VaultFetch::Absent),
            Err(e) => Err(transport_error("load vault", e)),
        }
    }

    fn create_vault(&self, token: &str, vault: &WireVault) -> Result<()> {
        self.agent
            .post(&self.url("/vault/"))
            .set("Authorization", &Self::bearer(token))
            .send_json(vault)
            .map_err(|e| transport_error("create vault", e))?;
        Ok(())
    }

    fn update_vault(&self, token: &str, vault: &WireVault) -> Result<()> {
        self.agent
            .put(&self.url("/vault/"))
            .set("Authorization", &Self::bearer(token))
            .send_json(vault)
            .map_err(|e| transport_error("update vault", e))?;
        Ok(())
    }
}

/// Map a ureq error to a transport error, pulling the server's
/// `detail` message out of the body when it carries one.
fn transport_error(context: &str, err: ureq::Error) -> PassVaultError {
    match err {
        ureq::Error::Status(code, resp) => {
            let detail = resp
                .into_json::<serde_json::Value>()
                .ok()
                .and_then(|body| {
                    body.get("detail")
                        .and_then(|d| d.as_str())
                        .map(str::to_string)
                });
            match detail {
                Some(msg) => PassVaultError::Transport(format!("{context}: {msg} ({code})")),
                None => PassVaultError::Transport(format!("{context}: server returned {code}")),
            }
        }
        ureq::Error::Transport(t) => PassVaultError::Transport(format!("{context}: {t}")),
    }
}
