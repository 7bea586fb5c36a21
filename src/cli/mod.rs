//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::generator::PasswordPolicy;
use crate::session::{Session, MIN_PASSWORD_LEN};

/// PassVault CLI: zero-knowledge password manager client.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Zero-knowledge password manager — the server never sees your master password or vault contents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server API base URL (overrides .passvault.toml)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Account email
    #[arg(short, long, global = true, env = "PASSVAULT_EMAIL")]
    pub email: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new account
    Register,

    /// List vault entries
    List {
        /// Only show entries whose site or username contains this term
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Add a new entry
    Add {
        /// Site or service name (e.g. github)
        site: String,

        /// Username at the site (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Site URL
        #[arg(long, default_value = "")]
        url: String,

        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,

        /// Generate the password instead of prompting for one
        #[arg(short, long)]
        generate: bool,

        #[command(flatten)]
        generator: GenerateOpts,
    },

    /// Print an entry's password
    Get {
        /// Site name of the entry
        site: String,

        /// Copy to the clipboard instead of printing
        #[arg(short, long)]
        copy: bool,
    },

    /// Replace an entry's password
    Edit {
        /// Site name of the entry
        site: String,

        /// Generate the new password instead of prompting for one
        #[arg(short, long)]
        generate: bool,

        #[command(flatten)]
        generator: GenerateOpts,
    },

    /// Remove an entry
    Remove {
        /// Site name of the entry
        site: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a password without touching the vault
    Generate {
        #[command(flatten)]
        generator: GenerateOpts,
    },
}

/// Password generator flags shared by `add`, `edit`, and `generate`.
#[derive(clap::Args)]
pub struct GenerateOpts {
    /// Password length
    #[arg(long, default_value = "20")]
    pub length: usize,

    /// Exclude uppercase letters
    #[arg(long)]
    pub no_upper: bool,

    /// Exclude lowercase letters
    #[arg(long)]
    pub no_lower: bool,

    /// Exclude digits
    #[arg(long)]
    pub no_digits: bool,

    /// Exclude symbols
    #[arg(long)]
    pub no_symbols: bool,
}

impl GenerateOpts {
    /// Convert CLI flags into a generator policy.
    pub fn policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            length: self.length,
            upper: !self.no_upper,
            lower: !self.no_lower,
            digits: !self.no_digits,
            symbols: !self.no_symbols,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (CI/scripting)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_master_password() -> Result<Zeroizing<String>> {
    // Check the environment variable first (CI/scripting friendly).
    if let Ok(pw) = std::env::var("PASSVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during
/// `register`).  Also respects `PASSVAULT_PASSWORD` for scripted usage.
/// Enforces the minimum password length.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_master_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("PASSVAULT_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(PassVaultError::Validation(format!(
                    "master password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation("Confirm master password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Master password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Resolve the account email from `--email` / `PASSVAULT_EMAIL`, or
/// prompt for it.
pub fn resolve_email(cli: &Cli) -> Result<String> {
    if let Some(email) = &cli.email {
        return Ok(email.clone());
    }

    let email: String = dialoguer::Input::new()
        .with_prompt("Email")
        .interact_text()
        .map_err(|e| PassVaultError::CommandFailed(format!("email prompt: {e}")))?;
    Ok(email)
}

/// Load settings, honoring the `--server` override.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::discover()?;
    if let Some(server) = &cli.server {
        settings.server_url = server.clone();
    }
    Ok(settings)
}

/// Build the HTTP client for the configured server.
pub fn server_api(settings: &Settings) -> crate::api::HttpServer {
    crate::api::HttpServer::new(&settings.server_url, settings.timeout())
}

/// Log in and return a live session.
///
/// Every vault command goes through here: the token and the encryption
/// key exist only for the lifetime of this one process.
pub fn open_session(cli: &Cli) -> Result<Session> {
    let settings = load_settings(cli)?;
    let email = resolve_email(cli)?;
    let password = prompt_master_password()?;

    Session::login(
        Box::new(server_api(&settings)),
        &email,
        &password,
        &settings.kdf_params(),
    )
}
