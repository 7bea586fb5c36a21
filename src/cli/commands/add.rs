//! `passvault add` — store a new entry.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_session, Cli, GenerateOpts};
use crate::errors::{PassVaultError, Result};
use crate::generator;
use crate::vault::Entry;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    site: &str,
    username: Option<&str>,
    url: &str,
    notes: &str,
    generate: bool,
    gen_opts: &GenerateOpts,
) -> Result<()> {
    let username = match username {
        Some(u) => u.to_string(),
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PassVaultError::CommandFailed(format!("username prompt: {e}")))?,
    };

    // Settle the entry password before logging in — a cancelled prompt
    // should not cost a round of key derivation.
    let (password, generated) = if generate {
        (Zeroizing::new(generator::generate(&gen_opts.policy())?), true)
    } else {
        let pw = dialoguer::Password::new()
            .with_prompt(format!("Password for {site}"))
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
        (Zeroizing::new(pw), false)
    };

    let mut session = open_session(cli)?;

    let entry = Entry::new(site, &username, &password, url, notes);
    session.add_entry(entry)?;

    output::success(&format!(
        "Entry '{}' added ({} total)",
        site,
        session.entry_count()
    ));
    if generated {
        // The user has no other way to learn a generated password.
        println!("{}", password.as_str());
    }

    session.logout();
    Ok(())
}
