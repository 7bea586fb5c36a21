//! `passvault get` — retrieve a single entry's password.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, site: &str, copy: bool) -> Result<()> {
    let session = open_session(cli)?;

    let entry = session
        .find_by_site(site)
        .ok_or_else(|| PassVaultError::EntryNotFound(site.to_string()))?;

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| PassVaultError::CommandFailed(format!("clipboard: {e}")))?;
        clipboard
            .set_text(entry.password.clone())
            .map_err(|e| PassVaultError::CommandFailed(format!("clipboard: {e}")))?;
        output::success(&format!("Password for '{site}' copied to clipboard"));
    } else {
        // Print the password to stdout, keeping it pipeable.
        println!("{}", entry.password);
    }

    session.logout();
    Ok(())
}
