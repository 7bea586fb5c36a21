//! `passvault remove` — delete an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, site: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove entry '{site}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut session = open_session(cli)?;

    let id = session
        .find_by_site(site)
        .ok_or_else(|| PassVaultError::EntryNotFound(site.to_string()))?
        .id;

    session.remove_entry(id)?;

    output::success(&format!(
        "Removed entry '{}' ({} remaining)",
        site,
        session.entry_count()
    ));

    session.logout();
    Ok(())
}
