//! `passvault edit` — replace an entry's password.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_session, Cli, GenerateOpts};
use crate::errors::{PassVaultError, Result};
use crate::generator;

/// Execute the `edit` command.
pub fn execute(cli: &Cli, site: &str, generate: bool, gen_opts: &GenerateOpts) -> Result<()> {
    let (password, generated) = if generate {
        (Zeroizing::new(generator::generate(&gen_opts.policy())?), true)
    } else {
        let pw = dialoguer::Password::new()
            .with_prompt(format!("New password for {site}"))
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
        (Zeroizing::new(pw), false)
    };

    let mut session = open_session(cli)?;

    let mut entry = session
        .find_by_site(site)
        .ok_or_else(|| PassVaultError::EntryNotFound(site.to_string()))?
        .clone();
    entry.password = password.to_string();

    session.update_entry(entry)?;

    output::success(&format!("Password for '{site}' updated"));
    if generated {
        println!("{}", password.as_str());
    }

    session.logout();
    Ok(())
}
