//! `passvault register` — create a new account.

use crate::cli::output;
use crate::cli::{load_settings, prompt_new_master_password, resolve_email, server_api, Cli};
use crate::errors::Result;
use crate::session;

/// Execute the `register` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let email = resolve_email(cli)?;

    output::info("The master password encrypts your vault on this device.");
    output::warning("It cannot be recovered or reset — if you lose it, the vault is gone.");

    let password = prompt_new_master_password()?;

    let api = server_api(&settings);
    session::register(&api, &email, &password, &password, &settings.kdf_params())?;

    output::success(&format!("Account created for {email}"));
    output::tip("Run `passvault add <site>` to store your first password.");

    Ok(())
}
