//! `passvault generate` — print a random password without touching
//! the vault or the network.

use crate::cli::GenerateOpts;
use crate::errors::Result;
use crate::generator;

/// Execute the `generate` command.
pub fn execute(opts: &GenerateOpts) -> Result<()> {
    let password = generator::generate(&opts.policy())?;
    println!("{password}");
    Ok(())
}
