//! `passvault list` — display vault entries in a table.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, filter: Option<&str>) -> Result<()> {
    let session = open_session(cli)?;

    let entries = match filter {
        Some(term) => session.search(term),
        None => session.entries().iter().collect(),
    };

    output::info(&format!(
        "{} — {} entr{} shown of {}",
        session.email(),
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" },
        session.entry_count()
    ));

    output::print_entries_table(&entries);

    session.logout();
    Ok(())
}
