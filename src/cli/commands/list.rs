//! `list` — display all entries of the open vault, without secrets.

use crate::cli::output;
use crate::errors::Result;
use crate::vault::VaultEngine;

/// Execute the `list` command.
pub fn execute(engine: &VaultEngine) -> Result<()> {
    let count = engine.entry_count()?;
    let noun = if count == 1 { "entry" } else { "entries" };
    output::info(&format!("{count} {noun}"));
    output::print_entries_table(engine.entries()?);
    Ok(())
}
