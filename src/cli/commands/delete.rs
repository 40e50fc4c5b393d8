//! `delete` — remove an entry from the open vault.

use crate::cli::arg_or_prompt;
use crate::cli::output;
use crate::errors::Result;
use crate::vault::VaultEngine;

/// Execute the `delete` command.
///
/// Deleting a site that is not in the vault is reported, not an error.
pub fn execute(engine: &mut VaultEngine, site: Option<&str>) -> Result<()> {
    let site = arg_or_prompt(site, "Site to delete")?;

    if engine.delete_entry(&site)? {
        output::success(&format!("Entry for {site} deleted!"));
    } else {
        output::warning(&format!("No entry found for {site}"));
    }

    Ok(())
}
