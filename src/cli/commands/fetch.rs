//! `fetch` — show one entry, secret included.

use crate::cli::arg_or_prompt;
use crate::cli::output;
use crate::errors::Result;
use crate::vault::VaultEngine;

/// Execute the `fetch` command.
pub fn execute(engine: &VaultEngine, site: Option<&str>) -> Result<()> {
    let site = arg_or_prompt(site, "Site to fetch")?;

    match engine.fetch_entry(&site)? {
        Some(entry) => {
            output::info(&format!("Entry for {site}"));
            output::print_entry(entry);
        }
        None => output::warning(&format!("No entry was found for {site}")),
    }

    Ok(())
}
