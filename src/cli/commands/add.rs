//! `add` — prompt for a credential and store it.

use crate::cli::output;
use crate::cli::{arg_or_prompt, prompt_optional, prompt_secret, prompt_select};
use crate::errors::Result;
use crate::vault::{Entry, EntryType, VaultEngine};

/// Entry types offered by the type prompt, in menu order.
const ENTRY_TYPES: [EntryType; 2] = [EntryType::Password, EntryType::ApiKey];

/// Execute the `add` command.
///
/// An existing entry for the same site is replaced.
pub fn execute(engine: &mut VaultEngine, site: Option<&str>) -> Result<()> {
    // Fail before prompting if there is nowhere to store the entry.
    engine.entry_count()?;

    let site = arg_or_prompt(site, "Site name")?;
    let secret = prompt_secret(&format!("Secret for {site}"))?;
    let username = prompt_optional("Username (leave empty to skip)")?;
    let email = prompt_optional("Email (leave empty to skip)")?;
    let labels: Vec<&str> = ENTRY_TYPES.iter().map(|t| t.as_str()).collect();
    let kind = ENTRY_TYPES[prompt_select("Entry type", &labels)?];

    let entry = build_entry(site, secret, username, email, kind);
    let replaced = engine.fetch_entry(&entry.site)?.is_some();
    let site = entry.site.clone();

    engine.add_entry(entry)?;

    if replaced {
        output::success(&format!("Entry for {site} updated!"));
    } else {
        output::success(&format!("Entry for {site} added!"));
    }
    Ok(())
}

/// Assemble an entry from prompt answers.
pub fn build_entry(
    site: String,
    secret: String,
    username: Option<String>,
    email: Option<String>,
    kind: EntryType,
) -> Entry {
    Entry {
        site,
        username,
        email,
        kind,
        secret,
    }
}
