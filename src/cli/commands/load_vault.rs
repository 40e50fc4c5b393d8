//! `load-vault` — open an existing vault file with the active key.

use crate::cli::output;
use crate::cli::{arg_or_prompt, Workspace};
use crate::config::paths;
use crate::errors::Result;
use crate::vault::VaultEngine;

/// Execute the `load-vault` command.
pub fn execute(engine: &mut VaultEngine, ws: &Workspace, path: Option<&str>) -> Result<()> {
    let raw = arg_or_prompt(path, "Path to the password file")?;
    let path = paths::resolve_in(&ws.data_dir(), &raw);

    engine.load_vault(&path)?;

    output::success(&format!(
        "Password file loaded: {} ({} entries)",
        path.display(),
        engine.entry_count()?
    ));
    Ok(())
}
