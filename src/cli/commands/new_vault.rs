//! `new-vault` — create an empty vault file and open it.

use crate::cli::output;
use crate::cli::Workspace;
use crate::config::paths;
use crate::errors::Result;
use crate::vault::VaultEngine;

/// Execute the `new-vault` command.
///
/// Without an argument the vault gets a timestamped name in the data
/// directory.
pub fn execute(engine: &mut VaultEngine, ws: &Workspace, path: Option<&str>) -> Result<()> {
    let path = match path {
        Some(raw) => {
            let path = paths::resolve_in(&ws.data_dir(), raw);
            engine.create_vault(&path)?;
            path
        }
        None => engine.create_vault_in(&ws.data_dir())?,
    };

    output::success(&format!("Password file created: {}", path.display()));
    Ok(())
}
