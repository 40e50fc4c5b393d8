//! `generate-key` — create a new encryption key and make it active.

use crate::cli::output;
use crate::cli::Workspace;
use crate::config::paths;
use crate::errors::Result;
use crate::vault::{EngineState, VaultEngine};

/// Execute the `generate-key` command.
///
/// Without an argument the key gets a timestamped name in the key
/// directory.
pub fn execute(engine: &mut VaultEngine, ws: &Workspace, path: Option<&str>) -> Result<()> {
    let had_vault = engine.state() == EngineState::VaultReady;

    let path = match path {
        Some(raw) => {
            let path = paths::resolve_in(&ws.key_dir(), raw);
            engine.generate_key_at(&path)?;
            path
        }
        None => engine.generate_key(&ws.key_dir())?,
    };

    output::success(&format!("Encryption key generated: {}", path.display()));
    output::warning("Keep this file safe! Without it your vaults cannot be decrypted.");

    if had_vault {
        output::info("The open vault was closed because it uses a different key.");
        output::tip("Run `new-vault` to start a vault for this key.");
    }

    Ok(())
}
