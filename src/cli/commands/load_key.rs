//! `load-key` — make an existing key file the active key.

use crate::cli::output;
use crate::cli::{arg_or_prompt, Workspace};
use crate::config::paths;
use crate::errors::Result;
use crate::vault::{EngineState, VaultEngine};

/// Execute the `load-key` command.
///
/// Loading the key that is already active leaves the open vault alone.
pub fn execute(engine: &mut VaultEngine, ws: &Workspace, path: Option<&str>) -> Result<()> {
    let raw = arg_or_prompt(path, "Path to the key file")?;
    let path = paths::resolve_in(&ws.key_dir(), &raw);
    let had_vault = engine.state() == EngineState::VaultReady;

    engine.load_key(&path)?;

    output::success(&format!(
        "Encryption key loaded: {} (fingerprint {})",
        path.display(),
        engine.key_fingerprint().unwrap_or("?")
    ));

    if had_vault && engine.state() != EngineState::VaultReady {
        output::info("The open vault was closed because it uses a different key.");
        output::tip("Run `load-vault <path>` to open a vault for this key.");
    }
    Ok(())
}
