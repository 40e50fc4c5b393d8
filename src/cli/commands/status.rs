//! `status` — show which key and vault are active.

use crate::cli::output;
use crate::cli::Workspace;
use crate::errors::Result;
use crate::vault::{EngineState, VaultEngine};

/// Execute the `status` command.
pub fn execute(engine: &VaultEngine, ws: &Workspace) -> Result<()> {
    let state = match engine.state() {
        EngineState::Uninitialized => "no key loaded",
        EngineState::KeyReady => "key loaded, no vault open",
        EngineState::VaultReady => "ready",
    };

    let rows = [
        ("State", state.to_string()),
        ("Home", ws.home.display().to_string()),
        (
            "Key",
            engine
                .key_fingerprint()
                .map_or_else(|| "-".to_string(), |f| format!("fingerprint {f}")),
        ),
        (
            "Vault",
            engine
                .vault_path()
                .map_or_else(|| "-".to_string(), |p| p.display().to_string()),
        ),
        (
            "Entries",
            engine
                .entry_count()
                .map_or_else(|_| "-".to_string(), |n| n.to_string()),
        ),
    ];

    output::print_pairs(&rows);
    Ok(())
}
