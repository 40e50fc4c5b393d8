//! Start-up: pick the key and vault the session begins with.
//!
//! Explicit `--key` / `--vault` files win. Otherwise, with auto-open
//! enabled, the newest key in the key directory is loaded (or a new one
//! generated) and the newest vault in the data directory is loaded (or
//! a new one created).

use std::path::Path;

use crate::cli::output;
use crate::cli::Workspace;
use crate::config::paths::{self, KEY_EXTENSION, KEY_PREFIX, VAULT_EXTENSION, VAULT_PREFIX};
use crate::errors::Result;
use crate::vault::{EngineState, VaultEngine};

/// Files requested on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StartupFiles<'a> {
    pub key: Option<&'a Path>,
    pub vault: Option<&'a Path>,
    pub auto_open: bool,
}

/// Open the start-up key and vault.
pub fn execute(engine: &mut VaultEngine, ws: &Workspace, files: &StartupFiles<'_>) -> Result<()> {
    open_key(engine, ws, files)?;
    if engine.state() == EngineState::Uninitialized {
        return Ok(());
    }
    open_vault(engine, ws, files)
}

fn open_key(engine: &mut VaultEngine, ws: &Workspace, files: &StartupFiles<'_>) -> Result<()> {
    if let Some(path) = files.key {
        engine.load_key(path)?;
        output::success(&format!("Encryption key loaded: {}", path.display()));
        return Ok(());
    }
    if !files.auto_open {
        return Ok(());
    }

    let key_dir = ws.key_dir();
    match paths::latest_in(&key_dir, KEY_PREFIX, KEY_EXTENSION)? {
        Some(path) => {
            engine.load_key(&path)?;
            output::success(&format!("Encryption key loaded: {}", path.display()));
        }
        None => {
            let path = engine.generate_key(&key_dir)?;
            output::success(&format!("Encryption key generated: {}", path.display()));
        }
    }
    Ok(())
}

fn open_vault(engine: &mut VaultEngine, ws: &Workspace, files: &StartupFiles<'_>) -> Result<()> {
    if let Some(path) = files.vault {
        engine.load_vault(path)?;
        output::success(&format!("Password file loaded: {}", path.display()));
        return Ok(());
    }
    if !files.auto_open {
        return Ok(());
    }

    let data_dir = ws.data_dir();
    match paths::latest_in(&data_dir, VAULT_PREFIX, VAULT_EXTENSION)? {
        Some(path) => {
            engine.load_vault(&path)?;
            output::success(&format!("Password file loaded: {}", path.display()));
        }
        None => {
            let path = engine.create_vault_in(&data_dir)?;
            output::success(&format!("Password file created: {}", path.display()));
        }
    }
    Ok(())
}
