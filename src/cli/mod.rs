//! CLI module — Clap argument parser, the interactive shell, output
//! helpers, and command implementations.

pub mod commands;
pub mod output;
pub mod shell;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{default_home, Settings};
use crate::errors::{Result, TesseraError};
use crate::vault::VaultEngine;

/// Tessera: a terminal password manager.
#[derive(Parser)]
#[command(
    name = "tessera",
    about = "A terminal password manager, built simply",
    version
)]
pub struct Cli {
    /// Base directory for keys, vaults, and config.toml (default: ~/.tessera)
    #[arg(long, env = "TESSERA_HOME")]
    pub home: Option<PathBuf>,

    /// Key file to load on start-up instead of the newest one
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Vault file to load on start-up instead of the newest one
    #[arg(long)]
    pub vault: Option<PathBuf>,

    /// Start without loading or creating any key or vault
    #[arg(long)]
    pub no_auto_open: bool,
}

/// Resolved locations and settings for this session.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub home: PathBuf,
    pub settings: Settings,
}

impl Workspace {
    /// Resolve the Tessera home from the CLI (or `~/.tessera`) and load
    /// its settings.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let home = match &cli.home {
            Some(home) => home.clone(),
            None => default_home()?,
        };
        Self::at(home)
    }

    /// Use `home` as the Tessera home.
    pub fn at(home: PathBuf) -> Result<Self> {
        let settings = Settings::load(&home)?;
        Ok(Self { home, settings })
    }

    pub fn key_dir(&self) -> PathBuf {
        self.settings.key_dir(&self.home)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.settings.data_dir(&self.home)
    }
}

/// Open the start-up key and vault, then hand the engine to the shell.
pub fn run(cli: &Cli, engine: &mut VaultEngine) -> Result<()> {
    let workspace = Workspace::resolve(cli)?;
    output::banner();

    let auto_open = workspace.settings.auto_open && !cli.no_auto_open;
    let startup = commands::startup::StartupFiles {
        key: cli.key.as_deref(),
        vault: cli.vault.as_deref(),
        auto_open,
    };

    // A broken start-up file should not lock the user out of the shell.
    if let Err(e) = commands::startup::execute(engine, &workspace, &startup) {
        output::error(&e.to_string());
        output::tip("Use `generate-key`, `load-key`, `new-vault`, or `load-vault` to continue.");
    }

    shell::run(engine, &workspace)
}

// ---------------------------------------------------------------------------
// Shared prompt helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Use `arg` if given, otherwise ask for a non-empty value.
pub fn arg_or_prompt(arg: Option<&str>, prompt: &str) -> Result<String> {
    match arg {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => prompt_text(prompt),
    }
}

/// Prompt for a required line of text.
pub fn prompt_text(prompt: &str) -> Result<String> {
    let value: String = dialoguer::Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| TesseraError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(value.trim().to_string())
}

/// Prompt for an optional line of text; an empty answer means `None`.
pub fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    let value: String = dialoguer::Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| TesseraError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(non_empty(value))
}

/// Prompt for a secret without echoing it.
pub fn prompt_secret(prompt: &str) -> Result<String> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| TesseraError::CommandFailed(format!("password prompt: {e}")))
}

/// Prompt the user to pick one of `items`, returning its index.
pub fn prompt_select(prompt: &str, items: &[&str]) -> Result<usize> {
    dialoguer::Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| TesseraError::CommandFailed(format!("selection prompt: {e}")))
}

/// Trim `value`, mapping blank input to `None`.
pub fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn non_empty_trims_and_drops_blanks() {
        assert_eq!(non_empty("  alice ".into()), Some("alice".into()));
        assert_eq!(non_empty("   ".into()), None);
        assert_eq!(non_empty(String::new()), None);
    }

    #[test]
    fn arg_or_prompt_prefers_given_argument() {
        assert_eq!(
            arg_or_prompt(Some(" github.com "), "unused").unwrap(),
            "github.com"
        );
    }

    #[test]
    fn cli_parses_home_and_files() {
        let cli = Cli::parse_from([
            "tessera",
            "--home",
            "/tmp/tessera",
            "--key",
            "a.key",
            "--vault",
            "v.json",
            "--no-auto-open",
        ]);
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/tessera")));
        assert_eq!(cli.key, Some(PathBuf::from("a.key")));
        assert_eq!(cli.vault, Some(PathBuf::from("v.json")));
        assert!(cli.no_auto_open);
    }

    #[test]
    fn workspace_uses_settings_directories() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "key_dir = \"k\"\n").unwrap();

        let ws = Workspace::at(tmp.path().to_path_buf()).unwrap();
        assert_eq!(ws.key_dir(), tmp.path().join("k"));
        assert_eq!(ws.data_dir(), tmp.path().join("Data"));
    }
}
