use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TesseraError};

/// Name of the per-user base directory, relative to the home directory.
pub const HOME_DIR_NAME: &str = ".tessera";

/// User-level configuration, loaded from `<tessera home>/config.toml`.
///
/// Every field has a sensible default so Tessera works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the Tessera home) holding key files.
    #[serde(default = "default_key_dir")]
    pub key_dir: String,

    /// Directory (relative to the Tessera home) holding vault files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Load the newest key and vault on start-up, creating them if absent.
    #[serde(default = "default_auto_open")]
    pub auto_open: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_key_dir() -> String {
    "Keys".to_string()
}

fn default_data_dir() -> String {
    "Data".to_string()
}

fn default_auto_open() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_dir: default_key_dir(),
            data_dir: default_data_dir(),
            auto_open: default_auto_open(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the Tessera home.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<home>/config.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = home.join(Self::FILE_NAME);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            TesseraError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Directory holding key files, e.g. `~/.tessera/Keys`.
    pub fn key_dir(&self, home: &Path) -> PathBuf {
        home.join(&self.key_dir)
    }

    /// Directory holding vault files, e.g. `~/.tessera/Data`.
    pub fn data_dir(&self, home: &Path) -> PathBuf {
        home.join(&self.data_dir)
    }
}

/// The default Tessera home: `~/.tessera`.
pub fn default_home() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(HOME_DIR_NAME))
        .ok_or_else(|| TesseraError::Config("cannot determine the home directory".into()))
}

// ── Tests ────────────────────────────────────────────────────────────
