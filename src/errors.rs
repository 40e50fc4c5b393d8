use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Tessera.
#[derive(Debug, Error)]
pub enum TesseraError {
    // --- Lookup errors ---
    #[error("File not found at {0}")]
    NotFound(PathBuf),

    // --- Key errors ---
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Key file already exists at {0}")]
    KeyfileAlreadyExists(PathBuf),

    #[error("No encryption key loaded; run `generate-key` or `load-key <path>` first")]
    KeyNotLoaded,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: wrong key or corrupted entry")]
    DecryptionFailed,

    // --- Vault errors ---
    #[error("No vault open; run `new-vault` or `load-vault <path>` first")]
    NoVaultOpen,

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Malformed vault data: {0}")]
    Deserialization(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for Tessera results.
pub type Result<T> = std::result::Result<T, TesseraError>;
