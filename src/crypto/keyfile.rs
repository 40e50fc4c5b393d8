//! Key store: generation and loading of the vault encryption key.
//!
//! A key file holds exactly 32 raw random bytes, the AES-256-GCM key.
//! Once read, the bytes are turned into a ready-to-use cipher and the
//! raw copy is wiped, so the rest of the program only ever holds a
//! `VaultKey`.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use aes_gcm::{Aes256Gcm, KeyInit};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::encryption;
use crate::config::paths::{self, KEY_EXTENSION, KEY_PREFIX};
use crate::errors::{Result, TesseraError};

/// Expected length of a key file in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Number of digest bytes shown in a key fingerprint.
const FINGERPRINT_LEN: usize = 8;

/// The active encryption key together with its cipher instance.
pub struct VaultKey {
    cipher: Aes256Gcm,
    fingerprint: String,
}

impl VaultKey {
    /// Build a key from raw bytes, rejecting anything that is not
    /// exactly `KEY_LEN` bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_LEN {
            return Err(TesseraError::InvalidKey(format!(
                "key must be exactly {KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let cipher = Aes256Gcm::new_from_slice(bytes)
            .map_err(|e| TesseraError::InvalidKey(format!("cipher init failed: {e}")))?;

        Ok(Self {
            cipher,
            fingerprint: fingerprint(bytes),
        })
    }

    /// Short, non-secret identifier for this key (hex of a SHA-256 prefix).
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Seal `plaintext` under this key.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        encryption::encrypt(&self.cipher, plaintext)
    }

    /// Open a payload sealed by `encrypt`.
    pub fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>> {
        encryption::decrypt(&self.cipher, sealed)
    }
}

impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultKey")
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

fn fingerprint(bytes: &[u8]) -> String {
    Sha256::digest(bytes)[..FINGERPRINT_LEN]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Generate a new random key and write it to `path`.
///
/// Refuses to overwrite an existing file. On Unix the file is created
/// with owner-only permissions. If the bytes cannot be written and synced,
/// the partial file is removed again.
pub fn generate_keyfile(path: &Path) -> Result<VaultKey> {
    if path.exists() {
        return Err(TesseraError::KeyfileAlreadyExists(path.to_path_buf()));
    }

    let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
    rand::rng().fill_bytes(&mut bytes[..]);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    let written = file.write_all(&bytes[..]).and_then(|()| file.sync_all());
    drop(file);
    discard_on_error(path, written)?;

    tracing::debug!(path = %path.display(), "key file written");
    VaultKey::from_bytes(&bytes[..])
}

/// Remove `path` if `result` is an error, then pass the error on.
fn discard_on_error(path: &Path, result: io::Result<()>) -> Result<()> {
    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(path) {
            tracing::warn!(
                path = %path.display(),
                error = %cleanup,
                "could not remove partial key file"
            );
        }
        return Err(e.into());
    }
    Ok(())
}

/// Generate a key under a fresh `tessera_key_<timestamp>.key` name in `dir`.
///
/// Returns the key and the path that was chosen.
pub fn generate_keyfile_in(dir: &Path) -> Result<(VaultKey, PathBuf)> {
    let path = paths::timestamped_path(dir, KEY_PREFIX, KEY_EXTENSION);
    let key = generate_keyfile(&path)?;
    Ok((key, path))
}

/// Load a key file from disk and validate its length.
pub fn load_keyfile(path: &Path) -> Result<VaultKey> {
    if !path.exists() {
        return Err(TesseraError::NotFound(path.to_path_buf()));
    }

    let data = Zeroizing::new(fs::read(path)?);
    let key = VaultKey::from_bytes(&data)?;

    tracing::debug!(path = %path.display(), fingerprint = key.fingerprint(), "key file loaded");
    Ok(key)
}
