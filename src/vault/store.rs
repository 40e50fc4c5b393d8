//! The vault engine: the single owner of the active key and vault.
//!
//! `VaultEngine` moves through three states:
//!
//! ```text
//! Uninitialized --(generate/load key)--> KeyReady --(create/load vault)--> VaultReady
//! ```
//!
//! The index holds decrypted entries. After every change to it, all
//! entries are re-encrypted and the whole vault file is rewritten
//! atomically. If that write fails, the index change is rolled back so
//! memory and disk never disagree.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::crypto::{self, VaultKey};
use crate::errors::{Result, TesseraError};

use super::codec::{decrypt_entry, encrypt_entry};
use super::entry::Entry;
use super::format::{self, VaultDocument};
use super::index::VaultIndex;
use crate::config::paths::{self, VAULT_EXTENSION, VAULT_PREFIX};

/// Lifecycle state of a `VaultEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No key and no vault.
    Uninitialized,
    /// A key is loaded but no vault is open.
    KeyReady,
    /// A key is loaded and a vault is open.
    VaultReady,
}

/// The vault that is currently open.
struct OpenVault {
    path: PathBuf,
    index: VaultIndex,
}

impl OpenVault {
    /// Encrypt every entry and write the vault file.
    fn save(&self, key: &VaultKey) -> Result<()> {
        let mut doc = VaultDocument::new();
        for (site, entry) in self.index.entries() {
            doc.push(site, encrypt_entry(entry, key)?);
        }
        format::write_vault_file(&self.path, &doc)
    }
}

/// Owns the active key and the open vault. Construct one per process
/// and hand it to whoever needs to operate on the vault.
#[derive(Default)]
pub struct VaultEngine {
    key: Option<VaultKey>,
    vault: Option<OpenVault>,
}

impl VaultEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EngineState {
        match (&self.key, &self.vault) {
            (Some(_), Some(_)) => EngineState::VaultReady,
            (Some(_), None) => EngineState::KeyReady,
            (None, _) => EngineState::Uninitialized,
        }
    }

    // ------------------------------------------------------------------
    // Key lifecycle
    // ------------------------------------------------------------------

    /// Generate a new key file with a timestamped name in `dir` and make
    /// it the active key. Returns the path of the new key file.
    pub fn generate_key(&mut self, dir: &Path) -> Result<PathBuf> {
        let (key, path) = crypto::generate_keyfile_in(dir)?;
        self.install_key(key);
        Ok(path)
    }

    /// Generate a new key file at exactly `path` and make it active.
    pub fn generate_key_at(&mut self, path: &Path) -> Result<()> {
        let key = crypto::generate_keyfile(path)?;
        self.install_key(key);
        Ok(())
    }

    /// Load an existing key file and make it active.
    pub fn load_key(&mut self, path: &Path) -> Result<()> {
        let key = crypto::load_keyfile(path)?;
        self.install_key(key);
        Ok(())
    }

    /// Entries of an open vault were written under the old key, so
    /// switching to a different key closes the vault instead of re-keying
    /// it. Reinstalling the active key keeps the vault open.
    fn install_key(&mut self, key: VaultKey) {
        let same_key = self.key_fingerprint() == Some(key.fingerprint());
        if !same_key {
            if let Some(previous) = self.vault.take() {
                debug!(path = %previous.path.display(), "closing vault after key change");
            }
        }
        debug!(fingerprint = key.fingerprint(), "key installed");
        self.key = Some(key);
    }

    fn key(&self) -> Result<&VaultKey> {
        self.key.as_ref().ok_or(TesseraError::KeyNotLoaded)
    }

    // ------------------------------------------------------------------
    // Vault lifecycle
    // ------------------------------------------------------------------

    /// Create an empty vault at `path` and open it.
    pub fn create_vault(&mut self, path: &Path) -> Result<()> {
        self.create_vault_with(path, Vec::new())
    }

    /// Create an empty vault under a timestamped name in `dir`.
    pub fn create_vault_in(&mut self, dir: &Path) -> Result<PathBuf> {
        let path = paths::timestamped_path(dir, VAULT_PREFIX, VAULT_EXTENSION);
        self.create_vault(&path)?;
        Ok(path)
    }

    /// Create a vault at `path` seeded with `entries` and open it.
    ///
    /// Later entries for the same site replace earlier ones. The file is
    /// written once, after every entry has been validated.
    pub fn create_vault_with(
        &mut self,
        path: &Path,
        entries: impl IntoIterator<Item = Entry>,
    ) -> Result<()> {
        let key = self.key()?;
        if path.exists() {
            return Err(TesseraError::VaultAlreadyExists(path.to_path_buf()));
        }

        let mut index = VaultIndex::new();
        for entry in entries {
            entry.validate()?;
            index.set(entry);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let vault = OpenVault {
            path: path.to_path_buf(),
            index,
        };
        vault.save(key)?;
        debug!(path = %path.display(), entries = vault.index.len(), "vault created");

        self.vault = Some(vault);
        Ok(())
    }

    /// Open the vault at `path`, decrypting every entry with the active key.
    ///
    /// The load is all-or-nothing: the first entry that fails to decrypt
    /// or parse aborts it, and any previously open vault stays open.
    pub fn load_vault(&mut self, path: &Path) -> Result<()> {
        let key = self.key()?;
        let doc = format::read_vault_file(path)?;

        let mut index = VaultIndex::new();
        for (site, payload) in doc.iter() {
            let entry = decrypt_entry(payload, key)?;
            if entry.site != site {
                return Err(TesseraError::Deserialization(format!(
                    "entry stored under '{site}' belongs to '{}'",
                    entry.site
                )));
            }
            index.set(entry);
        }

        debug!(path = %path.display(), entries = index.len(), "vault loaded");
        self.vault = Some(OpenVault {
            path: path.to_path_buf(),
            index,
        });
        Ok(())
    }

    fn open_vault(&self) -> Result<&OpenVault> {
        self.vault.as_ref().ok_or(TesseraError::NoVaultOpen)
    }

    fn open_vault_mut(&mut self) -> Result<&mut OpenVault> {
        self.vault.as_mut().ok_or(TesseraError::NoVaultOpen)
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Add an entry, replacing any existing entry for the same site,
    /// and save the vault.
    pub fn add_entry(&mut self, entry: Entry) -> Result<()> {
        entry.validate()?;
        let vault = self.open_vault_mut()?;

        let site = entry.site.clone();
        let previous = vault.index.set(entry);

        if let Err(e) = self.save_vault() {
            let vault = self.open_vault_mut()?;
            match previous {
                Some(old) => {
                    vault.index.set(old);
                }
                None => {
                    vault.index.remove(&site);
                }
            }
            return Err(e);
        }

        debug!(site = %site, "entry saved");
        Ok(())
    }

    /// Delete the entry for `site`.
    ///
    /// Returns `false` without touching the file when there is no such
    /// entry.
    pub fn delete_entry(&mut self, site: &str) -> Result<bool> {
        let Some((position, removed)) = self.open_vault_mut()?.index.take(site) else {
            return Ok(false);
        };

        if let Err(e) = self.save_vault() {
            self.open_vault_mut()?.index.restore(position, removed);
            return Err(e);
        }

        debug!(site = %site, "entry deleted");
        Ok(true)
    }

    /// Look up the entry for `site`. No disk I/O.
    pub fn fetch_entry(&self, site: &str) -> Result<Option<&Entry>> {
        Ok(self.open_vault()?.index.get(site))
    }

    /// Re-encrypt every entry and rewrite the vault file in full.
    ///
    /// Every change to the index goes through here.
    pub(crate) fn save_vault(&self) -> Result<()> {
        self.open_vault()?.save(self.key()?)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// All entries of the open vault in insertion order.
    pub fn entries(&self) -> Result<impl ExactSizeIterator<Item = &Entry>> {
        Ok(self.open_vault()?.index.entries().map(|(_, entry)| entry))
    }

    /// Number of entries in the open vault.
    pub fn entry_count(&self) -> Result<usize> {
        Ok(self.open_vault()?.index.len())
    }

    /// Path of the open vault file, if any.
    pub fn vault_path(&self) -> Option<&Path> {
        self.vault.as_ref().map(|v| v.path.as_path())
    }

    /// Fingerprint of the active key, if any.
    pub fn key_fingerprint(&self) -> Option<&str> {
        self.key.as_ref().map(VaultKey::fingerprint)
    }
}
