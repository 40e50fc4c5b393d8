//! Vault file format and atomic persistence.
//!
//! A vault file is a pretty-printed JSON object mapping each site to
//! its encrypted entry:
//!
//! ```text
//! {
//!   "github.com": "<base64 nonce || ciphertext || tag>",
//!   "openai": "..."
//! }
//! ```
//!
//! Key order is preserved on read and write so the file follows the
//! order entries were added in.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::codec::CipherText;
use crate::errors::{Result, TesseraError};

/// The on-disk mapping of site -> encrypted entry, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultDocument {
    records: Vec<(String, CipherText)>,
}

impl VaultDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Callers are responsible for site uniqueness.
    pub fn push(&mut self, site: impl Into<String>, payload: CipherText) {
        self.records.push((site.into(), payload));
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &CipherText)> {
        self.records
            .iter()
            .map(|(site, payload)| (site.as_str(), payload))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Serialize for VaultDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for VaultDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = VaultDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of site names to encrypted entries")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut doc = VaultDocument::new();
                while let Some((site, payload)) = map.next_entry::<String, String>()? {
                    if doc.records.iter().any(|(existing, _)| *existing == site) {
                        return Err(serde::de::Error::custom(format!("duplicate site '{site}'")));
                    }
                    doc.push(site, CipherText::from(payload));
                }
                Ok(doc)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Read a vault file from disk.
pub fn read_vault_file(path: &Path) -> Result<VaultDocument> {
    if !path.exists() {
        return Err(TesseraError::NotFound(path.to_path_buf()));
    }

    let data = fs::read_to_string(path)?;
    let doc: VaultDocument = serde_json::from_str(&data).map_err(|e| {
        TesseraError::Deserialization(format!("{}: {e}", path.display()))
    })?;

    tracing::debug!(path = %path.display(), records = doc.len(), "vault file read");
    Ok(doc)
}

/// Write a vault file to disk **atomically**.
///
/// 1. Serialize the document to JSON.
/// 2. Write and fsync a temp file in the same directory.
/// 3. Rename the temp file over the target path.
///
/// The rename ensures readers never see a half-written file. If any
/// step fails the temp file is removed and the target is untouched.
pub fn write_vault_file(path: &Path, doc: &VaultDocument) -> Result<()> {
    let mut buf = serde_json::to_vec_pretty(doc)
        .map_err(|e| TesseraError::Serialization(format!("vault: {e}")))?;
    buf.push(b'\n');

    let tmp_path = temp_path_for(path);

    if let Err(e) = write_synced(&tmp_path, &buf).and_then(|()| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    tracing::debug!(path = %path.display(), records = doc.len(), "vault file written");
    Ok(())
}

/// Sibling temp file used while rewriting `path`.
///
/// It lives in the same directory so the final rename stays on one
/// filesystem.
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doc(pairs: &[(&str, &str)]) -> VaultDocument {
        let mut doc = VaultDocument::new();
        for (site, payload) in pairs {
            doc.push(*site, CipherText::from(payload.to_string()));
        }
        doc
    }

    #[test]
    fn write_then_read_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");
        let original = doc(&[("zebra", "AAAA"), ("alpha", "BBBB"), ("mid", "CCCC")]);

        write_vault_file(&path, &original).unwrap();
        let loaded = read_vault_file(&path).unwrap();

        assert_eq!(loaded, original);
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn empty_document_is_an_empty_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");

        write_vault_file(&path, &VaultDocument::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");
        assert!(read_vault_file(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = read_vault_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(TesseraError::NotFound(_))));
    }

    #[test]
    fn malformed_documents_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");

        for bad in [
            "",
            "[]",
            r#"{"a": 1}"#,
            r#"{"a": "x", "a": "y"}"#,
            "github.com:gAAAAB...\n",
        ] {
            fs::write(&path, bad).unwrap();
            assert!(
                matches!(read_vault_file(&path), Err(TesseraError::Deserialization(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn stale_temp_file_does_not_block_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");
        fs::write(temp_path_for(&path), b"{\"half\": \"writ").unwrap();

        write_vault_file(&path, &doc(&[("a", "AAAA")])).unwrap();

        assert_eq!(read_vault_file(&path).unwrap().len(), 1);
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn failed_write_leaves_previous_file_intact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");
        write_vault_file(&path, &doc(&[("a", "AAAA")])).unwrap();
        let before = fs::read(&path).unwrap();

        // A directory squatting on the temp path makes the write fail.
        fs::create_dir(temp_path_for(&path)).unwrap();
        let result = write_vault_file(&path, &doc(&[("b", "BBBB")]));

        assert!(matches!(result, Err(TesseraError::Io(_))));
        assert_eq!(fs::read(&path).unwrap(), before);
    }
}
