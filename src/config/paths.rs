//! File naming conventions for keys and vaults under the Tessera home.
//!
//! New files are named `<prefix><unix-seconds>.<ext>`; a `-N` suffix is
//! appended when two files are created within the same second. "Latest"
//! means the highest (timestamp, suffix) pair.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::errors::Result;

pub const KEY_PREFIX: &str = "tessera_key_";
pub const KEY_EXTENSION: &str = "key";
pub const VAULT_PREFIX: &str = "tessera_pw_";
pub const VAULT_EXTENSION: &str = "json";

/// Pick a path in `dir` that does not exist yet.
pub fn timestamped_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stamp = Utc::now().timestamp();
    let first = dir.join(format!("{prefix}{stamp}.{extension}"));
    if !first.exists() {
        return first;
    }

    (1u32..)
        .map(|n| dir.join(format!("{prefix}{stamp}-{n}.{extension}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// Find the most recently named file matching the convention in `dir`.
///
/// A missing directory simply has no files.
pub fn latest_in(dir: &Path, prefix: &str, extension: &str) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut best: Option<((i64, u32), PathBuf)> = None;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(order) = parse_name(&name.to_string_lossy(), prefix, extension) else {
            continue;
        };
        if best.as_ref().map_or(true, |(current, _)| order > *current) {
            best = Some((order, entry.path()));
        }
    }

    Ok(best.map(|(_, path)| path))
}

/// Resolve a user-supplied file argument.
///
/// Bare file names are looked up in `dir`; anything with a directory
/// component (or an absolute path) is used as given.
pub fn resolve_in(dir: &Path, raw: &str) -> PathBuf {
    let candidate = Path::new(raw);
    if candidate.is_absolute() || candidate.components().count() > 1 {
        candidate.to_path_buf()
    } else {
        dir.join(candidate)
    }
}

fn parse_name(name: &str, prefix: &str, extension: &str) -> Option<(i64, u32)> {
    let stem = name
        .strip_prefix(prefix)?
        .strip_suffix(extension)?
        .strip_suffix('.')?;

    match stem.split_once('-') {
        Some((stamp, n)) => Some((stamp.parse().ok()?, n.parse().ok()?)),
        None => Some((stem.parse().ok()?, 0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn timestamped_path_avoids_existing_files() {
        let dir = TempDir::new().unwrap();
        let first = timestamped_path(dir.path(), KEY_PREFIX, KEY_EXTENSION);
        fs::write(&first, b"x").unwrap();

        let second = timestamped_path(dir.path(), KEY_PREFIX, KEY_EXTENSION);
        assert_ne!(first, second);
        assert!(!second.exists());
    }

    #[test]
    fn latest_in_prefers_highest_timestamp_then_suffix() {
        let dir = TempDir::new().unwrap();
        for name in [
            "tessera_pw_100.json",
            "tessera_pw_900.json",
            "tessera_pw_900-2.json",
            "tessera_pw_1000.json",
            "tessera_pw_1000-1.json",
            "notes.json",
            "tessera_pw_abc.json",
            "tessera_key_5000.key",
        ] {
            fs::write(dir.path().join(name), b"{}").unwrap();
        }

        let latest = latest_in(dir.path(), VAULT_PREFIX, VAULT_EXTENSION)
            .unwrap()
            .unwrap();
        assert_eq!(latest.file_name().unwrap(), "tessera_pw_1000-1.json");
    }

    #[test]
    fn latest_in_missing_directory_is_none() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(latest_in(&missing, KEY_PREFIX, KEY_EXTENSION)
            .unwrap()
            .is_none());
    }

    #[test]
    fn resolve_in_joins_bare_names_only() {
        let base = Path::new("/home/user/.tessera/Keys");
        assert_eq!(
            resolve_in(base, "tessera_key_1.key"),
            base.join("tessera_key_1.key")
        );
        assert_eq!(resolve_in(base, "./mine.key"), PathBuf::from("./mine.key"));
        assert_eq!(resolve_in(base, "/tmp/a.key"), PathBuf::from("/tmp/a.key"));
    }
}
