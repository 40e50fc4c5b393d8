//! In-memory index of decrypted entries, keyed by site.
//!
//! Entries keep their insertion order; overwriting a site keeps its
//! original position. Vaults are small, so lookups are a linear scan.

use super::entry::Entry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct VaultIndex {
    entries: Vec<Entry>,
}

impl VaultIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, site: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.site == site)
    }

    pub fn get(&self, site: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.site == site)
    }

    /// Insert or replace the entry for `entry.site`, returning the
    /// previous entry if there was one.
    pub fn set(&mut self, entry: Entry) -> Option<Entry> {
        match self.position(&entry.site) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i], entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Remove the entry for `site`. Returns whether one existed.
    pub fn remove(&mut self, site: &str) -> bool {
        self.take(site).is_some()
    }

    /// Remove the entry for `site`, returning it with its former position.
    pub fn take(&mut self, site: &str) -> Option<(usize, Entry)> {
        let i = self.position(site)?;
        Some((i, self.entries.remove(i)))
    }

    /// Put back an entry previously returned by `take`.
    pub fn restore(&mut self, position: usize, entry: Entry) {
        let position = position.min(self.entries.len());
        self.entries.insert(position, entry);
    }

    /// `(site, entry)` pairs in insertion order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|e| (e.site.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
