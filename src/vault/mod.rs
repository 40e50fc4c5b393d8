//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - The `Entry` credential type (`entry`)
//! - Per-entry authenticated encryption (`codec`)
//! - The in-memory entry index (`index`)
//! - The vault file format with atomic rewrites (`format`)
//! - `VaultEngine`, which ties key, index, and file together (`store`)

pub mod codec;
pub mod entry;
pub mod format;
mod index;
pub mod store;

// Re-export the most commonly used items.
pub use codec::{decrypt_entry, encrypt_entry, CipherText};
pub use entry::{Entry, EntryType};
pub use format::{read_vault_file, write_vault_file, VaultDocument};
pub use store::{EngineState, VaultEngine};
