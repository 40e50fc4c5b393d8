//! Cryptographic primitives for Tessera.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - The key store: key file generation, loading, and the `VaultKey`
//!   handle that owns the cipher (`keyfile`)

pub mod encryption;
pub mod keyfile;

pub use keyfile::{generate_keyfile, generate_keyfile_in, load_keyfile, VaultKey, KEY_LEN};
