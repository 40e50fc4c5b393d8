//! Command handlers. Each takes the session's `VaultEngine` explicitly.

pub mod add;
pub mod delete;
pub mod fetch;
pub mod generate_key;
pub mod help;
pub mod list;
pub mod load_key;
pub mod load_vault;
pub mod new_vault;
pub mod startup;
pub mod status;
