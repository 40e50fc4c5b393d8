//! Configuration: user settings and on-disk naming conventions.

pub mod paths;
pub mod settings;

pub use settings::{default_home, Settings};
