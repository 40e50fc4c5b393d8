//! The credential entry stored in a vault.
//!
//! The serde layout doubles as the canonical plaintext encoding that
//! gets encrypted: fields appear in the order site, username, email,
//! type, secret, and absent optional fields are written as `null`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TesseraError};

/// What kind of secret an entry holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    #[default]
    Password,
    ApiKey,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Password => "password",
            EntryType::ApiKey => "api_key",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique name of the entry within its vault (e.g. "github.com").
    pub site: String,

    pub username: Option<String>,

    pub email: Option<String>,

    #[serde(rename = "type")]
    pub kind: EntryType,

    /// The protected value.
    pub secret: String,
}

impl Entry {
    /// A password entry with no username or email.
    pub fn new(site: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            username: None,
            email: None,
            kind: EntryType::Password,
            secret: secret.into(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_kind(mut self, kind: EntryType) -> Self {
        self.kind = kind;
        self
    }

    /// Check the entry invariants: a non-blank site and a non-empty secret.
    pub fn validate(&self) -> Result<()> {
        if self.site.trim().is_empty() {
            return Err(TesseraError::InvalidEntry("site cannot be empty".into()));
        }
        if self.secret.is_empty() {
            return Err(TesseraError::InvalidEntry(format!(
                "secret for '{}' cannot be empty",
                self.site
            )));
        }
        Ok(())
    }
}
