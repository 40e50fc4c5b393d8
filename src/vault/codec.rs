//! Per-entry encryption.
//!
//! An entry is serialized to its canonical JSON form, sealed with the
//! active key, and the `nonce || ciphertext || tag` blob is base64
//! encoded so it can live as a string value in the vault file.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::entry::Entry;
use crate::crypto::VaultKey;
use crate::errors::{Result, TesseraError};

/// A self-contained encrypted entry, as stored in the vault file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CipherText(String);

impl CipherText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CipherText {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for CipherText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CipherText({} chars)", self.0.len())
    }
}

/// Encrypt one entry under `key`.
pub fn encrypt_entry(entry: &Entry, key: &VaultKey) -> Result<CipherText> {
    let plaintext = Zeroizing::new(
        serde_json::to_vec(entry)
            .map_err(|e| TesseraError::Serialization(format!("entry: {e}")))?,
    );

    let sealed = key.encrypt(&plaintext)?;
    Ok(CipherText(BASE64.encode(sealed)))
}

/// Decrypt a payload produced by `encrypt_entry`.
///
/// Anything that fails authentication (bad encoding, truncation, wrong
/// key, flipped bits) is `DecryptionFailed`. A payload that decrypts but
/// is not a valid entry is a `Deserialization` error.
pub fn decrypt_entry(payload: &CipherText, key: &VaultKey) -> Result<Entry> {
    let sealed = BASE64
        .decode(payload.as_str())
        .map_err(|_| TesseraError::DecryptionFailed)?;

    let plaintext = Zeroizing::new(key.decrypt(&sealed)?);

    // Only the position is reported; serde's messages can quote field values.
    let entry: Entry = serde_json::from_slice(&plaintext).map_err(|e| {
        TesseraError::Deserialization(format!(
            "decrypted payload is not a valid entry (line {}, column {})",
            e.line(),
            e.column()
        ))
    })?;

    entry
        .validate()
        .map_err(|e| TesseraError::Deserialization(e.to_string()))?;

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::entry::EntryType;

    fn key(byte: u8) -> VaultKey {
        VaultKey::from_bytes(&[byte; 32]).unwrap()
    }

    /// Seal arbitrary bytes the same way the codec does.
    fn seal_raw(plaintext: &[u8], key: &VaultKey) -> CipherText {
        CipherText(BASE64.encode(key.encrypt(plaintext).unwrap()))
    }

    #[test]
    fn roundtrip_preserves_every_field() {
        let k = key(0x10);
        let entry = Entry::new("api.example.com", "sk-live-123")
            .with_username("svc")
            .with_email("ops@example.com")
            .with_kind(EntryType::ApiKey);

        let payload = encrypt_entry(&entry, &k).unwrap();
        assert_eq!(decrypt_entry(&payload, &k).unwrap(), entry);
    }

    #[test]
    fn secret_with_delimiters_and_newlines_roundtrips() {
        let k = key(0x11);
        let entry = Entry::new("weird:site", "line1\nline2:\"quoted\"\t{}");

        let payload = encrypt_entry(&entry, &k).unwrap();
        assert_eq!(decrypt_entry(&payload, &k).unwrap(), entry);
    }

    #[test]
    fn payload_is_printable_base64() {
        let payload = encrypt_entry(&Entry::new("a", "b"), &key(0x12)).unwrap();
        assert!(payload
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='));
    }

    #[test]
    fn non_base64_payload_is_decryption_failure() {
        let payload = CipherText::from("not base64 at all!".to_string());
        assert!(matches!(
            decrypt_entry(&payload, &key(0x13)),
            Err(TesseraError::DecryptionFailed)
        ));
    }

    #[test]
    fn decrypted_garbage_is_deserialization_error() {
        let k = key(0x14);
        let payload = seal_raw(b"definitely not json", &k);
        assert!(matches!(
            decrypt_entry(&payload, &k),
            Err(TesseraError::Deserialization(_))
        ));
    }

    #[test]
    fn unknown_entry_type_is_deserialization_error() {
        let k = key(0x15);
        let payload = seal_raw(
            br#"{"site":"a","username":null,"email":null,"type":"pin","secret":"1"}"#,
            &k,
        );
        assert!(matches!(
            decrypt_entry(&payload, &k),
            Err(TesseraError::Deserialization(_))
        ));
    }

    #[test]
    fn decrypted_entry_with_empty_site_is_rejected() {
        let k = key(0x16);
        let payload = seal_raw(
            br#"{"site":"","username":null,"email":null,"type":"password","secret":"1"}"#,
            &k,
        );
        assert!(matches!(
            decrypt_entry(&payload, &k),
            Err(TesseraError::Deserialization(_))
        ));
    }

    #[test]
    fn debug_does_not_print_payload() {
        let payload = CipherText::from("QUJD".to_string());
        assert_eq!(format!("{payload:?}"), "CipherText(4 chars)");
    }
}
