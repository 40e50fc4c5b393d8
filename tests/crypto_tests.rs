//! Integration tests for the key store and the per-entry codec.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tessera::crypto::{generate_keyfile, load_keyfile, VaultKey, KEY_LEN};
use tessera::errors::TesseraError;
use tessera::vault::{decrypt_entry, encrypt_entry, CipherText, Entry, EntryType};
use tempfile::TempDir;

fn key(byte: u8) -> VaultKey {
    VaultKey::from_bytes(&[byte; KEY_LEN]).expect("valid key")
}

fn sample_entries() -> Vec<Entry> {
    vec![
        Entry::new("github.com", "s3cr3t").with_username("alice"),
        Entry::new("openai", "sk-proj-abc123")
            .with_email("dev@example.com")
            .with_kind(EntryType::ApiKey),
        Entry::new("bank", "p@ss:word\nwith newline")
            .with_username("bob")
            .with_email("bob@example.com"),
        Entry::new("ünïcödé.example", "🔑 emoji secret"),
    ]
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let k = key(0xAB);
    for entry in sample_entries() {
        let payload = encrypt_entry(&entry, &k).expect("encrypt");
        let recovered = decrypt_entry(&payload, &k).expect("decrypt");
        assert_eq!(recovered, entry);
    }
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let k = key(0xCD);
    let entry = Entry::new("github.com", "same");

    let ct1 = encrypt_entry(&entry, &k).expect("encrypt 1");
    let ct2 = encrypt_entry(&entry, &k).expect("encrypt 2");

    // Each call uses a fresh nonce.
    assert_ne!(ct1, ct2);
}

#[test]
fn ciphertext_does_not_contain_plaintext() {
    let k = key(0x01);
    let entry = Entry::new("github.com", "hunter2-very-recognisable");
    let payload = encrypt_entry(&entry, &k).unwrap();

    let raw = BASE64.decode(payload.as_str()).unwrap();
    let needle = b"hunter2";
    assert!(!raw.windows(needle.len()).any(|w| w == needle));
}

// ---------------------------------------------------------------------------
// Tamper detection
// ---------------------------------------------------------------------------

#[test]
fn every_flipped_bit_is_detected() {
    let k = key(0x42);
    let entry = Entry::new("github.com", "s3cr3t").with_username("alice");
    let payload = encrypt_entry(&entry, &k).unwrap();
    let sealed = BASE64.decode(payload.as_str()).unwrap();

    for byte in 0..sealed.len() {
        for bit in 0..8 {
            let mut tampered = sealed.clone();
            tampered[byte] ^= 1 << bit;
            let tampered = CipherText::from(BASE64.encode(&tampered));

            assert!(
                matches!(decrypt_entry(&tampered, &k), Err(TesseraError::DecryptionFailed)),
                "flip of byte {byte} bit {bit} was not detected"
            );
        }
    }
}

#[test]
fn every_altered_text_character_is_detected() {
    let k = key(0x43);
    let payload = encrypt_entry(&Entry::new("a", "b"), &k).unwrap();
    let text = payload.as_str().as_bytes().to_vec();

    for i in 0..text.len() {
        let mut tampered = text.clone();
        tampered[i] ^= 0x01;
        let tampered = CipherText::from(String::from_utf8(tampered).unwrap());

        assert!(
            matches!(decrypt_entry(&tampered, &k), Err(TesseraError::DecryptionFailed)),
            "change at character {i} was not detected"
        );
    }
}

#[test]
fn truncated_payload_is_rejected() {
    let k = key(0x44);
    let payload = encrypt_entry(&Entry::new("a", "b"), &k).unwrap();
    let sealed = BASE64.decode(payload.as_str()).unwrap();

    for len in [0, 5, 12, 27, sealed.len() - 1] {
        let truncated = CipherText::from(BASE64.encode(&sealed[..len]));
        assert!(
            matches!(decrypt_entry(&truncated, &k), Err(TesseraError::DecryptionFailed)),
            "truncation to {len} bytes was not detected"
        );
    }
}

// ---------------------------------------------------------------------------
// Wrong key
// ---------------------------------------------------------------------------

#[test]
fn decrypt_with_wrong_key_fails() {
    let right = key(0x11);
    let wrong = key(0x22);

    for entry in sample_entries() {
        let payload = encrypt_entry(&entry, &right).unwrap();
        assert!(matches!(
            decrypt_entry(&payload, &wrong),
            Err(TesseraError::DecryptionFailed)
        ));
    }
}

#[test]
fn generated_keys_are_independent() {
    let dir = TempDir::new().unwrap();
    let a = generate_keyfile(&dir.path().join("a.key")).unwrap();
    let b = generate_keyfile(&dir.path().join("b.key")).unwrap();

    let payload = encrypt_entry(&Entry::new("site", "secret"), &a).unwrap();
    assert!(decrypt_entry(&payload, &b).is_err());

    let reloaded = load_keyfile(&dir.path().join("a.key")).unwrap();
    assert_eq!(decrypt_entry(&payload, &reloaded).unwrap().secret, "secret");
}

// ---------------------------------------------------------------------------
// Key material validation
// ---------------------------------------------------------------------------

#[test]
fn keys_of_the_wrong_length_are_invalid() {
    for len in [0, 16, 31, 33, 44] {
        assert!(
            matches!(VaultKey::from_bytes(&vec![7u8; len]), Err(TesseraError::InvalidKey(_))),
            "accepted a {len}-byte key"
        );
    }
}
