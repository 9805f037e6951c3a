//! Per-value authenticated encryption.
//!
//! Values are encrypted individually under a user-supplied password with
//! AES-256-GCM; the key is derived per value with PBKDF2-HMAC-SHA256 over a
//! fresh random salt. The wire format is an ASCII string:
//!
//! ```text
//! "encv1:" + base64(salt[32] ‖ iv[12] ‖ tag[16] ‖ ciphertext)
//! ```
//!
//! Encrypted values are opaque to the rest of the crate: [`mask_tree`] is
//! the only sanctioned way to put them in front of a user.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::Value;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};

/// Version prefix carried by every encrypted value.
pub const ENCRYPTED_PREFIX: &str = "encv1:";

/// Placeholder shown wherever an encrypted value would be displayed.
pub const ENCRYPTED_MASK: &str = "[encrypted]";

const SALT_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const KEY_LEN: usize = 32;
const PBKDF2_ROUNDS: u32 = 600_000;

/// Whether a value is an encrypted leaf.
pub fn is_encrypted(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.starts_with(ENCRYPTED_PREFIX))
}

fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);
    key
}

/// Encrypt a plaintext string under `password`.
///
/// Salt and nonce are freshly random on every call, so encrypting the same
/// plaintext twice never yields the same ciphertext.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if the AEAD seal fails.
pub fn encrypt(plaintext: &str, password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut iv);

    let mut key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    let sealed = cipher.encrypt(Nonce::from_slice(&iv), plaintext.as_bytes());
    key.zeroize();

    let sealed = sealed.map_err(|_| CryptoError::EncryptionFailed)?;
    // aes-gcm appends the tag; the wire format carries it before the ciphertext
    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

    let mut payload = Vec::with_capacity(SALT_LEN + NONCE_LEN + sealed.len());
    payload.extend_from_slice(&salt);
    payload.extend_from_slice(&iv);
    payload.extend_from_slice(tag);
    payload.extend_from_slice(ciphertext);

    Ok(format!("{}{}", ENCRYPTED_PREFIX, BASE64.encode(payload)))
}

/// Decrypt an encrypted value with `password`.
///
/// # Errors
///
/// Returns `CryptoError::NotEncrypted` when the version prefix is absent,
/// `CryptoError::CorruptedData` when the payload does not decode or is
/// shorter than salt + iv + tag, and `CryptoError::AuthenticationFailed`
/// when tag verification fails. The last case covers both a wrong password
/// and tampered ciphertext without distinguishing them.
pub fn decrypt(encrypted: &str, password: &str) -> Result<String> {
    let body = encrypted
        .strip_prefix(ENCRYPTED_PREFIX)
        .ok_or(CryptoError::NotEncrypted)?;
    let payload = BASE64.decode(body).map_err(|_| CryptoError::CorruptedData)?;
    if payload.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
        return Err(CryptoError::CorruptedData.into());
    }

    let (salt, rest) = payload.split_at(SALT_LEN);
    let (iv, rest) = rest.split_at(NONCE_LEN);
    let (tag, ciphertext) = rest.split_at(TAG_LEN);

    let mut sealed = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    let mut key = derive_key(password, salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    let opened = cipher.decrypt(Nonce::from_slice(iv), sealed.as_ref());
    key.zeroize();

    let plaintext = opened.map_err(|_| CryptoError::AuthenticationFailed)?;
    String::from_utf8(plaintext).map_err(|_| CryptoError::CorruptedData.into())
}

/// Replace every encrypted leaf with [`ENCRYPTED_MASK`].
///
/// All other leaves and the tree structure pass through unchanged. Every
/// code path that prints, exports, or searches values goes through this so
/// ciphertext never reaches a terminal or an exported file.
pub fn mask_tree(tree: &Value) -> Value {
    match tree {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), mask_tree(value)))
                .collect(),
        ),
        value if is_encrypted(value) => Value::String(ENCRYPTED_MASK.to_string()),
        value => value.clone(),
    }
}
