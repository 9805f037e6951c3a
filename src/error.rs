//! Error types for keynest operations.
//!
//! Each core component surfaces a typed sub-error; the top-level [`Error`]
//! wraps them so callers can match on the component that failed. Only the
//! binary entry point turns these into user-facing text.

use thiserror::Error;

/// Top-level error for all keynest operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Alias(#[from] AliasError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("interactive terminal required")]
    NoTerminal,

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Dot-path syntax failures.
#[derive(Error, Debug)]
pub enum PathError {
    #[error("empty path")]
    Empty,

    #[error("path contains an empty segment: {0}")]
    EmptySegment(String),
}

/// Persistence and tree-shape failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("invalid store shape: {0}")]
    InvalidShape(String),
}

/// Lock sidecar contention.
#[derive(Error, Debug)]
pub enum LockError {
    #[error("could not lock {path}: gave up after {attempts} attempts")]
    Timeout { path: String, attempts: u32 },
}

/// Encryption and decryption failures.
///
/// `AuthenticationFailed` carries one fixed message for both a wrong
/// password and tampered ciphertext.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("value is not encrypted")]
    NotEncrypted,

    #[error("encrypted value is corrupted or truncated")]
    CorruptedData,

    #[error("decryption failed: wrong password or corrupted data")]
    AuthenticationFailed,

    #[error("encryption failed")]
    EncryptionFailed,
}

/// Alias map failures.
#[derive(Error, Debug)]
pub enum AliasError {
    #[error("alias not found: {0}")]
    NotFound(String),

    #[error("alias already exists: {0} (use --force to overwrite)")]
    AlreadyExists(String),
}

/// Settings file failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unable to determine home directory")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, Error>;
