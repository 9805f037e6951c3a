//! Constants used throughout keynest.
//!
//! Centralizes magic strings and tuning values.

/// Store directory relative to HOME (~/.keynest).
pub const STORE_DIR: &str = ".keynest";

/// Primary data tree file name.
pub const DATA_FILE: &str = "store.json";

/// Alias map file name.
pub const ALIAS_FILE: &str = "aliases.json";

/// Guard set file name (paths that require confirmation).
pub const GUARD_FILE: &str = "guards.json";

/// Settings file name inside the store directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable controlling log filtering.
pub const LOG_ENV: &str = "KEYNEST_LOG";
