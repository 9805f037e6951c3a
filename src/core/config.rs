//! Settings file handling.
//!
//! Reads the optional `~/.keynest/config.toml`. Settings only control
//! where the store lives and how it is serialized; a missing file is not
//! an error.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// User settings from `config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Store directory override.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed.
    #[serde(default)]
    pub compact: bool,
}

impl Settings {
    /// Load settings from the default store directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML. A missing file
    /// yields the defaults.
    pub fn load() -> Result<Self> {
        let path = default_dir()?.join(constants::CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        let settings = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }
}

/// Default store directory (`~/.keynest`).
pub fn default_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(constants::STORE_DIR))
}

/// Resolve the effective store directory.
///
/// Precedence: explicit override (`--dir` flag or `KEYNEST_DIR`), the
/// settings file, then the default location.
pub fn store_dir(override_dir: Option<PathBuf>, settings: &Settings) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    if let Some(dir) = &settings.dir {
        return Ok(dir.clone());
    }
    default_dir()
}
