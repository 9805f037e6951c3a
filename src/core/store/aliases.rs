//! Alias map and guard set operations.
//!
//! Both files are flat JSON objects: aliases map a short name to a target
//! path string, guards map a path string to `true`. Alias names and guard
//! keys are plain map keys, never split on dots.

use serde_json::Value;

use super::Store;
use crate::core::dotpath;
use crate::error::{AliasError, Result, StoreError};

impl Store {
    /// Resolve an alias to its target path.
    ///
    /// A name with no alias entry is returned unchanged, so callers can
    /// pass either an alias or a literal path.
    pub fn resolve(&self, name_or_path: &str) -> Result<String> {
        let aliases = self.load_aliases()?;
        let resolved = aliases
            .get(name_or_path)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| name_or_path.to_string());
        Ok(resolved)
    }

    /// Create or overwrite an alias.
    ///
    /// The target must be a syntactically valid path; it need not exist in
    /// the data tree.
    pub fn alias_add(&self, name: &str, target: &str, force: bool) -> Result<()> {
        dotpath::split(target)?;
        let aliases = self.load_aliases()?;
        if !force && aliases.get(name).is_some() {
            return Err(AliasError::AlreadyExists(name.to_string()).into());
        }
        let mut map = aliases.as_object().cloned().unwrap_or_default();
        map.insert(name.to_string(), Value::String(target.to_string()));
        self.save_aliases(&Value::Object(map))
    }

    /// Delete an alias.
    pub fn alias_remove(&self, name: &str) -> Result<()> {
        let aliases = self.load_aliases()?;
        let mut map = aliases.as_object().cloned().unwrap_or_default();
        if map.remove(name).is_none() {
            return Err(AliasError::NotFound(name.to_string()).into());
        }
        self.save_aliases(&Value::Object(map))
    }

    /// Whether `path` requires confirmation before destructive operations.
    pub fn is_guarded(&self, path: &str) -> Result<bool> {
        let guards = self.load_guards()?;
        Ok(guards.get(path).is_some())
    }

    /// Mark a path as requiring confirmation.
    pub fn guard_add(&self, path: &str) -> Result<()> {
        dotpath::split(path)?;
        let guards = self.load_guards()?;
        let mut map = guards.as_object().cloned().unwrap_or_default();
        map.insert(path.to_string(), Value::Bool(true));
        self.save_guards(&Value::Object(map))
    }

    /// Unmark a guarded path.
    pub fn guard_remove(&self, path: &str) -> Result<()> {
        let guards = self.load_guards()?;
        let mut map = guards.as_object().cloned().unwrap_or_default();
        if map.remove(path).is_none() {
            return Err(StoreError::KeyNotFound(path.to_string()).into());
        }
        self.save_guards(&Value::Object(map))
    }
}
