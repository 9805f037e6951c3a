//! Data-tree operations by dot-path.

use serde_json::Value;

use super::Store;
use crate::core::dotpath;
use crate::error::{Result, StoreError};

impl Store {
    /// Value or subtree at `path`, if present.
    pub fn get_value(&self, path: &str) -> Result<Option<Value>> {
        let data = self.load_data()?;
        Ok(dotpath::get(&data, path)?.cloned())
    }

    /// Write `value` at `path`, creating intermediate subtrees as needed.
    pub fn set_value(&self, path: &str, value: Value) -> Result<()> {
        let data = self.load_data()?;
        let updated = dotpath::set(&data, path, value)?;
        self.save_data(&updated)
    }

    /// Remove the leaf or subtree at `path`.
    ///
    /// An absent path is an error and triggers no write.
    pub fn remove_value(&self, path: &str) -> Result<()> {
        let data = self.load_data()?;
        match dotpath::remove(&data, path)? {
            Some(updated) => self.save_data(&updated),
            None => Err(StoreError::KeyNotFound(path.to_string()).into()),
        }
    }
}
