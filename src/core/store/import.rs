//! Diff-aware import.
//!
//! Preview and apply run the incoming tree through the same diff engine,
//! so what the user confirmed is exactly what gets written.

use serde_json::Value;

use super::{validate_shape, Store};
use crate::core::dotpath;
use crate::core::merge::{self, Change, DiffMode};
use crate::error::Result;

impl Store {
    /// Classify what importing `incoming` would change, without writing.
    pub fn preview_import(&self, incoming: &Value, mode: DiffMode) -> Result<Vec<Change>> {
        validate_shape(incoming)?;
        let current = self.load_data()?;
        Ok(merge::diff(
            &dotpath::flatten(&current),
            &dotpath::flatten(incoming),
            mode,
        ))
    }

    /// Apply `incoming` to the data tree and persist the result.
    ///
    /// Returns the same change classifications the preview shows.
    pub fn apply_import(&self, incoming: &Value, mode: DiffMode) -> Result<Vec<Change>> {
        validate_shape(incoming)?;
        let current = self.load_data()?;
        let changes = merge::diff(
            &dotpath::flatten(&current),
            &dotpath::flatten(incoming),
            mode,
        );
        let merged = merge::apply(&current, incoming, mode);
        self.save_data(&merged)?;
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merge::ChangeKind;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_preview_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());
        store.save_data(&json!({"a": 1})).unwrap();
        let before = std::fs::read_to_string(store.data_path()).unwrap();

        let changes = store
            .preview_import(&json!({"a": 1, "b": 2}), DiffMode::Merge)
            .unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Add);

        let after = std::fs::read_to_string(store.data_path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_apply_merge_keeps_current_only_keys() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());
        store
            .save_data(&json!({"keep": true, "server": {"ip": "10.0.0.1"}}))
            .unwrap();

        store
            .apply_import(&json!({"server": {"port": 8080}}), DiffMode::Merge)
            .unwrap();
        assert_eq!(
            store.load_data().unwrap(),
            json!({"keep": true, "server": {"ip": "10.0.0.1", "port": 8080}})
        );
    }

    #[test]
    fn test_apply_replace_is_wholesale() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());
        store.save_data(&json!({"old": 1})).unwrap();

        store
            .apply_import(&json!({"new": 2}), DiffMode::Replace)
            .unwrap();
        assert_eq!(store.load_data().unwrap(), json!({"new": 2}));
    }

    #[test]
    fn test_import_rejects_invalid_shape_before_mutation() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());
        store.save_data(&json!({"a": 1})).unwrap();

        assert!(store
            .apply_import(&json!({"bad": [1, 2]}), DiffMode::Merge)
            .is_err());
        assert_eq!(store.load_data().unwrap(), json!({"a": 1}));
    }
}
