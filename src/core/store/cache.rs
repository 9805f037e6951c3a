//! Read-through cache keyed by file modification time.
//!
//! An entry is valid only while its recorded mtime matches the file's
//! current mtime, so a write from another process is picked up by the next
//! load. The cache is owned by [`super::Store`] rather than living in a
//! hidden global, and `clear` is exposed for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use serde_json::Value;

#[derive(Default)]
pub struct Cache {
    entries: Mutex<HashMap<PathBuf, Entry>>,
}

struct Entry {
    mtime: SystemTime,
    tree: Value,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached tree for `path`, if the recorded mtime matches `mtime`.
    pub fn get(&self, path: &Path, mtime: SystemTime) -> Option<Value> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries
            .get(path)
            .filter(|entry| entry.mtime == mtime)
            .map(|entry| entry.tree.clone())
    }

    /// Record the parsed tree for `path` as of `mtime`.
    pub fn put(&self, path: &Path, mtime: SystemTime, tree: Value) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(path.to_path_buf(), Entry { mtime, tree });
    }

    /// Drop the entry for a single file.
    pub fn invalidate(&self, path: &Path) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.remove(path);
    }

    /// Drop all entries.
    pub fn clear(&self) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.clear();
    }
}
