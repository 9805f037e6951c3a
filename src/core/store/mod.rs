//! Locked, cached, atomic persistence for the keynest trees.
//!
//! [`Store`] owns the store directory and the read cache, and provides the
//! typed load/save pairs for the three managed trees (data, aliases,
//! guards). Every save goes through the lock sidecar and the atomic
//! temp-file rename, so a crash can never leave a partially written file
//! visible and a concurrent writer can never interleave bytes.

mod aliases;
mod cache;
mod data;
mod import;
mod lock;

pub use cache::Cache;
pub use lock::{with_lock, LockGuard, MAX_RETRIES, STALE_AFTER};

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::config::{self, Settings};
use crate::core::constants;
use crate::error::{Result, StoreError};

/// Persistence facade over the store directory.
pub struct Store {
    dir: PathBuf,
    pretty: bool,
    cache: Cache,
}

impl Store {
    /// Open the store, resolving the directory from the override (flag or
    /// `KEYNEST_DIR`), the settings file, and the default location in that
    /// order. An explicit override skips the settings file entirely.
    pub fn open(override_dir: Option<PathBuf>) -> Result<Self> {
        let settings = if override_dir.is_some() {
            Settings::default()
        } else {
            Settings::load()?
        };
        let dir = config::store_dir(override_dir, &settings)?;
        Ok(Self {
            dir,
            pretty: !settings.compact,
            cache: Cache::new(),
        })
    }

    /// Open a store rooted at an explicit directory with default settings.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pretty: true,
            cache: Cache::new(),
        }
    }

    /// The store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The read cache, exposed so tests can clear it.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Path to the primary data tree.
    pub fn data_path(&self) -> PathBuf {
        self.dir.join(constants::DATA_FILE)
    }

    /// Path to the alias map.
    pub fn alias_path(&self) -> PathBuf {
        self.dir.join(constants::ALIAS_FILE)
    }

    /// Path to the guard set.
    pub fn guard_path(&self) -> PathBuf {
        self.dir.join(constants::GUARD_FILE)
    }

    pub fn load_data(&self) -> Result<Value> {
        self.load(&self.data_path())
    }

    pub fn save_data(&self, tree: &Value) -> Result<()> {
        self.save(&self.data_path(), tree)
    }

    pub fn load_aliases(&self) -> Result<Value> {
        self.load(&self.alias_path())
    }

    pub fn save_aliases(&self, tree: &Value) -> Result<()> {
        self.save(&self.alias_path(), tree)
    }

    pub fn load_guards(&self) -> Result<Value> {
        self.load(&self.guard_path())
    }

    pub fn save_guards(&self, tree: &Value) -> Result<()> {
        self.save(&self.guard_path(), tree)
    }

    /// Load and validate a tree, going through the read cache.
    ///
    /// A missing file yields an empty tree so first-run usage needs no
    /// initialization step.
    pub fn load(&self, path: &Path) -> Result<Value> {
        let mtime = match fs::metadata(path) {
            Ok(meta) => meta.modified()?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "missing store file, starting empty");
                return Ok(Value::Object(Map::new()));
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(tree) = self.cache.get(path, mtime) {
            debug!(path = %path.display(), "cache hit");
            return Ok(tree);
        }

        let contents = fs::read_to_string(path)?;
        let tree: Value = serde_json::from_str(&contents)?;
        validate_shape(&tree)?;
        self.cache.put(path, mtime, tree.clone());
        Ok(tree)
    }

    /// Serialize and persist a tree under the lock sidecar.
    ///
    /// On any failure the cache keeps its pre-save state, so a write is
    /// never falsely assumed committed.
    pub fn save(&self, path: &Path, tree: &Value) -> Result<()> {
        validate_shape(tree)?;
        fs::create_dir_all(&self.dir)?;

        // serde_json's default object map keeps keys sorted at every level,
        // so repeated saves of the same tree are byte-for-byte identical.
        let contents = if self.pretty {
            let mut out = serde_json::to_string_pretty(tree)?;
            out.push('\n');
            out
        } else {
            serde_json::to_string(tree)?
        };

        // Capture the mtime while the lock is still held.
        let mtime = with_lock(path, || {
            atomic_write(path, contents.as_bytes())?;
            Ok(fs::metadata(path)?.modified()?)
        })?;
        self.cache.put(path, mtime, tree.clone());
        debug!(path = %path.display(), bytes = contents.len(), "saved");
        Ok(())
    }
}

/// Check that a tree is object-shaped with no arrays or nulls anywhere.
pub fn validate_shape(tree: &Value) -> Result<()> {
    if !tree.is_object() {
        return Err(StoreError::InvalidShape("root must be a JSON object".to_string()).into());
    }
    check_node(tree, "")
}

fn check_node(value: &Value, path: &str) -> Result<()> {
    let at = || {
        if path.is_empty() {
            "the root".to_string()
        } else {
            format!("'{}'", path)
        }
    };
    match value {
        Value::Array(_) => {
            Err(StoreError::InvalidShape(format!("array at {} is not permitted", at())).into())
        }
        Value::Null => {
            Err(StoreError::InvalidShape(format!("null at {} is not permitted", at())).into())
        }
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                check_node(child, &child_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Write `contents` to `path + ".tmp"`, then rename onto `path`.
///
/// The rename is the sole publish point: a crash before it leaves the
/// original file untouched, a crash after it leaves the new content fully
/// in place.
fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let mut file = fs::File::create(&tmp)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_empty_tree() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());
        assert_eq!(store.load_data().unwrap(), json!({}));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());

        let tree = json!({"server": {"ip": "10.0.0.1", "port": 8080}});
        store.save_data(&tree).unwrap();
        assert_eq!(store.load_data().unwrap(), tree);
    }

    #[test]
    fn test_save_is_deterministic_and_pretty() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());

        let tree = json!({"b": 1, "a": {"z": 2, "y": 3}});
        store.save_data(&tree).unwrap();
        let first = fs::read_to_string(store.data_path()).unwrap();
        store.save_data(&tree).unwrap();
        let second = fs::read_to_string(store.data_path()).unwrap();

        assert_eq!(first, second);
        // keys sorted at every level, 2-space indent
        assert!(first.find("\"a\"").unwrap() < first.find("\"b\"").unwrap());
        assert!(first.find("\"y\"").unwrap() < first.find("\"z\"").unwrap());
        assert!(first.contains("  \"a\""));
    }

    #[test]
    fn test_save_rejects_arrays() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());

        let tree = json!({"a": [1, 2]});
        let err = store.save_data(&tree).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Store(StoreError::InvalidShape(_))
        ));
        assert!(!store.data_path().exists());
    }

    #[test]
    fn test_load_rejects_array_root() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(store.data_path(), "[1, 2]").unwrap();

        let err = store.load_data().unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Store(StoreError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_external_write_is_observed() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());

        store.save_data(&json!({"a": 1})).unwrap();
        assert_eq!(store.load_data().unwrap(), json!({"a": 1}));

        // Another process replaces the file; the mtime advances and the
        // cached entry must not be served.
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(store.data_path(), "{\"a\": 2}").unwrap();
        assert_eq!(store.load_data().unwrap(), json!({"a": 2}));
    }

    #[test]
    fn test_cache_clear_forces_reread() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());

        store.save_data(&json!({"a": 1})).unwrap();
        store.cache().clear();
        assert_eq!(store.load_data().unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_no_tmp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());

        store.save_data(&json!({"a": 1})).unwrap();
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());
        store.save_data(&json!({"a": 1})).unwrap();

        let mode = fs::metadata(store.data_path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
