//! Cross-process advisory locking via a lock sidecar.
//!
//! The lock for `store.json` is the file `store.json.lock`; its existence
//! is the lock signal and its content is the holder's pid (advisory only).
//! A sidecar whose mtime is older than [`STALE_AFTER`] is presumed
//! abandoned by a crashed holder and reclaimed by the next contender.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

use crate::error::{Error, LockError, Result};

/// Age past which a lock sidecar is presumed abandoned.
pub const STALE_AFTER: Duration = Duration::from_secs(10);

/// Default number of backoff attempts before giving up.
pub const MAX_RETRIES: u32 = 8;

const BACKOFF_BASE_MS: u64 = 10;

/// Held lock. Dropping it deletes the sidecar; a sidecar that already
/// vanished is not an error.
pub struct LockGuard {
    sidecar: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.sidecar);
    }
}

fn sidecar_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".lock");
    PathBuf::from(os)
}

fn is_stale(sidecar: &Path, stale_after: Duration) -> bool {
    let Ok(meta) = fs::metadata(sidecar) else {
        return false;
    };
    let Ok(mtime) = meta.modified() else {
        return false;
    };
    SystemTime::now()
        .duration_since(mtime)
        .is_ok_and(|age| age > stale_after)
}

/// Acquire the lock for `path`, retrying with exponential backoff.
///
/// A stale sidecar is deleted and retried immediately without counting
/// against the retry budget.
///
/// # Errors
///
/// Returns `LockError::Timeout` once `max_retries` backoffs are exhausted.
pub fn acquire(path: &Path, max_retries: u32) -> Result<LockGuard> {
    acquire_with(path, max_retries, STALE_AFTER)
}

fn acquire_with(path: &Path, max_retries: u32, stale_after: Duration) -> Result<LockGuard> {
    let sidecar = sidecar_path(path);
    let mut attempt = 0u32;
    loop {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&sidecar)
        {
            Ok(mut file) => {
                let _ = write!(file, "{}", std::process::id());
                debug!(path = %sidecar.display(), "lock acquired");
                return Ok(LockGuard { sidecar });
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                if is_stale(&sidecar, stale_after) && fs::remove_file(&sidecar).is_ok() {
                    warn!(path = %sidecar.display(), "reclaimed stale lock");
                    continue;
                }
                if attempt >= max_retries {
                    return Err(LockError::Timeout {
                        path: path.display().to_string(),
                        attempts: max_retries,
                    }
                    .into());
                }
                thread::sleep(Duration::from_millis(BACKOFF_BASE_MS << attempt));
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Run `f` while holding the lock for `path`.
///
/// The guard is released on every exit path, including when `f` fails.
/// Contention timeouts abort the operation; any other acquisition failure
/// degrades to running unlocked so an unlockable location cannot brick
/// single-process usage.
pub fn with_lock<T>(path: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let guard = match acquire(path, MAX_RETRIES) {
        Ok(guard) => Some(guard),
        Err(err @ Error::Lock(_)) => return Err(err),
        Err(err) => {
            warn!(error = %err, "lock acquisition failed, continuing unlocked");
            None
        }
    };
    let result = f();
    drop(guard);
    result
}
