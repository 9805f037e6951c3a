//! Rm command - remove a value or whole subtree.

use std::path::PathBuf;

use crate::cli::{output, prompt};
use crate::core::store::Store;
use crate::error::Result;

pub fn execute(dir: Option<PathBuf>, key: &str, yes: bool) -> Result<()> {
    let store = Store::open(dir)?;
    let path = store.resolve(key)?;

    if !yes && store.is_guarded(&path)? {
        let proceed = prompt::confirm(&format!("{} is guarded. Remove?", path), false)?;
        if !proceed {
            output::warn("aborted");
            return Ok(());
        }
    }

    store.remove_value(&path)?;
    output::success(&format!("removed {}", path));
    Ok(())
}
