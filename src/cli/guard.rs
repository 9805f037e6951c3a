//! Guard commands - paths that require confirmation before changes.

use std::path::PathBuf;

use crate::cli::{output, GuardAction};
use crate::core::store::Store;
use crate::error::Result;

pub fn execute(dir: Option<PathBuf>, action: GuardAction) -> Result<()> {
    let store = Store::open(dir)?;
    match action {
        GuardAction::Add { path } => {
            let path = store.resolve(&path)?;
            store.guard_add(&path)?;
            output::success(&format!("guarding {}", path));
        }
        GuardAction::Rm { path } => {
            let path = store.resolve(&path)?;
            store.guard_remove(&path)?;
            output::success(&format!("no longer guarding {}", path));
        }
        GuardAction::List => {
            let guards = store.load_guards()?;
            let map = guards.as_object().cloned().unwrap_or_default();
            if map.is_empty() {
                output::warn("no guarded paths");
                return Ok(());
            }
            for path in map.keys() {
                println!("{}", path);
            }
        }
    }
    Ok(())
}
