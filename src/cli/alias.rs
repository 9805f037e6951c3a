//! Alias commands - short names for long paths.

use std::path::PathBuf;

use crate::cli::{output, AliasAction};
use crate::core::store::Store;
use crate::error::Result;

pub fn execute(dir: Option<PathBuf>, action: AliasAction) -> Result<()> {
    let store = Store::open(dir)?;
    match action {
        AliasAction::Add { name, path, force } => {
            store.alias_add(&name, &path, force)?;
            output::success(&format!("{} -> {}", name, path));
        }
        AliasAction::Rm { name } => {
            store.alias_remove(&name)?;
            output::success(&format!("removed alias {}", name));
        }
        AliasAction::List => {
            let aliases = store.load_aliases()?;
            let map = aliases.as_object().cloned().unwrap_or_default();
            if map.is_empty() {
                output::warn("no aliases");
                return Ok(());
            }
            for (name, target) in &map {
                println!("{} -> {}", name, target.as_str().unwrap_or("<invalid>"));
            }
        }
    }
    Ok(())
}
