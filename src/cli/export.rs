//! Export command - masked JSON to stdout or a file.
//!
//! Ciphertext never leaves the store: the exported tree is always masked.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::output;
use crate::core::store::Store;
use crate::core::{crypto, dotpath};
use crate::error::{Result, StoreError};

pub fn execute(dir: Option<PathBuf>, prefix: Option<&str>, target: Option<&Path>) -> Result<()> {
    let store = Store::open(dir)?;
    let data = store.load_data()?;

    let node = match prefix {
        Some(p) => {
            let path = store.resolve(p)?;
            dotpath::get(&data, &path)?
                .cloned()
                .ok_or(StoreError::KeyNotFound(path))?
        }
        None => data,
    };

    let mut rendered = serde_json::to_string_pretty(&crypto::mask_tree(&node))?;
    rendered.push('\n');

    match target {
        Some(path) => {
            fs::write(path, rendered)?;
            output::success(&format!("exported to {}", path.display()));
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
