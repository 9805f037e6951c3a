//! Tree command - print a masked subtree as pretty JSON.

use std::path::PathBuf;

use crate::core::store::Store;
use crate::core::{crypto, dotpath};
use crate::error::{Result, StoreError};

pub fn execute(dir: Option<PathBuf>, prefix: Option<&str>) -> Result<()> {
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

    println!(
        "{}",
        serde_json::to_string_pretty(&crypto::mask_tree(&node))?
    );
    Ok(())
}
