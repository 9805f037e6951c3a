//! List command - flattened, masked view of the store.

use std::path::PathBuf;

use crate::cli::output;
use crate::core::store::Store;
use crate::core::{crypto, dotpath};
use crate::error::Result;

pub fn execute(dir: Option<PathBuf>, prefix: Option<&str>, json: bool) -> Result<()> {
    let store = Store::open(dir)?;
    let masked = crypto::mask_tree(&store.load_data()?);

    let prefix = match prefix {
        Some(p) => Some(store.resolve(p)?),
        None => None,
    };
    let entries: Vec<_> = dotpath::flatten(&masked)
        .into_iter()
        .filter(|(path, _)| match &prefix {
            Some(p) => matches_prefix(path, p),
            None => true,
        })
        .collect();

    if entries.is_empty() {
        output::warn("no entries");
        return Ok(());
    }

    if json {
        let map: serde_json::Map<String, serde_json::Value> = entries.into_iter().collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (path, value) in &entries {
            println!("{} = {}", path, output::leaf(value));
        }
    }
    Ok(())
}

fn matches_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'))
}
