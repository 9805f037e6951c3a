//! Search command - substring search over paths and values.
//!
//! The search runs over the masked tree, so ciphertext can never match a
//! plaintext term.

use std::path::PathBuf;

use crate::cli::output;
use crate::core::store::Store;
use crate::core::{crypto, dotpath};
use crate::error::Result;

pub fn execute(dir: Option<PathBuf>, term: &str) -> Result<()> {
    let store = Store::open(dir)?;
    let masked = crypto::mask_tree(&store.load_data()?);

    let mut hits = 0usize;
    for (path, value) in dotpath::flatten(&masked) {
        let rendered = output::leaf(&value);
        if path.contains(term) || rendered.contains(term) {
            println!("{} = {}", path, rendered);
            hits += 1;
        }
    }

    if hits == 0 {
        output::warn("no matches");
    }
    Ok(())
}
