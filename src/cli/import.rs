//! Import command - diff-aware JSON import with preview.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::cli::{output, prompt};
use crate::core::crypto;
use crate::core::merge::{Change, ChangeKind, DiffMode};
use crate::core::store::Store;
use crate::error::Result;

pub fn execute(
    dir: Option<PathBuf>,
    file: &Path,
    replace: bool,
    preview: bool,
    yes: bool,
) -> Result<()> {
    let store = Store::open(dir)?;
    let contents = fs::read_to_string(file)?;
    let incoming: Value = serde_json::from_str(&contents)?;
    let mode = if replace {
        DiffMode::Replace
    } else {
        DiffMode::Merge
    };

    let changes = store.preview_import(&incoming, mode)?;
    if changes.is_empty() {
        output::success("nothing to import, store is up to date");
        return Ok(());
    }

    print_changes(&changes);

    if preview {
        return Ok(());
    }

    if !yes {
        let mut guarded = Vec::new();
        for change in &changes {
            if store.is_guarded(&change.path)? {
                guarded.push(change.path.clone());
            }
        }
        if !guarded.is_empty() {
            output::warn(&format!("guarded paths affected: {}", guarded.join(", ")));
        }
        if !prompt::confirm(&format!("Apply {} changes?", changes.len()), false)? {
            output::warn("aborted");
            return Ok(());
        }
    }

    store.apply_import(&incoming, mode)?;
    output::success(&format!(
        "imported {} changes from {}",
        changes.len(),
        file.display()
    ));
    Ok(())
}

fn print_changes(changes: &[Change]) {
    for change in changes {
        match change.kind {
            ChangeKind::Add => println!("+ {} = {}", change.path, masked(&change.new)),
            ChangeKind::Modify => println!(
                "~ {} = {} -> {}",
                change.path,
                masked(&change.old),
                masked(&change.new)
            ),
            ChangeKind::Remove => println!("- {}", change.path),
        }
    }
}

fn masked(value: &Option<Value>) -> String {
    match value {
        Some(v) if crypto::is_encrypted(v) => crypto::ENCRYPTED_MASK.to_string(),
        Some(v) => output::leaf(v),
        None => String::new(),
    }
}
