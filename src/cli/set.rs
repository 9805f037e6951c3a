//! Set command - write a value at a path, optionally encrypted.

use std::path::PathBuf;

use serde_json::Value;
use zeroize::Zeroize;

use crate::cli::{output, prompt};
use crate::core::crypto;
use crate::core::store::Store;
use crate::error::Result;

pub fn execute(
    dir: Option<PathBuf>,
    key: &str,
    value: Option<String>,
    encrypt: bool,
    yes: bool,
) -> Result<()> {
    let store = Store::open(dir)?;
    let path = store.resolve(key)?;

    if !yes && store.is_guarded(&path)? && store.get_value(&path)?.is_some() {
        let overwrite = prompt::confirm(&format!("{} is guarded. Overwrite?", path), false)?;
        if !overwrite {
            output::warn("aborted");
            return Ok(());
        }
    }

    let raw = match value {
        Some(v) => v,
        None if encrypt => prompt::password(&format!("Value for {}", output::key(&path)))?,
        None => prompt::input(&format!("Value for {}", output::key(&path)))?,
    };

    let leaf = if encrypt {
        let mut password = prompt::password_confirmed("Password")?;
        let encrypted = crypto::encrypt(&raw, &password);
        password.zeroize();
        Value::String(encrypted?)
    } else {
        parse_scalar(&raw)
    };

    store.set_value(&path, leaf)?;
    output::success(&format!("set {}", path));
    Ok(())
}

/// Store numbers and booleans typed; everything else stays a string.
fn parse_scalar(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(v @ (Value::Bool(_) | Value::Number(_))) => v,
        _ => Value::String(raw.to_string()),
    }
}
