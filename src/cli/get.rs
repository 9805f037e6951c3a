//! Get command - print a value or subtree by path or alias.

use std::path::PathBuf;

use serde_json::Value;
use zeroize::Zeroize;

use crate::cli::{output, prompt};
use crate::core::crypto;
use crate::core::store::Store;
use crate::error::{Result, StoreError};

pub fn execute(dir: Option<PathBuf>, key: &str, decrypt: bool) -> Result<()> {
    let store = Store::open(dir)?;
    let path = store.resolve(key)?;
    let value = store
        .get_value(&path)?
        .ok_or_else(|| StoreError::KeyNotFound(path.clone()))?;

    if crypto::is_encrypted(&value) {
        if decrypt {
            let mut password = prompt::password("Password")?;
            let result = crypto::decrypt(value.as_str().unwrap_or_default(), &password);
            password.zeroize();
            println!("{}", result?);
        } else {
            println!("{}", crypto::ENCRYPTED_MASK);
            output::hint("pass --decrypt to reveal this value");
        }
        return Ok(());
    }

    match &value {
        Value::String(s) => println!("{}", s),
        Value::Object(_) => println!(
            "{}",
            serde_json::to_string_pretty(&crypto::mask_tree(&value))?
        ),
        other => println!("{}", other),
    }
    Ok(())
}
