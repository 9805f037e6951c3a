//! Interactive prompts.
//!
//! Confirmation and password prompts require a live terminal and fail
//! cleanly without one instead of hanging. Plain value input additionally
//! accepts piped stdin.

use std::io::{self, BufRead};

use atty::Stream;
use dialoguer::{Confirm, Input, Password};

use crate::error::{Error, Result};

fn ensure_tty() -> Result<()> {
    if atty::is(Stream::Stdin) {
        Ok(())
    } else {
        Err(Error::NoTerminal)
    }
}

/// Yes/no confirmation.
pub fn confirm(message: &str, default: bool) -> Result<bool> {
    ensure_tty()?;
    Ok(Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?)
}

/// Hidden single-entry prompt.
pub fn password(message: &str) -> Result<String> {
    ensure_tty()?;
    Ok(Password::new().with_prompt(message).interact()?)
}

/// Hidden prompt with a second confirming entry.
pub fn password_confirmed(message: &str) -> Result<String> {
    ensure_tty()?;
    Ok(Password::new()
        .with_prompt(message)
        .with_confirmation("Confirm password", "passwords do not match")
        .interact()?)
}

/// Plain value input; piped stdin is read as a single line.
pub fn input(message: &str) -> Result<String> {
    if !atty::is(Stream::Stdin) {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }
    Ok(Input::<String>::new()
        .with_prompt(message)
        .interact_text()?)
}
