//! Shared CLI output helpers.
//!
//! Styling goes through `console`, which already respects NO_COLOR and
//! non-terminal stdout.

use console::style;
use serde_json::Value;

/// Print a success message with checkmark.
///
/// Example: `✓ set server.ip`
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Print an error message to stderr.
///
/// Example: `✗ key not found: server.ip`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), msg);
}

/// Print a warning message.
///
/// Example: `⚠ aborted`
pub fn warn(msg: &str) {
    println!("{} {}", style("⚠").yellow(), msg);
}

/// Print a hint message.
///
/// Example: `→ pass --decrypt to reveal this value`
pub fn hint(msg: &str) {
    println!("{} {}", style("→").cyan(), style(msg).cyan());
}

/// Format a path or key for inline emphasis.
pub fn key(k: &str) -> String {
    style(k).cyan().to_string()
}

/// Render a leaf for display: strings bare, everything else as JSON.
pub fn leaf(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
