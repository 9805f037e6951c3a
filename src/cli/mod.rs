//! Command-line interface.

pub mod alias;
pub mod completions;
pub mod export;
pub mod get;
pub mod guard;
pub mod import;
pub mod list;
pub mod output;
pub mod prompt;
pub mod rm;
pub mod search;
pub mod set;
pub mod tree;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

/// Keynest - a hierarchical encrypted key-value store.
#[derive(Parser)]
#[command(
    name = "keynest",
    about = "A hierarchical encrypted key-value store for the command line",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Store directory (defaults to ~/.keynest)
    #[arg(long, global = true, env = "KEYNEST_DIR", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Get a value or subtree by path or alias
    Get {
        /// Dot-path or alias (e.g. server.production.ip)
        path: String,
        /// Decrypt an encrypted value (prompts for the password)
        #[arg(long)]
        decrypt: bool,
    },

    /// Set a value at a path
    Set {
        /// Dot-path or alias
        path: String,
        /// Value to store; read interactively when omitted
        value: Option<String>,
        /// Encrypt the value under a password
        #[arg(short, long)]
        encrypt: bool,
        /// Skip the confirmation on guarded paths
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove a value or whole subtree
    Rm {
        /// Dot-path or alias
        path: String,
        /// Skip the confirmation on guarded paths
        #[arg(short, long)]
        yes: bool,
    },

    /// List flattened paths and values
    List {
        /// Only paths under this prefix
        prefix: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a subtree as pretty JSON
    Tree {
        /// Dot-path or alias; the whole store when omitted
        prefix: Option<String>,
    },

    /// Search paths and values for a substring
    Search {
        /// Substring to look for
        term: String,
    },

    /// Manage path aliases
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },

    /// Manage guarded paths (confirmation required before changes)
    Guard {
        #[command(subcommand)]
        action: GuardAction,
    },

    /// Import a JSON file with diff preview
    Import {
        /// JSON file to import
        file: PathBuf,
        /// Replace the whole tree instead of merging
        #[arg(long)]
        replace: bool,
        /// Show the diff and exit without writing
        #[arg(long)]
        preview: bool,
        /// Apply without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Export the store as JSON (encrypted values masked)
    Export {
        /// Only the subtree under this path
        prefix: Option<String>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Alias subcommands.
#[derive(Subcommand)]
pub enum AliasAction {
    /// Add an alias for a path
    Add {
        /// Alias name
        name: String,
        /// Target dot-path
        path: String,
        /// Overwrite an existing alias
        #[arg(short, long)]
        force: bool,
    },

    /// Remove an alias
    Rm {
        /// Alias name
        name: String,
    },

    /// List aliases
    List,
}

/// Guard subcommands.
#[derive(Subcommand)]
pub enum GuardAction {
    /// Require confirmation before changes to a path
    Add {
        /// Dot-path to guard
        path: String,
    },

    /// Stop guarding a path
    Rm {
        /// Guarded dot-path
        path: String,
    },

    /// List guarded paths
    List,
}

/// Execute a parsed command.
pub fn execute(command: Command, dir: Option<PathBuf>) -> Result<()> {
    match command {
        Command::Get { path, decrypt } => get::execute(dir, &path, decrypt),
        Command::Set {
            path,
            value,
            encrypt,
            yes,
        } => set::execute(dir, &path, value, encrypt, yes),
        Command::Rm { path, yes } => rm::execute(dir, &path, yes),
        Command::List { prefix, json } => list::execute(dir, prefix.as_deref(), json),
        Command::Tree { prefix } => tree::execute(dir, prefix.as_deref()),
        Command::Search { term } => search::execute(dir, &term),
        Command::Alias { action } => alias::execute(dir, action),
        Command::Guard { action } => guard::execute(dir, action),
        Command::Import {
            file,
            replace,
            preview,
            yes,
        } => import::execute(dir, &file, replace, preview, yes),
        Command::Export { prefix, output } => {
            export::execute(dir, prefix.as_deref(), output.as_deref())
        }
        Command::Completions { shell } => completions::execute(shell),
    }
}
