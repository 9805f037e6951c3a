//! Keynest - a hierarchical encrypted key-value store for the command line.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keynest::cli::{execute, output, Cli};
use keynest::core::constants;
use keynest::error::{Error, LockError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keynest=debug")
        } else {
            EnvFilter::new("keynest=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command, cli.dir) {
        let suggestion = match &e {
            Error::Lock(LockError::Timeout { path, .. }) => Some(format!(
                "another keynest process may hold {}.lock; retry, or delete it if stale",
                path
            )),
            Error::NoTerminal => {
                Some("re-run in a terminal, or pass --yes / the value as an argument".to_string())
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
