//! Process setup shared by both binaries.
//!
//! Contains argument parsing with the repository's exit code convention and
//! logging initialization.

use addon_core::cli::ExitCode;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Parses the process arguments or exits.
///
/// Usage errors exit with [`ExitCode::ERROR`] rather than clap's default of
/// 2; `--help` and `--version` exit with [`ExitCode::SUCCESS`].
#[must_use]
pub fn parse_or_exit<P: Parser>() -> P {
    match P::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::ERROR
            } else {
                ExitCode::SUCCESS
            };
            // Nothing useful can be done if the terminal is gone.
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    }
}

/// Initializes logging infrastructure.
///
/// Logs go to stderr so stdout carries only the report. `RUST_LOG` selects
/// the level unless `verbose` forces debug; the default is info.
///
/// # Errors
///
/// Returns an error if logging initialization fails.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
