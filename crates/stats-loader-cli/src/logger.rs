//! Logging setup for the stats-loader CLI.
//!
//! # Example
//!
//! ```rust,no_run
//! use stats_loader_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("resolving bundle");
//! ```

use stats_loader::logging::{self, LogLevel};
use tracing_subscriber::EnvFilter;

const CLI_TARGET: &str = "stats_loader_cli";

/// Initialize the tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: debug for the stats-loader crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. warnings from the engine, info from the CLI
///
/// Call once, before anything logs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    logging::install(filter_for(verbose, quiet), !no_color);
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        cli_filter(LogLevel::Debug, LogLevel::Debug)
    } else if quiet {
        cli_filter(LogLevel::Error, LogLevel::Error)
    } else {
        logging::env_filter_or(cli_filter(LogLevel::Warn, LogLevel::Info))
    }
}

fn cli_filter(engine: LogLevel, cli: LogLevel) -> EnvFilter {
    logging::engine_filter(engine, &[(CLI_TARGET, cli)])
}
