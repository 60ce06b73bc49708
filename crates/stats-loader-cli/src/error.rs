//! Error handling for the stats-loader CLI.
//!
//! Commands return [`CliError`]; `main` turns it into a miette report.
//! Engine errors already implement `miette::Diagnostic` and keep their codes
//! and help text; settings errors get their help attached here.

use miette::Report;
use stats_loader_config::ConfigError;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Resolution errors from the engine (manifest, build, lookup)
    #[error(transparent)]
    Engine(#[from] stats_loader::Error),

    /// Settings could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No manifest asset records the given source file
    #[error("No asset was built from `{0}`")]
    SourceNotFound(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors (current directory, stdout)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a [`CliError`] into a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Engine(e) => Report::new(e),
        CliError::Config(e) => match e.help() {
            Some(help) => miette::miette!(help = help, "Configuration error: {}", e),
            None => miette::miette!("Configuration error: {}", e),
        },
        CliError::SourceNotFound(ref source) => miette::miette!(
            help = "The manifest records `sourceFilename` only when the tracker plugin is configured to",
            "No asset was built from `{}`",
            source
        ),
        other => miette::miette!("{}", other),
    }
}
