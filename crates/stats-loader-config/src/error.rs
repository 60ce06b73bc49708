//! Error types for settings loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("stats file not found: {}", .path.display())]
    StatsFileNotFound { path: PathBuf },

    // Settings parsing/loading errors
    #[error("settings file not found")]
    NotFound,

    #[error("unsupported settings format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid value for `{field}`{}", format_hint(.hint))]
    InvalidValue { field: String, hint: Option<String> },

    #[error(
        "settings are not nested by profile name (found top-level option keys: {})",
        .keys.join(", ")
    )]
    NotNested { keys: Vec<String> },

    #[error("profile `{0}` is not configured")]
    ProfileNotFound(String),

    // Schema validation errors (no filesystem checks)
    #[error("profile `{profile}`: {message}{}", format_hint(.hint))]
    SchemaValidation {
        profile: String,
        message: String,
        hint: Option<String>,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_hint(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(" ({hint})"),
        None => String::new(),
    }
}

impl ConfigError {
    /// Hint shown to users for errors that have an obvious fix.
    pub fn help(&self) -> Option<String> {
        match self {
            ConfigError::NotNested { .. } => Some(
                "Put every option under a profile table, e.g. [profiles.DEFAULT]".to_string(),
            ),
            ConfigError::ProfileNotFound(name) => {
                Some(format!("Add a [profiles.{name}] table to your settings"))
            }
            ConfigError::StatsFileNotFound { .. } => Some(
                "Run the bundler with the stats tracker plugin enabled, or fix `stats_file`"
                    .to_string(),
            ),
            ConfigError::SchemaValidation { hint, .. } => hint.clone(),
            _ => None,
        }
    }
}
