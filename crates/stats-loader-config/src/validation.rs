//! Pluggable settings validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::Settings;
use crate::error::{ConfigError, Result};
use crate::profile::ProfileOptions;

const CROSSORIGIN_VALUES: &[&str] = &["", "anonymous", "use-credentials"];

/// Trait for pluggable settings validation strategies
pub trait ConfigValidator {
    /// Validate a single named profile
    fn validate(&self, name: &str, options: &ProfileOptions) -> Result<()>;

    /// Validate every profile of a settings document, in declaration order
    fn validate_all(&self, settings: &Settings) -> Result<()> {
        for (name, options) in &settings.profiles {
            self.validate(name, options)?;
        }
        Ok(())
    }
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use stats_loader_config::{ConfigValidator, ProfileOptions, SchemaValidator};
///
/// SchemaValidator.validate("DEFAULT", &ProfileOptions::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, name: &str, options: &ProfileOptions) -> Result<()> {
        let fail = |message: String, hint: &str| ConfigError::SchemaValidation {
            profile: name.to_string(),
            message,
            hint: Some(hint.to_string()),
        };

        for pattern in &options.ignore {
            if let Err(e) = Regex::new(pattern) {
                return Err(fail(
                    format!("ignore pattern `{pattern}` is not a valid regular expression: {e}"),
                    "Fix or remove the pattern in `ignore`",
                ));
            }
        }

        if !(options.poll_interval > 0.0) {
            return Err(fail(
                format!("poll_interval must be positive, got {}", options.poll_interval),
                "Use a small positive number of seconds, e.g. 0.1",
            ));
        }

        if let Some(timeout) = options.timeout {
            if timeout < 0.0 || timeout.is_nan() {
                return Err(fail(
                    format!("timeout cannot be negative, got {timeout}"),
                    "Use 0 or leave `timeout` unset to wait forever",
                ));
            }
        }

        if !CROSSORIGIN_VALUES.contains(&options.crossorigin.as_str()) {
            return Err(fail(
                format!("unsupported crossorigin value `{}`", options.crossorigin),
                "Use \"\", \"anonymous\" or \"use-credentials\"",
            ));
        }

        if options.loader_class.trim().is_empty() {
            return Err(fail(
                "loader_class cannot be empty".to_string(),
                "Remove `loader_class` to use the default \"webpack\" loader",
            ));
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs the schema checks, then checks that each profile's manifest exists.
/// Manifest paths containing a `{locale}` placeholder are skipped.
///
/// # Example
///
/// ```no_run
/// use stats_loader_config::{ConfigValidator, FsValidator, Settings};
///
/// FsValidator::new(".").validate_all(&Settings::default()).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, name: &str, options: &ProfileOptions) -> Result<()> {
        SchemaValidator.validate(name, options)?;

        if options.stats_file.to_string_lossy().contains("{locale}") {
            tracing::debug!(profile = name, "skipping locale-keyed stats file check");
            return Ok(());
        }

        let path = self.root.join(&options.stats_file);
        if !path.exists() {
            return Err(ConfigError::StatsFileNotFound { path });
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation of every profile
pub fn validate_schema(settings: &Settings) -> Result<()> {
    SchemaValidator.validate_all(settings)
}

/// Convenience function for filesystem validation of every profile
pub fn validate_fs(settings: &Settings, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate_all(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_schema_validation() {
        assert!(validate_schema(&Settings::default()).is_ok());
    }

    #[test]
    fn bad_regex_is_reported_with_profile() {
        let options = ProfileOptions {
            ignore: vec!["(unclosed".to_string()],
            ..ProfileOptions::default()
        };

        match SchemaValidator.validate("APP", &options).unwrap_err() {
            ConfigError::SchemaValidation { profile, message, .. } => {
                assert_eq!(profile, "APP");
                assert!(message.contains("(unclosed"));
            }
            other => panic!("expected SchemaValidation, got {other:?}"),
        }
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let options = ProfileOptions {
            poll_interval: 0.0,
            ..ProfileOptions::default()
        };
        assert!(SchemaValidator.validate("DEFAULT", &options).is_err());
    }
}
