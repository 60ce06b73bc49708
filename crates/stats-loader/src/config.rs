//! Resolved per-profile loader configuration.
//!
//! `ProfileOptions` is what the settings file says; `LoaderConfig` is what a
//! loader runs with: regexes compiled, seconds turned into durations, the
//! debug flag folded into the cache decision and `{locale}` substituted.

use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;
use stats_loader_config::{ConfigError, ConfigValidator, ProfileOptions, SchemaValidator};

use crate::Result;

/// Immutable configuration of one loader instance.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub profile: String,
    /// Environment debug flag; enables the compile waiter.
    pub debug: bool,
    pub cache: bool,
    /// `None` never expires.
    pub cache_ttl: Option<Duration>,
    pub bundle_dir_name: String,
    pub stats_file: PathBuf,
    pub poll_interval: Duration,
    /// Seconds; `None` waits forever.
    pub timeout: Option<f64>,
    /// Compiled `ignore` patterns, anchored at the start of the name.
    pub ignore: Vec<Regex>,
    pub loader_class: String,
    pub integrity: bool,
    pub crossorigin: String,
    pub csp_nonce: bool,
    pub skip_common_chunks: bool,
    pub exclude_runtime: bool,
    pub base_entrypoint: Option<String>,
}

impl LoaderConfig {
    /// Validate and resolve a profile.
    pub fn resolve(
        profile: &str,
        options: &ProfileOptions,
        debug: bool,
        locale: Option<&str>,
    ) -> Result<Self> {
        SchemaValidator.validate(profile, options)?;

        let ignore = options
            .ignore
            .iter()
            .map(|pattern| compile_ignore(profile, pattern))
            .collect::<Result<Vec<_>>>()?;

        let cache_ttl = if options.cache_ttl > 0.0 {
            Some(seconds(profile, "cache_ttl", options.cache_ttl)?)
        } else {
            None
        };

        let timeout = options.timeout.filter(|secs| *secs > 0.0);

        Ok(Self {
            profile: profile.to_string(),
            debug,
            cache: options.cache_enabled(debug),
            cache_ttl,
            bundle_dir_name: options.bundle_dir_name.clone(),
            stats_file: options.stats_file_for(locale),
            poll_interval: seconds(profile, "poll_interval", options.poll_interval)?,
            timeout,
            ignore,
            loader_class: options.loader_class.clone(),
            integrity: options.integrity,
            crossorigin: options.crossorigin.clone(),
            csp_nonce: options.csp_nonce,
            skip_common_chunks: options.skip_common_chunks,
            exclude_runtime: options.exclude_runtime,
            base_entrypoint: options.base_entrypoint.clone(),
        })
    }

    /// Whether a chunk name matches any `ignore` pattern.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|re| re.is_match(name))
    }
}

fn compile_ignore(profile: &str, pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})")).map_err(|e| {
        ConfigError::SchemaValidation {
            profile: profile.to_string(),
            message: format!("ignore pattern `{pattern}` is not a valid regular expression: {e}"),
            hint: None,
        }
        .into()
    })
}

fn seconds(profile: &str, field: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value).map_err(|e| {
        ConfigError::InvalidValue {
            field: format!("profiles.{profile}.{field}"),
            hint: Some(e.to_string()),
        }
        .into()
    })
}
