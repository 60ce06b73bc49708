//! Per-profile loader options.
//!
//! Every option has a documented default, so an empty profile table is a
//! valid profile. Keys are snake_case; the upper-case spellings used by
//! older settings files (`BUNDLE_DIR_NAME`, `STATS_FILE`, ...) are accepted
//! as aliases. Unknown keys are rejected.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the profile used when a caller does not ask for one.
pub const DEFAULT_PROFILE: &str = "DEFAULT";

/// Option names recognised inside a profile, in both spellings.
///
/// Used to detect settings documents that forgot to nest options under a
/// profile name.
pub const OPTION_KEYS: &[&str] = &[
    "cache",
    "cache_ttl",
    "bundle_dir_name",
    "stats_file",
    "poll_interval",
    "timeout",
    "ignore",
    "loader_class",
    "integrity",
    "crossorigin",
    "csp_nonce",
    "skip_common_chunks",
    "exclude_runtime",
    "base_entrypoint",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOptions {
    /// Memoize the manifest. `None` means "cache unless in debug mode".
    #[serde(default, alias = "CACHE")]
    pub cache: Option<bool>,

    /// Seconds before a memoized manifest is re-read. Non-positive never expires.
    #[serde(default = "default_cache_ttl", alias = "CACHE_TTL")]
    pub cache_ttl: f64,

    /// Prefix joined with chunk names before asking the storage for a URL.
    #[serde(default = "default_bundle_dir_name", alias = "BUNDLE_DIR_NAME")]
    pub bundle_dir_name: String,

    /// Path of the manifest written by the bundler. May contain `{locale}`.
    #[serde(default = "default_stats_file", alias = "STATS_FILE")]
    pub stats_file: PathBuf,

    /// Seconds between manifest reads while a build is in progress.
    #[serde(default = "default_poll_interval", alias = "POLL_INTERVAL")]
    pub poll_interval: f64,

    /// Seconds to wait for a build. `None` or `0` waits forever.
    #[serde(default, alias = "TIMEOUT")]
    pub timeout: Option<f64>,

    /// Regular expressions; matching chunk names are never emitted.
    #[serde(default = "default_ignore", alias = "IGNORE")]
    pub ignore: Vec<String>,

    /// Name of the loader implementation registered with the engine.
    #[serde(default = "default_loader_class", alias = "LOADER_CLASS")]
    pub loader_class: String,

    #[serde(default, alias = "INTEGRITY")]
    pub integrity: bool,

    /// Value of the `crossorigin` attribute. Empty emits a bare attribute.
    #[serde(default, alias = "CROSSORIGIN")]
    pub crossorigin: String,

    #[serde(default, alias = "CSP_NONCE")]
    pub csp_nonce: bool,

    #[serde(default, alias = "SKIP_COMMON_CHUNKS")]
    pub skip_common_chunks: bool,

    #[serde(default, alias = "EXCLUDE_RUNTIME")]
    pub exclude_runtime: bool,

    /// Entrypoint whose files are assumed to be on every page already.
    #[serde(default, alias = "BASE_ENTRYPOINT")]
    pub base_entrypoint: Option<String>,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            cache: None,
            cache_ttl: default_cache_ttl(),
            bundle_dir_name: default_bundle_dir_name(),
            stats_file: default_stats_file(),
            poll_interval: default_poll_interval(),
            timeout: None,
            ignore: default_ignore(),
            loader_class: default_loader_class(),
            integrity: false,
            crossorigin: String::new(),
            csp_nonce: false,
            skip_common_chunks: false,
            exclude_runtime: false,
            base_entrypoint: None,
        }
    }
}

impl ProfileOptions {
    /// Whether the manifest is memoized, given the environment's debug flag.
    pub fn cache_enabled(&self, debug: bool) -> bool {
        self.cache.unwrap_or(!debug)
    }

    /// Manifest path with the `{locale}` placeholder substituted.
    pub fn stats_file_for(&self, locale: Option<&str>) -> PathBuf {
        match locale {
            Some(locale) => {
                let raw = self.stats_file.to_string_lossy();
                if raw.contains("{locale}") {
                    PathBuf::from(raw.replace("{locale}", locale))
                } else {
                    self.stats_file.clone()
                }
            }
            None => self.stats_file.clone(),
        }
    }
}

fn default_cache_ttl() -> f64 {
    -1.0
}

fn default_bundle_dir_name() -> String {
    "webpack_bundles/".into()
}

fn default_stats_file() -> PathBuf {
    PathBuf::from("webpack-stats.json")
}

fn default_poll_interval() -> f64 {
    0.1
}

pub(crate) fn default_ignore() -> Vec<String> {
    vec![r".+\.hot-update.js".to_string(), r".+\.map".to_string()]
}

pub(crate) fn default_loader_class() -> String {
    "webpack".into()
}
