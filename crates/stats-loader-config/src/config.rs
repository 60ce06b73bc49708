//! Top-level settings document.
//!
//! This module provides the `Settings` struct and profile lookup.
//! For file discovery, see the `discovery` module.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};
use crate::profile::{DEFAULT_PROFILE, OPTION_KEYS, ProfileOptions};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Development mode: block on in-progress builds, no caching by default.
    #[serde(default)]
    pub debug: bool,

    /// URL prefix used by the default filesystem storage.
    #[serde(default = "default_static_url")]
    pub static_url: String,

    #[serde(default = "default_profiles")]
    pub profiles: IndexMap<String, ProfileOptions>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            static_url: default_static_url(),
            profiles: default_profiles(),
        }
    }
}

impl Settings {
    /// Create from serde_json::Value (for programmatic settings)
    ///
    /// # Example
    ///
    /// ```
    /// use stats_loader_config::Settings;
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "profiles": {
    ///         "DEFAULT": { "bundle_dir_name": "bundles/" }
    ///     }
    /// });
    ///
    /// let settings = Settings::from_value(value).unwrap();
    /// assert_eq!(settings.profile("DEFAULT").unwrap().bundle_dir_name, "bundles/");
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        check_nesting(&value)?;
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "settings".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "settings".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Render as a `stats-loader.toml` document.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "settings".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> ConfigResult<&ProfileOptions> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }

    /// Insert or replace a profile.
    pub fn with_profile(mut self, name: impl Into<String>, options: ProfileOptions) -> Self {
        self.profiles.insert(name.into(), options);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

/// Reject documents whose option keys sit at the top level instead of
/// under `profiles.<NAME>`.
///
/// Covers both a flat document (`bundle_dir_name = ...` at the root) and a
/// `profiles` table holding options directly.
fn check_nesting(value: &Value) -> ConfigResult<()> {
    let Some(root) = value.as_object() else {
        return Ok(());
    };

    let mut keys: Vec<String> = root
        .keys()
        .filter(|key| is_option_key(key))
        .cloned()
        .collect();

    if let Some(Value::Object(profiles)) = root.get("profiles") {
        keys.extend(
            profiles
                .iter()
                .filter(|(key, value)| is_option_key(key) && !value.is_object())
                .map(|(key, _)| format!("profiles.{key}")),
        );
    }

    if keys.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::NotNested { keys })
    }
}

fn is_option_key(key: &str) -> bool {
    let lowered = key.to_ascii_lowercase();
    OPTION_KEYS.contains(&lowered.as_str())
}

fn default_static_url() -> String {
    "/static/".into()
}

fn default_profiles() -> IndexMap<String, ProfileOptions> {
    let mut profiles = IndexMap::new();
    profiles.insert(DEFAULT_PROFILE.to_string(), ProfileOptions::default());
    profiles
}
