//! File-based settings discovery
//!
//! Handles finding and loading settings files from the filesystem and
//! layering environment overrides on top.

use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde_json::Value;

use crate::config::Settings;
use crate::error::{ConfigError, Result};

/// File name searched for in the discovery root.
pub const SETTINGS_FILE: &str = "stats-loader.toml";

/// Field of `package.json` that may hold the settings instead.
pub const PACKAGE_JSON_FIELD: &str = "statsLoader";

/// Prefix of environment variables overriding top-level settings
/// (`STATS_LOADER_DEBUG`, `STATS_LOADER_STATIC_URL`).
pub const ENV_PREFIX: &str = "STATS_LOADER_";

/// File-based settings discovery
///
/// Searches for a settings file in conventional locations and loads it.
/// Library users can also build `Settings` directly or via `Settings::from_value()`.
///
/// # Example
///
/// ```no_run
/// use stats_loader_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let settings = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new settings discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a settings file in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML settings: stats-loader.toml
    /// 2. package.json (statsLoader field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(SETTINGS_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed
                        .get(PACKAGE_JSON_FIELD)
                        .is_some_and(|field| !field.is_null())
                    {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load settings from the discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no settings file is found.
    pub fn load(&self) -> Result<Settings> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        load_from(&path)
    }

    /// Load settings from the discovered file, or defaults (plus environment
    /// overrides) when there is none.
    pub fn load_or_default(&self) -> Result<Settings> {
        match self.find() {
            Some(path) => load_from(&path),
            None => extract(Figment::from(Serialized::defaults(Settings::default()))),
        }
    }
}

/// Load settings from a specific file path.
///
/// `.toml` files are read as TOML, `package.json` through its `statsLoader`
/// field, any other `.json` file as a plain settings document.
pub fn load_from(path: &Path) -> Result<Settings> {
    let file_name = path.file_name().and_then(|name| name.to_str());
    let extension = path.extension().and_then(|ext| ext.to_str());

    let figment = match (file_name, extension) {
        (Some("package.json"), _) => {
            Figment::from(Serialized::defaults(package_json_settings(path)?))
        }
        (_, Some("toml")) => {
            if !path.exists() {
                return Err(ConfigError::NotFound);
            }
            Figment::from(Toml::file(path))
        }
        (_, Some("json")) => {
            let content = fs::read_to_string(path)?;
            let parsed: Value =
                serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                    field: path.display().to_string(),
                    hint: Some(format!("Invalid JSON: {}", e)),
                })?;
            Figment::from(Serialized::defaults(parsed))
        }
        _ => {
            return Err(ConfigError::UnsupportedFormat(
                path.display().to_string(),
            ));
        }
    };

    tracing::debug!(path = %path.display(), "loading stats-loader settings");
    extract(figment)
}

fn package_json_settings(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    let parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {}", e)),
    })?;

    let value = parsed
        .get(PACKAGE_JSON_FIELD)
        .ok_or_else(|| ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some(format!(
                "Add a '{}' field to your package.json",
                PACKAGE_JSON_FIELD
            )),
        })?;

    if value.is_null() {
        return Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: Some(format!("The '{}' field cannot be null", PACKAGE_JSON_FIELD)),
        });
    }

    Ok(value.clone())
}

/// Merge environment overrides and deserialize.
///
/// Extraction goes through `serde_json::Value` first so that the nesting
/// check in `Settings::from_value` sees the raw document.
fn extract(figment: Figment) -> Result<Settings> {
    let value: Value = figment
        .merge(Env::prefixed(ENV_PREFIX).only(&["debug", "static_url"]))
        .extract()
        .map_err(|e| ConfigError::InvalidValue {
            field: "settings".to_string(),
            hint: Some(e.to_string()),
        })?;

    Settings::from_value(value)
}

/// Discover and load settings from the current directory (convenience function)
///
/// Falls back to defaults when no settings file exists.
pub fn discover() -> Result<Settings> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_or_default()
}
