//! Shared utilities for command implementations.

use std::path::PathBuf;

use stats_loader::Engine;
use stats_loader_config::{ConfigDiscovery, Settings, load_from};

use crate::cli::GlobalArgs;
use crate::error::Result;

/// Load settings from `--config`, or discover them in the current
/// directory. `--debug` forces debug mode on top of whatever was loaded.
pub fn load_settings(global: &GlobalArgs) -> Result<Settings> {
    let mut settings = match &global.config {
        Some(path) => load_from(path)?,
        None => ConfigDiscovery::new(std::env::current_dir()?).load_or_default()?,
    };

    if global.debug {
        settings = settings.with_debug(true);
    }

    tracing::debug!(
        profiles = ?settings.profile_names().collect::<Vec<_>>(),
        debug = settings.debug,
        "settings loaded"
    );
    Ok(settings)
}

/// Engine over the loaded settings, with filesystem storage.
pub fn engine(global: &GlobalArgs) -> Result<Engine> {
    Ok(Engine::new(load_settings(global)?))
}

/// Directory relative stats file paths resolve against.
pub fn project_root() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}
