//! Lazily created loaders, one per profile (and locale).

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use stats_loader_config::Settings;

use crate::Result;
use crate::config::LoaderConfig;
use crate::loader::{AssetLoader, LoaderContext, LoaderFactories};
use crate::storage::StaticStorage;

type LoaderKey = (String, Option<String>);

/// Owns every loader of an engine.
///
/// Loaders are created on first use and kept for the registry's lifetime.
/// Callers get shared handles; concurrent first use of the same key keeps
/// whichever loader was inserted first.
pub struct LoaderRegistry {
    settings: Settings,
    storage: Arc<dyn StaticStorage>,
    factories: LoaderFactories,
    loaders: RwLock<FxHashMap<LoaderKey, Arc<dyn AssetLoader>>>,
}

impl LoaderRegistry {
    pub fn new(
        settings: Settings,
        storage: Arc<dyn StaticStorage>,
        factories: LoaderFactories,
    ) -> Self {
        Self {
            settings,
            storage,
            factories,
            loaders: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &Arc<dyn StaticStorage> {
        &self.storage
    }

    /// Loader for a profile, created on first use.
    ///
    /// A locale selects a separate loader whose manifest path has the
    /// `{locale}` placeholder substituted.
    pub fn get(&self, profile: &str, locale: Option<&str>) -> Result<Arc<dyn AssetLoader>> {
        let key = (profile.to_string(), locale.map(str::to_string));

        if let Some(loader) = self.loaders.read().get(&key) {
            return Ok(Arc::clone(loader));
        }

        let loader = self.create(profile, locale)?;
        let mut loaders = self.loaders.write();
        Ok(Arc::clone(loaders.entry(key).or_insert(loader)))
    }

    /// Drop every loader, and with them any memoized manifests.
    pub fn clear(&self) {
        self.loaders.write().clear();
    }

    pub fn len(&self) -> usize {
        self.loaders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.read().is_empty()
    }

    fn create(&self, profile: &str, locale: Option<&str>) -> Result<Arc<dyn AssetLoader>> {
        let options = self.settings.profile(profile)?;
        let config = LoaderConfig::resolve(profile, options, self.settings.debug, locale)?;
        self.factories
            .create(LoaderContext::new(config, Arc::clone(&self.storage)))
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("profiles", &self.settings.profile_names().collect::<Vec<_>>())
            .field("loaded", &self.len())
            .field("factories", &self.factories)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::storage::FileSystemStorage;
    use stats_loader_config::{ConfigError, ProfileOptions};

    fn registry(settings: Settings) -> LoaderRegistry {
        LoaderRegistry::new(
            settings,
            Arc::new(FileSystemStorage::default()),
            LoaderFactories::default(),
        )
    }

    #[test]
    fn loaders_are_created_once_per_key() {
        let registry = registry(Settings::default());
        assert!(registry.is_empty());

        let first = registry.get("DEFAULT", None).unwrap();
        let second = registry.get("DEFAULT", None).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let localized = registry.get("DEFAULT", Some("de")).unwrap();
        assert!(!Arc::ptr_eq(&first, &localized));
        assert_eq!(registry.len(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn locale_is_substituted_into_stats_file() {
        let settings = Settings::default().with_profile(
            "I18N",
            ProfileOptions {
                stats_file: "stats/{locale}.json".into(),
                ..ProfileOptions::default()
            },
        );
        let registry = registry(settings);

        let loader = registry.get("I18N", Some("fr")).unwrap();
        assert_eq!(loader.config().stats_file, std::path::PathBuf::from("stats/fr.json"));
    }

    #[test]
    fn unknown_profile_is_a_config_error() {
        let err = registry(Settings::default()).get("MISSING", None).err().unwrap();
        assert!(matches!(
            err,
            Error::Config(ConfigError::ProfileNotFound(ref name)) if name == "MISSING"
        ));
    }
}
