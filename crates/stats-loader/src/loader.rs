//! Loader implementations selected by a profile's `loader_class`.
//!
//! A loader answers every question the engine asks about one profile's
//! manifest. [`StatsLoader`] is the real one; [`FakeLoader`] lets embedders
//! run their own tests without built assets. Further implementations are
//! registered by name in [`LoaderFactories`] at start-up.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::config::LoaderConfig;
use crate::manifest::{AssetDescriptor, Manifest, ResolvedChunk};
use crate::resolver::BundleResolver;
use crate::source::{FileSource, ManifestSource};
use crate::storage::StaticStorage;
use crate::store::ManifestStore;
use crate::url_builder::UrlBuilder;
use crate::{Error, Result};

/// Everything a factory needs to build a loader for one profile.
#[derive(Clone)]
pub struct LoaderContext {
    pub config: Arc<LoaderConfig>,
    pub storage: Arc<dyn StaticStorage>,
}

impl LoaderContext {
    pub fn new(config: LoaderConfig, storage: Arc<dyn StaticStorage>) -> Self {
        Self {
            config: Arc::new(config),
            storage,
        }
    }

    pub fn url_builder(&self) -> UrlBuilder {
        UrlBuilder::new(self.config.bundle_dir_name.clone(), Arc::clone(&self.storage))
    }
}

/// Resolves names against one profile's manifest.
pub trait AssetLoader: Send + Sync {
    /// Profile this loader serves.
    fn name(&self) -> &str;

    fn config(&self) -> &LoaderConfig;

    /// The whole manifest.
    fn get_assets(&self) -> Result<Arc<Manifest>>;

    /// Chunks of a bundle with their URLs.
    fn get_bundle(&self, name: &str) -> Result<Vec<ResolvedChunk>>;

    /// Chunks of an entrypoint with their URLs.
    fn get_entry(&self, name: &str) -> Result<Vec<ResolvedChunk>>;

    /// The asset built from a given source file, if any.
    fn get_asset_by_source_filename(&self, source: &str) -> Result<Option<AssetDescriptor>> {
        Ok(self.get_assets()?.asset_by_source_filename(source).cloned())
    }

    /// URL of a non-chunk asset: the manifest's `publicPath` prefixed to the
    /// name, or the storage URL when there is no usable `publicPath`.
    fn get_static_url(&self, asset_name: &str) -> Result<String>;
}

/// Loader backed by the stats file the bundler writes.
pub struct StatsLoader {
    resolver: BundleResolver,
    urls: UrlBuilder,
}

impl StatsLoader {
    /// Read the manifest from the profile's `stats_file`.
    pub fn new(ctx: LoaderContext) -> Self {
        let source = FileSource::new(ctx.config.stats_file.clone());
        Self::with_source(ctx, Box::new(source))
    }

    /// Read the manifest from a custom source.
    pub fn with_source(ctx: LoaderContext, source: Box<dyn ManifestSource>) -> Self {
        let store = ManifestStore::new(source, ctx.config.cache, ctx.config.cache_ttl);
        Self {
            urls: ctx.url_builder(),
            resolver: BundleResolver::new(ctx.config, store),
        }
    }

    pub fn resolver(&self) -> &BundleResolver {
        &self.resolver
    }

    fn with_urls(&self, descriptors: Vec<AssetDescriptor>) -> Vec<ResolvedChunk> {
        descriptors
            .into_iter()
            .map(|desc| ResolvedChunk {
                url: self.urls.url_for(&desc),
                name: desc.name,
                integrity: desc.integrity,
                source_filename: desc.source_filename,
            })
            .collect()
    }
}

impl AssetLoader for StatsLoader {
    fn name(&self) -> &str {
        &self.resolver.config().profile
    }

    fn config(&self) -> &LoaderConfig {
        self.resolver.config()
    }

    fn get_assets(&self) -> Result<Arc<Manifest>> {
        self.resolver.store().load()
    }

    fn get_bundle(&self, name: &str) -> Result<Vec<ResolvedChunk>> {
        let descriptors = self.resolver.resolve_bundle(name)?;
        Ok(self.with_urls(descriptors))
    }

    fn get_entry(&self, name: &str) -> Result<Vec<ResolvedChunk>> {
        let descriptors = self.resolver.resolve_entrypoint(name)?;
        Ok(self.with_urls(descriptors))
    }

    fn get_static_url(&self, asset_name: &str) -> Result<String> {
        let manifest = self.get_assets()?;
        Ok(match manifest.explicit_public_path() {
            Some(public_path) => format!("{public_path}{asset_name}"),
            None => self.urls.storage_url(asset_name),
        })
    }
}

/// Loader for embedders' tests: every bundle is one fixed script.
pub struct FakeLoader {
    config: Arc<LoaderConfig>,
    urls: UrlBuilder,
}

impl FakeLoader {
    pub const BUNDLE_NAME: &'static str = "test.bundle.js";
    pub const BUNDLE_URL: &'static str = "http://localhost/static/webpack_bundles/test.bundle.js";

    pub fn new(ctx: LoaderContext) -> Self {
        Self {
            urls: ctx.url_builder(),
            config: ctx.config,
        }
    }

    fn fixed_bundle() -> Vec<ResolvedChunk> {
        vec![ResolvedChunk {
            name: Self::BUNDLE_NAME.to_string(),
            url: Self::BUNDLE_URL.to_string(),
            integrity: None,
            source_filename: None,
        }]
    }
}

impl AssetLoader for FakeLoader {
    fn name(&self) -> &str {
        &self.config.profile
    }

    fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn get_assets(&self) -> Result<Arc<Manifest>> {
        Ok(Arc::new(Manifest::done()))
    }

    fn get_bundle(&self, _name: &str) -> Result<Vec<ResolvedChunk>> {
        Ok(Self::fixed_bundle())
    }

    fn get_entry(&self, _name: &str) -> Result<Vec<ResolvedChunk>> {
        Ok(Self::fixed_bundle())
    }

    fn get_static_url(&self, asset_name: &str) -> Result<String> {
        Ok(self.urls.storage_url(asset_name))
    }
}

/// Builds a loader for a profile.
pub type LoaderFactory = Arc<dyn Fn(LoaderContext) -> Result<Arc<dyn AssetLoader>> + Send + Sync>;

/// Loader implementations by `loader_class` name.
///
/// `webpack` ([`StatsLoader`]) and `fake` ([`FakeLoader`]) are always
/// available.
#[derive(Clone)]
pub struct LoaderFactories {
    factories: FxHashMap<String, LoaderFactory>,
}

impl Default for LoaderFactories {
    fn default() -> Self {
        let mut factories = Self {
            factories: FxHashMap::default(),
        };
        factories.register("webpack", |ctx| {
            Ok(Arc::new(StatsLoader::new(ctx)) as Arc<dyn AssetLoader>)
        });
        factories.register("fake", |ctx| {
            Ok(Arc::new(FakeLoader::new(ctx)) as Arc<dyn AssetLoader>)
        });
        factories
    }
}

impl LoaderFactories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(LoaderContext) -> Result<Arc<dyn AssetLoader>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build the loader named by the context's `loader_class`.
    pub fn create(&self, ctx: LoaderContext) -> Result<Arc<dyn AssetLoader>> {
        let factory = self
            .factories
            .get(&ctx.config.loader_class)
            .ok_or_else(|| Error::UnknownLoader {
                profile: ctx.config.profile.clone(),
                loader: ctx.config.loader_class.clone(),
            })?;

        tracing::debug!(
            profile = %ctx.config.profile,
            loader = %ctx.config.loader_class,
            "creating loader"
        );
        factory(ctx)
    }
}

impl std::fmt::Debug for LoaderFactories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("LoaderFactories").field("names", &names).finish()
    }
}
