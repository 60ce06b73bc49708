//! The engine API consumed by template integrations.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use stats_loader_config::Settings;

use crate::Result;
use crate::dedup::{filter_unseen, record_seen};
use crate::loader::{AssetLoader, LoaderFactories};
use crate::manifest::{AssetDescriptor, Manifest, ResolvedChunk};
use crate::registry::LoaderRegistry;
use crate::request::RequestContext;
use crate::resolver::filter_by_extension;
use crate::storage::{FileSystemStorage, StaticStorage};
use crate::tags::{TagOptions, TagRenderer};

/// Entry point for embedders: one per process, shared by all requests.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use stats_loader::{Engine, LoaderFactories, ObjectStoreStorage, Settings};
///
/// let storage = ObjectStoreStorage::new("https://bucket.s3.amazonaws.com/");
/// let engine = Engine::with_parts(
///     Settings::default(),
///     Arc::new(storage),
///     LoaderFactories::default(),
/// );
/// let bundle = engine.get_bundle("DEFAULT", "main").unwrap();
/// ```
#[derive(Debug)]
pub struct Engine {
    registry: LoaderRegistry,
}

impl Engine {
    /// Engine serving files under `settings.static_url` with the built-in
    /// loaders.
    pub fn new(settings: Settings) -> Self {
        let storage = Arc::new(FileSystemStorage::new(settings.static_url.clone()));
        Self::with_parts(settings, storage, LoaderFactories::default())
    }

    pub fn with_storage(settings: Settings, storage: Arc<dyn StaticStorage>) -> Self {
        Self::with_parts(settings, storage, LoaderFactories::default())
    }

    pub fn with_parts(
        settings: Settings,
        storage: Arc<dyn StaticStorage>,
        factories: LoaderFactories,
    ) -> Self {
        Self {
            registry: LoaderRegistry::new(settings, storage, factories),
        }
    }

    pub fn settings(&self) -> &Settings {
        self.registry.settings()
    }

    pub fn registry(&self) -> &LoaderRegistry {
        &self.registry
    }

    pub fn loader(&self, profile: &str, locale: Option<&str>) -> Result<Arc<dyn AssetLoader>> {
        self.registry.get(profile, locale)
    }

    pub fn get_assets(&self, profile: &str) -> Result<Arc<Manifest>> {
        self.loader(profile, None)?.get_assets()
    }

    pub fn get_bundle(&self, profile: &str, name: &str) -> Result<Vec<ResolvedChunk>> {
        self.loader(profile, None)?.get_bundle(name)
    }

    pub fn get_entry(&self, profile: &str, name: &str) -> Result<Vec<ResolvedChunk>> {
        self.loader(profile, None)?.get_entry(name)
    }

    /// Tags for a bundle, in manifest order.
    ///
    /// With `skip_common_chunks` (per call, else the profile default) and a
    /// request, URLs already emitted during the request are left out. Every
    /// URL of this bundle is recorded in the request either way.
    pub fn get_as_tags(
        &self,
        profile: &str,
        bundle: &str,
        options: &TagOptions,
        request: Option<&mut RequestContext>,
    ) -> Result<Vec<String>> {
        let loader = self.loader(profile, options.locale.as_deref())?;
        let chunks = loader.get_bundle(bundle)?;
        render_tags(loader.as_ref(), chunks, options, request)
    }

    /// Tags for an entrypoint; same rules as [`Engine::get_as_tags`].
    pub fn get_entrypoint_tags(
        &self,
        profile: &str,
        entrypoint: &str,
        options: &TagOptions,
        request: Option<&mut RequestContext>,
    ) -> Result<Vec<String>> {
        let loader = self.loader(profile, options.locale.as_deref())?;
        let chunks = loader.get_entry(entrypoint)?;
        render_tags(loader.as_ref(), chunks, options, request)
    }

    /// Chunks of a bundle rather than tags, with the same extension filter
    /// and request-scoped suppression as [`Engine::get_as_tags`].
    pub fn get_files(
        &self,
        profile: &str,
        bundle: &str,
        options: &TagOptions,
        request: Option<&mut RequestContext>,
    ) -> Result<Vec<ResolvedChunk>> {
        let loader = self.loader(profile, options.locale.as_deref())?;
        let chunks = filter_by_extension(loader.get_bundle(bundle)?, options.extension.as_deref());

        let by_url: IndexMap<String, ResolvedChunk> = chunks
            .into_iter()
            .map(|chunk| (chunk.url.clone(), chunk))
            .collect();
        let skip = options
            .skip_common_chunks
            .unwrap_or(loader.config().skip_common_chunks);

        Ok(suppress_seen(by_url, skip, request).into_values().collect())
    }

    /// Files of several entrypoints in order, each file once.
    pub fn get_unique_entrypoint_files<S: AsRef<str>>(
        &self,
        profile: &str,
        entrypoints: &[S],
        extension: Option<&str>,
    ) -> Result<Vec<ResolvedChunk>> {
        let loader = self.loader(profile, None)?;
        let mut seen = FxHashSet::default();
        let mut files = Vec::new();

        for entrypoint in entrypoints {
            let chunks = filter_by_extension(loader.get_entry(entrypoint.as_ref())?, extension);
            for chunk in chunks {
                if seen.insert(chunk.name.clone()) {
                    files.push(chunk);
                }
            }
        }

        Ok(files)
    }

    /// URL of an asset that is not part of a bundle (images, fonts).
    pub fn get_static_url(&self, profile: &str, asset_name: &str) -> Result<String> {
        self.loader(profile, None)?.get_static_url(asset_name)
    }

    pub fn get_asset_by_source_filename(
        &self,
        profile: &str,
        source: &str,
    ) -> Result<Option<AssetDescriptor>> {
        self.loader(profile, None)?.get_asset_by_source_filename(source)
    }
}

fn render_tags(
    loader: &dyn AssetLoader,
    chunks: Vec<ResolvedChunk>,
    options: &TagOptions,
    request: Option<&mut RequestContext>,
) -> Result<Vec<String>> {
    let config = loader.config();
    let chunks = filter_by_extension(chunks, options.extension.as_deref());

    let tags = TagRenderer::new(config).render(
        &chunks,
        &options.attrs,
        &options.suffix,
        options.is_preload,
        request.as_deref(),
    )?;

    let skip = options
        .skip_common_chunks
        .unwrap_or(config.skip_common_chunks);

    Ok(suppress_seen(tags, skip, request).into_values().collect())
}

fn suppress_seen<T>(
    by_url: IndexMap<String, T>,
    skip: bool,
    request: Option<&mut RequestContext>,
) -> IndexMap<String, T> {
    let Some(request) = request else {
        if skip {
            tracing::warn!(
                "skip_common_chunks is enabled but no request was passed; \
                 common chunks cannot be suppressed"
            );
        }
        return by_url;
    };

    let urls: Vec<String> = by_url.keys().cloned().collect();
    let kept = if skip {
        filter_unseen(by_url, &request.used_urls)
    } else {
        by_url
    };
    record_seen(&mut request.used_urls, &urls);
    kept
}
