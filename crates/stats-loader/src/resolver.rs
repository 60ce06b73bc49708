//! Bundle and entrypoint resolution.
//!
//! Maps a bundle or entrypoint name to the ordered list of chunk descriptors
//! a page needs, after status checks and `ignore` filtering.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::config::LoaderConfig;
use crate::manifest::{AssetDescriptor, ChunkRef, Manifest, ResolvedChunk, Status};
use crate::store::ManifestStore;
use crate::waiter::CompileWaiter;
use crate::{Error, Result};

/// Substring identifying the bundler's runtime chunk.
const RUNTIME_MARKER: &str = "runtime";

pub struct BundleResolver {
    config: Arc<LoaderConfig>,
    store: ManifestStore,
    waiter: CompileWaiter,
}

impl BundleResolver {
    pub fn new(config: Arc<LoaderConfig>, store: ManifestStore) -> Self {
        let waiter = CompileWaiter::new(config.debug, config.poll_interval, config.timeout);
        Self {
            config,
            store,
            waiter,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn store(&self) -> &ManifestStore {
        &self.store
    }

    /// The manifest, after waiting out a pending build in debug mode.
    pub fn manifest(&self, bundle: &str) -> Result<Arc<Manifest>> {
        self.waiter.wait(&self.store, bundle)
    }

    /// Chunks of a bundle, in manifest order.
    pub fn resolve_bundle(&self, name: &str) -> Result<Vec<AssetDescriptor>> {
        let manifest = self.manifest(name)?;
        ensure_done(&manifest)?;

        let chunks = manifest
            .chunks
            .get(name)
            .ok_or_else(|| Error::BundleNotFound(format!("Cannot resolve bundle {name}.")))?;

        let descriptors = lookup_all(&manifest, chunks.iter())?;
        Ok(self.drop_ignored(descriptors))
    }

    /// Chunks of an entrypoint, groups flattened in order.
    ///
    /// The leading runtime chunk is dropped when `exclude_runtime` is set,
    /// and chunks shared with `base_entrypoint` are dropped when that names
    /// a different entrypoint.
    pub fn resolve_entrypoint(&self, name: &str) -> Result<Vec<AssetDescriptor>> {
        let manifest = self.manifest(name)?;
        ensure_done(&manifest)?;

        let mut descriptors = flatten_entrypoint(&manifest, name)?;

        if self.config.exclude_runtime
            && descriptors
                .first()
                .is_some_and(|first| first.name.contains(RUNTIME_MARKER))
        {
            descriptors.remove(0);
        }

        if let Some(base) = self
            .config
            .base_entrypoint
            .as_deref()
            .filter(|base| *base != name)
        {
            let base_names: FxHashSet<String> = flatten_entrypoint(&manifest, base)?
                .into_iter()
                .map(|desc| desc.name)
                .collect();
            descriptors.retain(|desc| !base_names.contains(&desc.name));
        }

        Ok(self.drop_ignored(descriptors))
    }

    fn drop_ignored(&self, descriptors: Vec<AssetDescriptor>) -> Vec<AssetDescriptor> {
        descriptors
            .into_iter()
            .filter(|desc| !self.config.is_ignored(&desc.name))
            .collect()
    }
}

/// Fail unless the manifest reports a finished, successful build.
pub(crate) fn ensure_done(manifest: &Manifest) -> Result<()> {
    match manifest.status {
        Status::Done => Ok(()),
        Status::Error => Err(manifest.build_error()),
        _ => Err(Error::invalid_stats()),
    }
}

fn flatten_entrypoint(manifest: &Manifest, name: &str) -> Result<Vec<AssetDescriptor>> {
    let entry_points = manifest.entry_points.as_ref().ok_or_else(|| {
        Error::BundleNotFound(format!(
            "The stats file has no entrypoints, so entrypoint {name} cannot be resolved. \
             Verify that the bundler and its stats tracker plugin are recent enough to \
             record entrypoints and are configured to do so."
        ))
    })?;

    let groups = entry_points
        .get(name)
        .ok_or_else(|| Error::BundleNotFound(format!("Cannot resolve entrypoint {name}.")))?;

    lookup_all(manifest, groups.iter().flat_map(|group| group.chunks()))
}

fn lookup_all<'a>(
    manifest: &Manifest,
    chunks: impl Iterator<Item = &'a ChunkRef>,
) -> Result<Vec<AssetDescriptor>> {
    chunks
        .map(|chunk| {
            manifest.descriptor(chunk).ok_or_else(|| {
                Error::BundleNotFound(format!("Cannot resolve asset {}.", chunk.name()))
            })
        })
        .collect()
}

/// Whether a file name belongs to an extension family (`js` matches
/// `main.js` and `main.js.gz`).
pub fn matches_extension(name: &str, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    let plain = format!(".{extension}");
    name.ends_with(&plain) || name.ends_with(&format!("{plain}.gz"))
}

/// Keep chunks of one extension family; `None` keeps everything.
pub fn filter_by_extension(chunks: Vec<ResolvedChunk>, extension: Option<&str>) -> Vec<ResolvedChunk> {
    match extension {
        Some(extension) => chunks
            .into_iter()
            .filter(|chunk| matches_extension(&chunk.name, extension))
            .collect(),
        None => chunks,
    }
}
