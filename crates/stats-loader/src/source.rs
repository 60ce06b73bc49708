//! Where manifests come from.
//!
//! Loaders read through a [`ManifestSource`] so embedders can serve the
//! manifest from somewhere other than the local disk (an embedded copy, a
//! remote store, a test fixture).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::manifest::Manifest;
use crate::{Error, Result};

/// Produces a freshly parsed manifest on every call.
pub trait ManifestSource: Send + Sync {
    fn read(&self) -> Result<Manifest>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Reads the manifest from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestSource for FileSource {
    fn read(&self) -> Result<Manifest> {
        let read_error = |source: std::io::Error| Error::ManifestRead {
            path: self.path.clone(),
            source,
        };

        let content = fs::read_to_string(&self.path).map_err(read_error)?;
        let manifest = serde_json::from_str(&content).map_err(|e| read_error(e.into()))?;

        tracing::debug!(path = %self.path.display(), "read stats manifest");
        Ok(manifest)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory manifest that can be swapped at runtime.
///
/// Each read returns a copy, so swapping never affects manifests already
/// handed out.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    manifest: Arc<RwLock<Manifest>>,
}

impl StaticSource {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest: Arc::new(RwLock::new(manifest)),
        }
    }

    /// Replace the manifest returned by subsequent reads.
    pub fn set(&self, manifest: Manifest) {
        *self.manifest.write() = manifest;
    }
}

impl ManifestSource for StaticSource {
    fn read(&self) -> Result<Manifest> {
        Ok(self.manifest.read().clone())
    }

    fn describe(&self) -> String {
        "<in-memory manifest>".to_string()
    }
}
