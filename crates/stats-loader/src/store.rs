//! Manifest loading with optional memoization.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::Result;
use crate::manifest::Manifest;
use crate::source::ManifestSource;

/// Loads manifests from a [`ManifestSource`], memoizing terminal ones.
///
/// Only `done` and `error` manifests are memoized, so a pending build is
/// always re-read. Concurrent population is last-write-wins.
pub struct ManifestStore {
    source: Box<dyn ManifestSource>,
    cache: bool,
    ttl: Option<Duration>,
    memo: RwLock<Option<Memo>>,
}

struct Memo {
    manifest: Arc<Manifest>,
    loaded_at: Instant,
}

impl ManifestStore {
    /// `ttl: None` keeps a memoized manifest forever.
    pub fn new(source: Box<dyn ManifestSource>, cache: bool, ttl: Option<Duration>) -> Self {
        Self {
            source,
            cache,
            ttl,
            memo: RwLock::new(None),
        }
    }

    pub fn load(&self) -> Result<Arc<Manifest>> {
        if !self.cache {
            return self.source.read().map(Arc::new);
        }

        if let Some(memo) = self.memo.read().as_ref() {
            if !self.expired(memo) {
                tracing::trace!(source = %self.source.describe(), "manifest cache hit");
                return Ok(Arc::clone(&memo.manifest));
            }
            tracing::debug!(source = %self.source.describe(), "manifest cache expired");
        }

        let manifest = Arc::new(self.source.read()?);
        if manifest.status.is_terminal() {
            *self.memo.write() = Some(Memo {
                manifest: Arc::clone(&manifest),
                loaded_at: Instant::now(),
            });
        }
        Ok(manifest)
    }

    /// Drop the memoized manifest, if any.
    pub fn invalidate(&self) {
        self.memo.write().take();
    }

    pub fn is_cached(&self) -> bool {
        self.memo.read().as_ref().is_some_and(|memo| !self.expired(memo))
    }

    fn expired(&self, memo: &Memo) -> bool {
        self.ttl
            .is_some_and(|ttl| memo.loaded_at.elapsed() >= ttl)
    }
}

impl std::fmt::Debug for ManifestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestStore")
            .field("source", &self.source.describe())
            .field("cache", &self.cache)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
