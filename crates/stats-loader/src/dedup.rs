//! Request-scoped suppression of chunks already emitted.
//!
//! A page often renders several bundles that share chunks (vendors, runtime).
//! Each render records its URLs in the request's [`DedupSet`]; later renders
//! asked to skip common chunks drop URLs already in it.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// URLs emitted so far during one request. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct DedupSet {
    seen: FxHashSet<String>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Drop entries whose URL is already in `seen`, keeping order.
pub fn filter_unseen<T>(by_url: IndexMap<String, T>, seen: &DedupSet) -> IndexMap<String, T> {
    by_url
        .into_iter()
        .filter(|(url, _)| !seen.contains(url))
        .collect()
}

/// Record every URL of a render, including ones that were filtered out.
pub fn record_seen<'a>(seen: &mut DedupSet, urls: impl IntoIterator<Item = &'a String>) {
    seen.seen.extend(urls.into_iter().cloned());
}
