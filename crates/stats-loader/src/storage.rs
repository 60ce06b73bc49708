//! Static file storage backends.
//!
//! The storage performs the last step of URL construction: it turns a path
//! relative to the static root (`webpack_bundles/main.js`) into a URL.

use std::fmt;
use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left alone when a storage path becomes part of a URL.
const PATH_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'(')
    .remove(b')')
    .remove(b'\'');

/// Maps storage paths to URLs.
pub trait StaticStorage: Send + Sync {
    fn url(&self, path: &str) -> String;

    /// Whether `url` returns pre-signed URLs that should have their
    /// signature parameters stripped before being embedded.
    fn signs_urls(&self) -> bool {
        false
    }
}

/// Serves files under a fixed URL prefix (`/static/` by default).
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base_url: String,
}

impl FileSystemStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for FileSystemStorage {
    fn default() -> Self {
        Self::new("/static/")
    }
}

impl StaticStorage for FileSystemStorage {
    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

type Presigner = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A cloud object store (S3 and compatibles) that may hand out pre-signed URLs.
#[derive(Clone)]
pub struct ObjectStoreStorage {
    base_url: String,
    presign: Option<Presigner>,
}

impl ObjectStoreStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            presign: None,
        }
    }

    /// Sign every URL with `presign`, which receives the unsigned URL.
    pub fn with_presigner(
        mut self,
        presign: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.presign = Some(Arc::new(presign));
        self
    }
}

impl StaticStorage for ObjectStoreStorage {
    fn url(&self, path: &str) -> String {
        let url = join_url(&self.base_url, path);
        match &self.presign {
            Some(presign) => presign(&url),
            None => url,
        }
    }

    fn signs_urls(&self) -> bool {
        true
    }
}

impl fmt::Debug for ObjectStoreStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStoreStorage")
            .field("base_url", &self.base_url)
            .field("presign", &self.presign.is_some())
            .finish()
    }
}

fn join_url(base: &str, path: &str) -> String {
    let path = utf8_percent_encode(path.trim_start_matches('/'), PATH_SAFE).to_string();
    if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
