//! Per-request state supplied by the embedding web layer.

use crate::dedup::DedupSet;

/// What the engine needs to know about the current request.
///
/// Owned by the embedding layer for the lifetime of one request/response
/// and passed by `&mut`, never shared between requests.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Value of the `Host` header.
    pub host: Option<String>,
    /// Nonce of the response's Content-Security-Policy.
    pub csp_nonce: Option<String>,
    /// URLs already emitted during this request.
    pub used_urls: DedupSet,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_csp_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.csp_nonce = Some(nonce.into());
        self
    }
}
