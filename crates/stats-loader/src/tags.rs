//! `<script>` and `<link>` tag rendering.

use indexmap::IndexMap;

use crate::config::LoaderConfig;
use crate::manifest::ResolvedChunk;
use crate::request::RequestContext;
use crate::resolver::matches_extension;
use crate::url_builder::netloc;
use crate::{Error, Result};

/// Per-call rendering options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    /// Only render chunks of this extension family (`js`, `css`).
    pub extension: Option<String>,
    /// Raw attribute text, inserted verbatim. Must already be escaped.
    pub attrs: String,
    /// Appended to every URL, e.g. a cache-busting query string.
    pub suffix: String,
    /// Render `rel="preload"` links instead of loading tags.
    pub is_preload: bool,
    /// Overrides the profile's `skip_common_chunks` when set.
    pub skip_common_chunks: Option<bool>,
    /// Selects a locale-specific manifest.
    pub locale: Option<String>,
}

impl TagOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn attrs(mut self, attrs: impl Into<String>) -> Self {
        self.attrs = attrs.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn preload(mut self, is_preload: bool) -> Self {
        self.is_preload = is_preload;
        self
    }

    pub fn skip_common_chunks(mut self, skip: bool) -> Self {
        self.skip_common_chunks = Some(skip);
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Script,
    Style,
}

impl TagKind {
    fn of(name: &str) -> Option<Self> {
        if matches_extension(name, "js") {
            Some(TagKind::Script)
        } else if matches_extension(name, "css") {
            Some(TagKind::Style)
        } else {
            None
        }
    }
}

/// Renders resolved chunks as markup, with the profile's integrity,
/// crossorigin and nonce policy.
#[derive(Debug, Clone)]
pub struct TagRenderer {
    integrity: bool,
    crossorigin: String,
    csp_nonce: bool,
}

impl TagRenderer {
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            integrity: config.integrity,
            crossorigin: config.crossorigin.clone(),
            csp_nonce: config.csp_nonce,
        }
    }

    /// Render one tag per script or stylesheet chunk, keyed by chunk URL.
    ///
    /// Chunks of other types are skipped.
    pub fn render(
        &self,
        chunks: &[ResolvedChunk],
        attrs: &str,
        suffix: &str,
        is_preload: bool,
        request: Option<&RequestContext>,
    ) -> Result<IndexMap<String, String>> {
        let attrs_lower = attrs.to_lowercase();
        let mut tags = IndexMap::with_capacity(chunks.len());

        for chunk in chunks {
            let Some(kind) = TagKind::of(&chunk.name) else {
                continue;
            };

            let href = format!("{}{}", chunk.url, suffix);
            let integrity = self.integrity_attr(chunk, request, &attrs_lower)?;
            let nonce = self.nonce_attr(chunk, request, &attrs_lower);

            let tag = match (kind, is_preload) {
                (TagKind::Script, false) => {
                    format!(r#"<script src="{href}"{integrity}{nonce}{attrs}></script>"#)
                }
                (TagKind::Script, true) => format!(
                    r#"<link rel="preload" as="script" href="{href}"{integrity}{nonce}{attrs}/>"#
                ),
                (TagKind::Style, false) => format!(
                    r#"<link href="{href}" rel="stylesheet"{integrity}{nonce}{attrs}/>"#
                ),
                (TagKind::Style, true) => format!(
                    r#"<link href="{href}" rel="preload" as="style"{integrity}{nonce}{attrs}/>"#
                ),
            };

            tags.insert(chunk.url.clone(), tag);
        }

        Ok(tags)
    }

    /// `" "` without integrity, else ` integrity="..." ` plus crossorigin
    /// when the chunk is served from another host.
    fn integrity_attr(
        &self,
        chunk: &ResolvedChunk,
        request: Option<&RequestContext>,
        attrs_lower: &str,
    ) -> Result<String> {
        if !self.integrity {
            return Ok(" ".to_string());
        }

        let integrity = chunk
            .integrity
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                Error::ManifestInvalid(
                    "The stats file does not contain valid data: integrity is enabled, but \
                     chunk does not contain an \"integrity\" key. Maybe you forgot to add \
                     integrity: true in your BundleTrackerPlugin configuration?"
                        .to_string(),
                )
            })?;

        let plain = format!(r#" integrity="{integrity}" "#);

        let Some(request) = request else {
            tracing::warn!(
                chunk = %chunk.name,
                "The crossorigin attribute might be necessary but no request was passed; \
                 the current host is needed to decide"
            );
            return Ok(plain);
        };

        if attrs_lower.contains("crossorigin") {
            return Ok(plain);
        }

        let Some(host) = request.host.as_deref().filter(|host| !host.is_empty()) else {
            tracing::warn!(
                chunk = %chunk.name,
                "The request has no host, so whether crossorigin is needed cannot be decided"
            );
            return Ok(plain);
        };

        let chunk_netloc = netloc(&chunk.url);
        if chunk_netloc.is_empty() || chunk_netloc == host {
            return Ok(plain);
        }

        if self.crossorigin.is_empty() {
            Ok(format!("{plain}crossorigin "))
        } else {
            Ok(format!(r#"{plain}crossorigin="{}" "#, self.crossorigin))
        }
    }

    fn nonce_attr(
        &self,
        chunk: &ResolvedChunk,
        request: Option<&RequestContext>,
        attrs_lower: &str,
    ) -> String {
        if !self.csp_nonce || attrs_lower.contains("nonce=") {
            return String::new();
        }

        let Some(request) = request else {
            tracing::warn!(
                chunk = %chunk.name,
                "csp_nonce is enabled but no request was passed; no nonce emitted"
            );
            return String::new();
        };

        match request.csp_nonce.as_deref() {
            Some(nonce) => format!(r#"nonce="{nonce}" "#),
            None => {
                tracing::warn!(
                    chunk = %chunk.name,
                    "csp_nonce is enabled but the request carries no nonce; no nonce emitted"
                );
                String::new()
            }
        }
    }
}
