#![cfg_attr(docsrs, feature(doc_cfg))]

//! # stats-loader
//!
//! Resolves the stats manifest written by a bundler's tracker plugin
//! (`webpack-stats.json`) into servable URLs and `<script>`/`<link>` tags for
//! server-rendered templates.
//!
//! ## Quick Start
//!
//! ```no_run
//! use stats_loader::{Engine, RequestContext, Settings, TagOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::new(Settings::default());
//!
//! let mut request = RequestContext::new().with_host("example.com");
//! let tags = engine.get_as_tags(
//!     "DEFAULT",
//!     "main",
//!     &TagOptions::default().skip_common_chunks(true),
//!     Some(&mut request),
//! )?;
//!
//! for tag in tags {
//!     println!("{tag}");
//! }
//! # Ok(()) }
//! ```
//!
//! ## Layout
//!
//! - [`ManifestStore`] reads and memoizes the manifest through a
//!   [`ManifestSource`].
//! - [`CompileWaiter`] blocks on in-progress builds in debug mode.
//! - [`BundleResolver`] maps bundle and entrypoint names to chunk lists.
//! - [`UrlBuilder`] turns chunks into URLs through a [`StaticStorage`].
//! - [`TagRenderer`] renders tags; [`dedup`] suppresses repeats per request.
//! - [`Engine`] ties it together behind a [`LoaderRegistry`].

pub mod config;
pub mod dedup;
pub mod engine;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod request;
pub mod resolver;
pub mod source;
pub mod storage;
pub mod store;
pub mod tags;
pub mod url_builder;
pub mod waiter;

pub use config::LoaderConfig;
pub use dedup::{DedupSet, filter_unseen, record_seen};
pub use engine::Engine;
pub use loader::{
    AssetLoader, FakeLoader, LoaderContext, LoaderFactories, LoaderFactory, StatsLoader,
};
pub use manifest::{AssetDescriptor, ChunkRef, EntryGroup, Manifest, ResolvedChunk, Status};
pub use registry::LoaderRegistry;
pub use request::RequestContext;
pub use resolver::{BundleResolver, filter_by_extension, matches_extension};
pub use source::{FileSource, ManifestSource, StaticSource};
pub use storage::{FileSystemStorage, ObjectStoreStorage, StaticStorage};
pub use store::ManifestStore;
pub use tags::{TagOptions, TagRenderer};
pub use url_builder::{UrlBuilder, netloc, strip_signed_params};
pub use waiter::CompileWaiter;

// Re-export the settings types embedders need to build an engine
pub use stats_loader_config::{ConfigError, DEFAULT_PROFILE, ProfileOptions, Settings};

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::LogLevel;

use std::path::PathBuf;

/// Error types for stats-loader operations.
///
/// Every variant is terminal for the current request. The only retrying
/// happens inside [`CompileWaiter`], bounded by the profile's timeout.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The manifest could not be opened or parsed.
    #[error(
        "Error reading {}. Are you sure the bundler has generated the file and the path is correct?",
        .path.display()
    )]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest parsed but lacks the data a request needs.
    #[error("{0}")]
    ManifestInvalid(String),

    /// The manifest reports a failed build.
    #[error("{error} in {file}\n{message}")]
    Build {
        error: String,
        file: String,
        message: String,
    },

    /// Waited past the profile's timeout for a build to finish.
    #[error("Timed Out. Bundle `{bundle}` took more than {timeout} seconds to compile.")]
    CompileTimeout { bundle: String, timeout: f64 },

    /// A bundle, entrypoint or asset name is absent from the manifest.
    #[error("{0}")]
    BundleNotFound(String),

    /// Invalid or missing settings.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `loader_class` names a loader no factory is registered for.
    #[error("Unknown loader `{loader}` configured for profile `{profile}`")]
    UnknownLoader { profile: String, loader: String },
}

/// Result type alias for stats-loader operations.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) const INVALID_STATS: &str = "The stats file does not contain valid data. Make sure \
     webpack-bundle-tracker plugin is enabled and try to run webpack again.";

impl Error {
    pub(crate) fn invalid_stats() -> Self {
        Error::ManifestInvalid(INVALID_STATS.to_string())
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::ManifestRead { .. } => "MANIFEST_READ",
            Error::ManifestInvalid(_) => "MANIFEST_INVALID",
            Error::Build { .. } => "BUILD_ERROR",
            Error::CompileTimeout { .. } => "COMPILE_TIMEOUT",
            Error::BundleNotFound(_) => "BUNDLE_NOT_FOUND",
            Error::Config(_) => "INVALID_CONFIG",
            Error::UnknownLoader { .. } => "UNKNOWN_LOADER",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::ManifestRead { .. } => Some(Box::new(
                "Run the bundler with the stats tracker plugin, or point `stats_file` at its output.",
            )),
            Error::Build { .. } => Some(Box::new(
                "Fix the build error reported by the bundler, then reload.",
            )),
            Error::CompileTimeout { .. } => Some(Box::new(
                "Check that the bundler is still running, or raise `timeout` for this profile.",
            )),
            Error::Config(err) => err.help().map(|h| Box::new(h) as Box<dyn std::fmt::Display>),
            Error::UnknownLoader { loader, .. } => Some(Box::new(format!(
                "Register a factory for `{loader}` with LoaderFactories::register, or use \"webpack\"."
            ))),
            _ => None,
        }
    }
}
