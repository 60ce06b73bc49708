//! The stats manifest written by the bundler's tracker plugin.
//!
//! ```json
//! {
//!   "status": "done",
//!   "publicPath": "http://localhost:3000/",
//!   "chunks": { "main": ["main.js", "main.css"] },
//!   "entryPoints": { "main": [["vendors.js"], "main.js"] },
//!   "assets": { "main.js": { "name": "main.js", "integrity": "sha256-..." } }
//! }
//! ```
//!
//! A manifest is immutable once read and shared as `Arc<Manifest>`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Build status reported by the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Status {
    /// A build is in progress.
    Pending,
    Done,
    Error,
    /// No status field. Never waited on, rejected on resolve.
    #[default]
    Unrecognized,
    /// A status string this crate does not know. Treated like `Unrecognized`.
    Other(String),
}

impl Status {
    pub fn is_pending(&self) -> bool {
        matches!(self, Status::Pending)
    }

    /// Done or Error.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Done | Status::Error)
    }
}

impl From<Option<String>> for Status {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref() {
            Some("compile" | "compiling" | "pending" | "initialization") => Status::Pending,
            Some("done") => Status::Done,
            Some("error") => Status::Error,
            Some(other) => Status::Other(other.to_string()),
            None => Status::Unrecognized,
        }
    }
}

impl From<Status> for Option<String> {
    fn from(status: Status) -> Self {
        match status {
            Status::Pending => Some("compile".to_string()),
            Status::Done => Some("done".to_string()),
            Status::Error => Some("error".to_string()),
            Status::Other(raw) => Some(raw),
            Status::Unrecognized => None,
        }
    }
}

/// An output file as described by the manifest.
///
/// Unknown fields written by newer tracker versions are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescriptor {
    pub name: String,

    /// Explicit URL; the literal `"auto"` means unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    /// Whitespace-separated SRI tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_filename: Option<String>,

    /// Absolute output path on the build machine. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl AssetDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// `publicPath` unless missing, empty or `"auto"`.
    pub fn explicit_public_path(&self) -> Option<&str> {
        self.public_path
            .as_deref()
            .filter(|path| !path.is_empty() && *path != "auto")
    }
}

/// A chunk listed under a bundle: either a key into `assets` or, for older
/// tracker versions, the descriptor itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChunkRef {
    Name(String),
    Inline(AssetDescriptor),
}

impl ChunkRef {
    pub fn name(&self) -> &str {
        match self {
            ChunkRef::Name(name) => name,
            ChunkRef::Inline(desc) => &desc.name,
        }
    }
}

/// One group of an entrypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryGroup {
    Many(Vec<ChunkRef>),
    One(ChunkRef),
}

impl EntryGroup {
    pub fn chunks(&self) -> &[ChunkRef] {
        match self {
            EntryGroup::Many(chunks) => chunks,
            EntryGroup::One(chunk) => std::slice::from_ref(chunk),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub chunks: IndexMap<String, Vec<ChunkRef>>,

    /// Absent for tracker versions that do not record entrypoints.
    #[serde(default, alias = "entrypoints", skip_serializing_if = "Option::is_none")]
    pub entry_points: Option<IndexMap<String, Vec<EntryGroup>>>,

    #[serde(default)]
    pub assets: IndexMap<String, AssetDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Manifest {
    /// An empty manifest with `done` status.
    pub fn done() -> Self {
        Self {
            status: Status::Done,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Error fields with the defaults applied.
    pub fn build_error(&self) -> crate::Error {
        crate::Error::Build {
            error: self
                .error
                .clone()
                .unwrap_or_else(|| "Unknown Error".to_string()),
            file: self.file.clone().unwrap_or_default(),
            message: self.message.clone().unwrap_or_default(),
        }
    }

    /// Look a chunk reference up in `assets`.
    pub fn descriptor(&self, chunk: &ChunkRef) -> Option<AssetDescriptor> {
        match chunk {
            ChunkRef::Name(name) => self.assets.get(name).cloned(),
            ChunkRef::Inline(desc) => Some(desc.clone()),
        }
    }

    /// `publicPath` unless missing or `"auto"`.
    pub fn explicit_public_path(&self) -> Option<&str> {
        self.public_path.as_deref().filter(|path| *path != "auto")
    }

    pub fn asset_by_source_filename(&self, source: &str) -> Option<&AssetDescriptor> {
        self.assets
            .values()
            .find(|asset| asset.source_filename.as_deref() == Some(source))
    }
}

/// A chunk with its final URL, as handed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedChunk {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_filename: Option<String>,
}
