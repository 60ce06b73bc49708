//! Shared test utilities for stats-loader tests
//!
//! Manifests are written to a temporary directory and engines are built
//! fresh for every test, so no state leaks between tests.

#![allow(dead_code)]

use stats_loader::{Engine, ProfileOptions, Settings};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Manifest with two bundles sharing `vendors.js`, entrypoints, and a
/// source map that the default `ignore` patterns drop.
pub const APP_MANIFEST: &str = r#"{
  "status": "done",
  "chunks": {
    "main": ["main.js", "main.css"],
    "app1": ["vendors.js", "app1.css", "app1.js", "app1.js.map"],
    "app2": ["vendors.js", "app2.js"]
  },
  "entryPoints": {
    "app1": [["runtime.js", "vendors.js"], "app1.css", "app1.js"],
    "app2": [["runtime.js", "vendors.js"], "app2.js"],
    "common": ["runtime.js", "vendors.js"]
  },
  "assets": {
    "main.js": {"name": "main.js", "integrity": "sha256-AAA sha384-BBB"},
    "main.css": {"name": "main.css", "integrity": "sha256-CCC", "sourceFilename": "src/main.scss"},
    "runtime.js": {"name": "runtime.js", "integrity": "sha256-RRR"},
    "vendors.js": {"name": "vendors.js", "integrity": "sha256-VVV"},
    "app1.css": {"name": "app1.css", "integrity": "sha256-DDD"},
    "app1.js": {"name": "app1.js", "integrity": "sha256-EEE", "sourceFilename": "src/app1.ts"},
    "app1.js.map": {"name": "app1.js.map"},
    "app2.js": {"name": "app2.js", "integrity": "sha256-FFF"},
    "logo.png": {"name": "logo.png", "sourceFilename": "assets/logo.png"}
  }
}"#;

/// A temporary project holding one stats file.
pub struct Project {
    pub dir: TempDir,
    pub stats_file: PathBuf,
}

impl Project {
    pub fn new(manifest: &str) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let stats_file = dir.path().join("webpack-stats.json");
        write_manifest(&stats_file, manifest);
        Self { dir, stats_file }
    }

    /// Replace the stats file contents.
    pub fn rewrite(&self, manifest: &str) {
        write_manifest(&self.stats_file, manifest);
    }

    /// Settings with a `DEFAULT` profile pointed at this project's stats file.
    pub fn settings(&self, customize: impl FnOnce(&mut ProfileOptions)) -> Settings {
        let mut options = ProfileOptions {
            stats_file: self.stats_file.clone(),
            ..ProfileOptions::default()
        };
        customize(&mut options);
        Settings::default().with_profile("DEFAULT", options)
    }

    /// Engine with default storage (`/static/`).
    pub fn engine(&self, customize: impl FnOnce(&mut ProfileOptions)) -> Engine {
        Engine::new(self.settings(customize))
    }
}

pub fn write_manifest(path: &Path, manifest: &str) {
    fs::write(path, manifest).expect("write stats file");
}

/// Swap in a new stats file atomically, so a concurrent reader never sees
/// a partial write.
pub fn replace_manifest(path: &Path, manifest: &str) {
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, manifest).expect("write staged stats file");
    fs::rename(&staging, path).expect("swap stats file");
}

/// Chunk names of a resolved list.
pub fn names(chunks: &[stats_loader::ResolvedChunk]) -> Vec<&str> {
    chunks.iter().map(|chunk| chunk.name.as_str()).collect()
}
