//! Settings for the stats-loader asset engine.
//!
//! Settings are organised as named profiles, each describing one bundler
//! build (its manifest path, URL prefix, filters and tag options).

pub mod config;
pub mod discovery;
pub mod error;
pub mod profile;
pub mod validation;

// Re-export main types
pub use config::*;
pub use error::*;
pub use profile::*;

// Re-export discovery and validation
pub use discovery::{ConfigDiscovery, discover, load_from};
pub use validation::{
    ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema,
};
