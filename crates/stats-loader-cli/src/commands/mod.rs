//! Command implementations.
//!
//! - [`check`] - Settings validation and manifest status
//! - [`assets`] - Whole manifest
//! - [`files`] - Bundle and entrypoint chunks
//! - [`tags`] - Tag rendering
//! - [`static_url`] - URLs of non-chunk assets
//! - [`source`] - Lookup by source filename
//!
//! Each command provides an `execute` function taking the global flags and
//! its own arguments.

pub mod assets;
pub mod check;
pub mod files;
pub mod source;
pub mod static_url;
pub mod tags;
pub(crate) mod utils;

pub use assets::execute as assets_execute;
pub use check::execute as check_execute;
pub use files::{execute_bundle as bundle_execute, execute_entry as entry_execute};
pub use source::execute as source_execute;
pub use static_url::execute as static_execute;
pub use tags::execute as tags_execute;
