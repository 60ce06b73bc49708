//! Bundle and entry command implementations.

use stats_loader::filter_by_extension;

use crate::cli::{FilesArgs, GlobalArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Print a bundle's resolved chunks.
pub fn execute_bundle(global: &GlobalArgs, args: FilesArgs) -> Result<()> {
    let engine = utils::engine(global)?;
    let chunks = engine.get_bundle(&global.profile, &args.name)?;
    ui::print_json(&filter_by_extension(chunks, args.extension.as_deref()))
}

/// Print an entrypoint's resolved chunks.
pub fn execute_entry(global: &GlobalArgs, args: FilesArgs) -> Result<()> {
    let engine = utils::engine(global)?;
    let chunks = engine.get_entry(&global.profile, &args.name)?;
    ui::print_json(&filter_by_extension(chunks, args.extension.as_deref()))
}
