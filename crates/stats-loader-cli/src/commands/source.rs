//! Source command implementation.

use crate::cli::{GlobalArgs, SourceArgs};
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Print the asset descriptor built from a source file.
///
/// # Errors
///
/// `CliError::SourceNotFound` when no asset records that source file.
pub fn execute(global: &GlobalArgs, args: SourceArgs) -> Result<()> {
    let engine = utils::engine(global)?;
    let asset = engine
        .get_asset_by_source_filename(&global.profile, &args.filename)?
        .ok_or(CliError::SourceNotFound(args.filename))?;
    ui::print_json(&asset)
}
