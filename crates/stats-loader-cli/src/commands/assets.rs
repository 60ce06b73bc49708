//! Assets command implementation.

use crate::cli::GlobalArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Print the profile's manifest, as read (no status check).
pub fn execute(global: &GlobalArgs) -> Result<()> {
    let engine = utils::engine(global)?;
    let manifest = engine.get_assets(&global.profile)?;
    ui::print_json(manifest.as_ref())
}
