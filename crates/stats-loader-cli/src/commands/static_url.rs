//! Static command implementation.

use crate::cli::{GlobalArgs, StaticArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Print the URL of a non-chunk asset.
pub fn execute(global: &GlobalArgs, args: StaticArgs) -> Result<()> {
    let engine = utils::engine(global)?;
    let url = engine.get_static_url(&global.profile, &args.asset)?;
    ui::print_lines([url])
}
