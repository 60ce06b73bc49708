//! stats-loader CLI - inspect bundler stats manifests from the terminal.
//!
//! Parses arguments, installs logging, and dispatches to a command.

use clap::Parser;
use miette::Result;
use stats_loader_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let global = args.global();
    let result = match args.command {
        cli::Command::Check(check_args) => commands::check_execute(&global, check_args),
        cli::Command::Assets => commands::assets_execute(&global),
        cli::Command::Bundle(files_args) => commands::bundle_execute(&global, files_args),
        cli::Command::Entry(files_args) => commands::entry_execute(&global, files_args),
        cli::Command::Tags(tags_args) => commands::tags_execute(&global, tags_args),
        cli::Command::Static(static_args) => commands::static_execute(&global, static_args),
        cli::Command::Source(source_args) => commands::source_execute(&global, source_args),
    };

    // Engine errors carry miette diagnostics (code, help)
    result.map_err(error::cli_error_to_miette)
}
