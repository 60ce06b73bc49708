//! Command-line interface definition.
//!
//! - `stats-loader check` - Validate settings and report manifest status
//! - `stats-loader assets` - Print the whole manifest
//! - `stats-loader bundle <NAME>` - Resolved chunks of a bundle
//! - `stats-loader entry <NAME>` - Resolved chunks of an entrypoint
//! - `stats-loader tags <NAME>` - Render `<script>`/`<link>` tags
//! - `stats-loader static <ASSET>` - URL of a non-chunk asset
//! - `stats-loader source <FILE>` - Asset built from a source file

mod commands;

use clap::Parser;
use stats_loader_config::DEFAULT_PROFILE;
use std::path::PathBuf;

pub use commands::{CheckArgs, Command, FilesArgs, SourceArgs, StaticArgs, TagsArgs};

/// stats-loader - resolve bundler stats manifests into URLs and tags
#[derive(Parser, Debug)]
#[command(
    name = "stats-loader",
    version,
    about = "Resolve bundler stats manifests into asset URLs and tags",
    long_about = "Reads the stats file written by a bundler's tracker plugin \
                  (webpack-stats.json) and resolves bundles and entrypoints into\n\
                  URLs and <script>/<link> tags, using the same settings as the \
                  server-side integration."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Settings file (stats-loader.toml, package.json or a JSON document)
    ///
    /// Without this flag stats-loader.toml, then package.json, is looked up
    /// in the current directory. Without either, the built-in DEFAULT
    /// profile is used.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Profile to resolve against
    #[arg(short, long, global = true, default_value = DEFAULT_PROFILE, value_name = "NAME")]
    pub profile: String,

    /// Debug mode: never memoize, and wait for in-progress builds
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub profile: String,
    pub debug: bool,
}

impl Cli {
    pub fn global(&self) -> GlobalArgs {
        GlobalArgs {
            config: self.config.clone(),
            profile: self.profile.clone(),
            debug: self.debug,
        }
    }
}
