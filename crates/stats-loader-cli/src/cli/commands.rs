use clap::{Args, Subcommand};

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate settings and report the status of every profile's manifest
    ///
    /// Checks option values (regexes, intervals, crossorigin), that each
    /// stats file exists, and that its loader class is known.
    Check(CheckArgs),

    /// Print the profile's whole manifest as JSON
    Assets,

    /// Print the resolved chunks of a bundle as JSON
    Bundle(FilesArgs),

    /// Print the resolved chunks of an entrypoint as JSON
    Entry(FilesArgs),

    /// Render the tags a template would emit for a bundle or entrypoint
    ///
    /// Examples:
    ///   stats-loader tags main
    ///   stats-loader tags app --entry --ext js --attrs defer
    Tags(TagsArgs),

    /// Print the URL of an asset that is not part of a bundle
    Static(StaticArgs),

    /// Print the asset built from a source file as JSON
    Source(SourceArgs),
}

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Only validate option values; skip stats file checks
    #[arg(long)]
    pub schema_only: bool,

    /// Print the resolved settings as TOML
    #[arg(long)]
    pub show: bool,
}

/// Arguments for the bundle and entry commands
#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Bundle or entrypoint name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Only chunks of this extension family (js also matches .js.gz)
    #[arg(long = "ext", value_name = "EXT")]
    pub extension: Option<String>,
}

/// Arguments for the tags command
#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Bundle (or, with --entry, entrypoint) name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Only tags of this extension family
    #[arg(long = "ext", value_name = "EXT")]
    pub extension: Option<String>,

    /// Raw attribute text inserted into every tag
    #[arg(long, default_value = "", value_name = "ATTRS")]
    pub attrs: String,

    /// Appended to every URL
    #[arg(long, default_value = "", value_name = "SUFFIX")]
    pub suffix: String,

    /// Render preload links instead of loading tags
    #[arg(long)]
    pub preload: bool,

    /// Resolve NAME as an entrypoint
    #[arg(long)]
    pub entry: bool,

    /// Host of the simulated request, for crossorigin decisions
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// CSP nonce of the simulated request
    #[arg(long, value_name = "NONCE")]
    pub nonce: Option<String>,

    /// Locale substituted into a `{locale}` stats file path
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,
}

/// Arguments for the static command
#[derive(Args, Debug)]
pub struct StaticArgs {
    /// Asset name, e.g. images/logo.png
    #[arg(value_name = "ASSET")]
    pub asset: String,
}

/// Arguments for the source command
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Source file the asset was built from, as recorded in the manifest
    #[arg(value_name = "FILE")]
    pub filename: String,
}
