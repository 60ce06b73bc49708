//! Tags command implementation.

use stats_loader::{RequestContext, TagOptions};

use crate::cli::{GlobalArgs, TagsArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Render tags for a bundle or entrypoint, one per line.
///
/// `--host` or `--nonce` simulate a request, which enables crossorigin and
/// nonce decisions.
pub fn execute(global: &GlobalArgs, args: TagsArgs) -> Result<()> {
    let engine = utils::engine(global)?;

    let mut options = TagOptions::new()
        .attrs(args.attrs)
        .suffix(args.suffix)
        .preload(args.preload);
    if let Some(extension) = args.extension {
        options = options.extension(extension);
    }
    if let Some(locale) = args.locale {
        options = options.locale(locale);
    }

    let mut request = simulated_request(args.host, args.nonce);

    let tags = if args.entry {
        engine.get_entrypoint_tags(&global.profile, &args.name, &options, request.as_mut())?
    } else {
        engine.get_as_tags(&global.profile, &args.name, &options, request.as_mut())?
    };

    if tags.is_empty() {
        ui::warning(&format!("{} resolved to no script or style chunks", args.name));
    }
    ui::print_lines(tags)
}

fn simulated_request(host: Option<String>, nonce: Option<String>) -> Option<RequestContext> {
    if host.is_none() && nonce.is_none() {
        return None;
    }

    Some(RequestContext {
        host,
        csp_nonce: nonce,
        ..RequestContext::default()
    })
}
