//! Subscriber installation for processes that embed the engine.
//!
//! Only compiled with the `logging` feature. The engine itself just emits
//! `tracing` events: manifest reads at `debug`, and the crossorigin, nonce,
//! dedup and unbounded-wait fallbacks at `warn`. Libraries hosting the
//! engine should install their own subscriber instead.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Targets covered by [`engine_filter`].
const ENGINE_TARGETS: [&str; 2] = ["stats_loader", "stats_loader_config"];

static INSTALL: Once = Once::new();

/// Verbosity of one target in a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off,
    Error,
    /// Fallback warnings only.
    #[default]
    Warn,
    Info,
    /// Manifest reads and loader creation.
    Debug,
    Trace,
}

impl LogLevel {
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Filter admitting engine events at `level`, plus one directive per
/// `(target, level)` pair in `extra`.
pub fn engine_filter(level: LogLevel, extra: &[(&str, LogLevel)]) -> EnvFilter {
    let directives = ENGINE_TARGETS
        .iter()
        .map(|target| (*target, level))
        .chain(extra.iter().copied())
        .map(|(target, level)| format!("{target}={}", level.directive()))
        .collect::<Vec<_>>()
        .join(",");

    EnvFilter::builder().parse_lossy(directives)
}

/// `RUST_LOG` when it is set and parses, else `fallback`.
pub fn env_filter_or(fallback: EnvFilter) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or(fallback)
}

/// Install a compact stderr subscriber with `filter`.
///
/// Only the first call in a process has any effect. Returns whether this
/// call installed the subscriber; `false` also covers a subscriber that
/// someone else set globally first.
pub fn install(filter: EnvFilter, ansi: bool) -> bool {
    let mut installed = false;
    INSTALL.call_once(|| {
        // stdout carries command output
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .with_target(false)
            .without_time()
            .compact();

        installed = tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .is_ok();
    });
    installed
}
