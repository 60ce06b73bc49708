//! stats-loader CLI - inspect bundler stats manifests from the terminal.
//!
//! Exposes the engine in `stats-loader` as a handful of commands, useful
//! for debugging a deployment's settings and the manifest the bundler wrote.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - One module per command
//! - [`error`] - `CliError` and miette conversion
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - Status messages on stderr
//!
//! Data commands print JSON on stdout; `tags` prints one tag per line.
//! Everything else goes to stderr, so output can be piped.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
