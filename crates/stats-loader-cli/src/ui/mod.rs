//! Terminal output helpers.
//!
//! Status messages go to stderr so that stdout carries only command output.

mod format;
mod messages;

pub use format::{print_json, print_lines, status_label};
pub use messages::{error, info, success, warning};

/// Check if color output should be enabled.
///
/// Respects `NO_COLOR` and `FORCE_COLOR`, then falls back to terminal
/// detection on stderr.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Enable or disable colored status messages for the rest of the process.
pub fn init_colors(no_color: bool) {
    console::set_colors_enabled_stderr(!no_color && should_use_color());
}

pub(crate) fn colors_enabled() -> bool {
    console::colors_enabled_stderr()
}
