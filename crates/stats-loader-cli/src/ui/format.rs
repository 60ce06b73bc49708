//! Formatting of command output.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use stats_loader::Status;

use crate::error::Result;

/// Write a value to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Write each line to stdout.
pub fn print_lines<I, S>(lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line.as_ref())?;
    }
    Ok(())
}

/// Short, colored description of a manifest status.
///
/// # Examples
///
/// ```
/// use stats_loader::Status;
/// use stats_loader_cli::ui::status_label;
///
/// assert!(status_label(&Status::Done).contains("done"));
/// ```
pub fn status_label(status: &Status) -> String {
    let label = match status {
        Status::Done => "done",
        Status::Pending => "compiling",
        Status::Error => "error",
        Status::Unrecognized => "missing status",
        Status::Other(other) => other.as_str(),
    };

    if !super::colors_enabled() {
        return label.to_string();
    }

    match status {
        Status::Done => label.green().to_string(),
        Status::Pending => label.yellow().to_string(),
        _ => label.red().to_string(),
    }
}
