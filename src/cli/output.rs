//! Output formatting for CLI commands
//!
//! Human-readable or JSON output. Colored output respects NO_COLOR.

use crate::cli::OutputFormat;
use crate::core::types::PageFailure;

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for content hashes and node ids
    pub fn id(s: &str) -> ColoredString {
        s.cyan()
    }

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }
}

/// Format bytes into human-readable size
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        let ms = secs * 1000.0;
        format!("{ms:.0}ms")
    }
}

/// Shorten a hex digest or id for display
pub fn short_id(id: &str) -> &str {
    id.get(..12).unwrap_or(id)
}

/// Truncate `text` to its first line, at most `max` characters
pub fn preview(text: &str, max: usize) -> String {
    let line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    if line.chars().count() > max {
        let cut: String = line.chars().take(max).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}

/// Print `data` as pretty JSON
pub fn print_json<T: serde::Serialize>(data: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print output based on format, with `human` rendering the
/// human-readable form
pub fn print_output<T, F>(data: &T, format: OutputFormat, human: F) -> Result<(), Box<dyn std::error::Error>>
where
    T: serde::Serialize,
    F: FnOnce(&T),
{
    match format {
        OutputFormat::Human => {
            human(data);
            Ok(())
        }
        OutputFormat::Json => print_json(data),
    }
}

/// Print page failures as warnings on stderr
pub fn print_page_failures(failures: &[PageFailure]) {
    for failure in failures {
        print_warning(&format!("page {}: {}", failure.page_number, failure.error));
    }
}

pub fn print_success(message: &str) {
    println!("{}", colors::success(message));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}

/// Print a header/title
pub fn print_header(title: &str) {
    println!("{}", colors::label(title));
}
