//! Element formatters.
//!
//! Pure functions that turn a non-text region into renderable text.
//! Each capability is a one-method trait so implementations can be
//! chosen at construction time (see [`TableFormat`]).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::table::Row;

/// Renders a table's row matrix as text
pub trait TableFormatter: Send + Sync {
    fn format(&self, rows: &[Row]) -> String;
}

/// Renders an image reference as text
pub trait ImageFormatter: Send + Sync {
    fn format(&self, image_name: &str) -> String;

    /// Recover the relative file path from text produced by
    /// [`format`](Self::format). Returns `None` for text this
    /// formatter did not generate.
    fn reference_path(&self, rendered: &str) -> Option<PathBuf>;
}

/// Table formatter selection (configuration value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// GitHub-flavored Markdown pipe table
    #[default]
    Github,
    /// Bare `a|b` lines without padding or separator row
    Pipe,
}

impl TableFormat {
    pub fn formatter(self) -> Box<dyn TableFormatter> {
        match self {
            TableFormat::Github => Box::new(GithubTableFormatter),
            TableFormat::Pipe => Box::new(PipeTableFormatter),
        }
    }
}

impl std::str::FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" => Ok(TableFormat::Github),
            "pipe" => Ok(TableFormat::Pipe),
            other => Err(format!("unknown table format '{other}'")),
        }
    }
}

/// Cells are kept on one line: embedded newlines become a literal
/// `\n` and empty cells become a single space.
fn flatten_cells(row: &Row) -> Vec<String> {
    row.iter()
        .map(|cell| match cell {
            Some(text) => text.replace('\n', "\\n"),
            None => " ".to_string(),
        })
        .collect()
}

/// GitHub Markdown table; the first row is rendered as the header
///
/// ```
/// use readorder::core::format::{GithubTableFormatter, TableFormatter};
///
/// let rows = vec![
///     vec![Some("A".to_string()), Some("B".to_string())],
///     vec![Some("1".to_string()), None],
/// ];
/// assert_eq!(GithubTableFormatter.format(&rows), "|A | B|\n|-- | --|\n|1 |  |");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GithubTableFormatter;

impl TableFormatter for GithubTableFormatter {
    fn format(&self, rows: &[Row]) -> String {
        let mut lines = Vec::with_capacity(rows.len() + 1);
        for (index, row) in rows.iter().enumerate() {
            let cells = flatten_cells(row);
            lines.push(format!("|{}|", cells.join(" | ")));
            if index == 0 {
                lines.push(format!("|{}|", vec!["--"; cells.len()].join(" | ")));
            }
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PipeTableFormatter;

impl TableFormatter for PipeTableFormatter {
    fn format(&self, rows: &[Row]) -> String {
        rows.iter()
            .map(|row| flatten_cells(row).join("|"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

static IMAGE_REFERENCE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\(([^)]+)\)").ok());

/// Markdown image link pointing into the `images/` folder
///
/// ```
/// use readorder::core::format::{ImageFormatter, UriImageFormatter};
///
/// let text = UriImageFormatter.format("Im3");
/// assert_eq!(text, "![Im3](images/Im3.png)");
/// assert_eq!(
///     UriImageFormatter.reference_path(&text).unwrap(),
///     std::path::PathBuf::from("images/Im3.png"),
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UriImageFormatter;

impl ImageFormatter for UriImageFormatter {
    fn format(&self, image_name: &str) -> String {
        let file = Path::new(image_name).with_extension("png");
        format!("![{image_name}](images/{})", file.display())
    }

    fn reference_path(&self, rendered: &str) -> Option<PathBuf> {
        IMAGE_REFERENCE
            .as_ref()?
            .captures(rendered)
            .and_then(|caps| caps.get(1))
            .map(|m| PathBuf::from(m.as_str()))
    }
}
