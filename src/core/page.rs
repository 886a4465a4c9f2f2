//! Input contract from the page-parsing collaborator.
//!
//! A parsed document arrives as a JSON page dump: per page, the
//! character-level text map (fragments and line-break sentinels in
//! reading order), detected table regions with their rows, and image
//! regions with their names and optional embedded PNG bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, ReadorderError};
use crate::core::geometry::BBox;
use crate::core::layout::Fragment;
use crate::core::table::{Row, Table};

/// Character direction of the text map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Line direction of the text map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDirection {
    #[default]
    Ttb,
    Btt,
}

/// A parsed document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    /// Original file the dump was produced from (hashed when indexing)
    #[serde(default)]
    pub source: Option<PathBuf>,

    #[serde(default)]
    pub pages: Vec<RawPage>,
}

impl RawDocument {
    /// File whose bytes identify this document: the declared source,
    /// or the dump itself when none is declared.
    pub fn source_path(&self, dump_path: &Path) -> PathBuf {
        match &self.source {
            Some(source) if source.is_absolute() => source.clone(),
            Some(source) => dump_path
                .parent()
                .map(|dir| dir.join(source))
                .unwrap_or_else(|| source.clone()),
            None => dump_path.to_path_buf(),
        }
    }
}

/// One parsed page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPage {
    /// 1-based page number
    pub page_number: usize,
    pub width: f64,
    pub height: f64,

    #[serde(default)]
    pub char_dir: CharDirection,

    #[serde(default)]
    pub line_dir: LineDirection,

    /// Fragments in natural reading order; `{}` entries are line breaks
    #[serde(default)]
    pub text_map: Vec<Fragment>,

    #[serde(default)]
    pub tables: Vec<RawTable>,

    #[serde(default)]
    pub images: Vec<RawImage>,
}

/// Detected table region, bbox already top-origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    pub bbox: BBox,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl RawTable {
    pub fn table(&self) -> Table {
        Table::new(self.rows.clone())
    }
}

/// Detected image region.
///
/// Parsers report image boxes either top-origin (`top`/`bottom`) or
/// in PDF user space (`y0`/`y1`, origin bottom-left).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawImage {
    pub name: String,
    pub x0: f64,
    pub x1: f64,
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default, alias = "bot")]
    pub bottom: Option<f64>,
    #[serde(default)]
    pub y0: Option<f64>,
    #[serde(default)]
    pub y1: Option<f64>,

    /// Base64-encoded PNG rendering of the region
    #[serde(default)]
    pub png: Option<String>,
}

impl RawImage {
    /// Top-origin bounding box on a page of `page_height`
    pub fn bbox(&self, page_height: f64) -> Result<BBox> {
        match (self.top, self.bottom, self.y0, self.y1) {
            (Some(top), Some(bottom), _, _) => Ok(BBox::new(self.x0, top, self.x1, bottom)),
            (_, _, Some(y0), Some(y1)) => Ok(BBox::from_bottom_origin(
                self.x0,
                y0,
                self.x1,
                y1,
                page_height,
            )),
            _ => Err(ReadorderError::Geometry(format!(
                "image '{}' has no vertical extent (needs top/bottom or y0/y1)",
                self.name
            ))),
        }
    }

    pub fn png_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.png
            .as_deref()
            .map(|encoded| {
                STANDARD.decode(encoded).map_err(|e| {
                    ReadorderError::InvalidInput(format!(
                        "image '{}' has an invalid PNG payload: {e}",
                        self.name
                    ))
                })
            })
            .transpose()
    }
}

/// Produces parsed documents from files on disk
pub trait PageSource: Send + Sync {
    fn load(&self, path: &Path) -> Result<RawDocument>;
}

/// Reads JSON page dumps
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPageSource;

impl PageSource for JsonPageSource {
    fn load(&self, path: &Path) -> Result<RawDocument> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ReadorderError::InvalidPath(format!("Failed to read page dump {path:?}: {e}"))
        })?;
        let document: RawDocument = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded {} page(s) from {:?}", document.pages.len(), path);
        Ok(document)
    }
}
