//! Layout linearization.
//!
//! Reconciles the page's text stream with independently detected
//! tables and images into one reading-order fragment sequence:
//!
//! 1. **filter**: drop text whose centroid falls inside a non-text
//!    region (the region's own rendering replaces it)
//! 2. **merge**: put each region back at the position implied by its
//!    bounding box (head, inter-line gap, or tail)
//!
//! All geometry is top-origin; see [`crate::core::geometry`].

pub mod filter;
pub mod linearizer;
pub mod merge;

pub use filter::filter_fragments;
pub use linearizer::{LinearPage, Linearizer};
pub use merge::merge_elements;

use serde::{Deserialize, Serialize};

use crate::core::geometry::BBox;

/// Kind of a non-text region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Table,
    Image,
}

/// A detected non-text region with its rendered text
#[derive(Debug, Clone, PartialEq)]
pub struct PageElement {
    pub kind: ElementKind,
    pub bbox: BBox,
    pub content: String,
}

impl PageElement {
    pub fn new(kind: ElementKind, bbox: BBox, content: impl Into<String>) -> Self {
        Self {
            kind,
            bbox,
            content: content.into(),
        }
    }
}

/// One entry of the page's text stream.
///
/// A fragment with neither text nor geometry is the whitespace
/// sentinel: a structural line break. Merged regions appear as
/// fragments carrying text and, when placed at the head, geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
}

impl Fragment {
    pub fn glyph(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: Some(text.into()),
            bbox: Some(bbox),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            bbox: None,
        }
    }

    pub const fn sentinel() -> Self {
        Self {
            text: None,
            bbox: None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.text.is_none() && self.bbox.is_none()
    }

    pub fn as_str(&self) -> &str {
        match (&self.text, &self.bbox) {
            (Some(text), _) => text,
            (None, None) => "\n",
            (None, Some(_)) => "",
        }
    }
}

/// Concatenate fragments into text, sentinels becoming newlines
pub fn render(fragments: &[Fragment]) -> String {
    fragments.iter().map(Fragment::as_str).collect()
}
