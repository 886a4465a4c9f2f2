//! Bounding-box geometry.
//!
//! All comparisons in the crate happen in a single top-origin
//! coordinate system: `top` grows downward from the top edge of
//! the page and `bottom >= top` for a well-formed box. Boxes that
//! arrive in PDF user space (origin at the bottom-left, `y0` below
//! `y1`) are converted with [`BBox::from_bottom_origin`].

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ReadorderError};

/// Axis-aligned rectangle `(x0, top, x1, bottom)` in top-origin
/// page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub const fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Convert a bottom-origin box (`y0` is the lower edge, `y1`
    /// the upper edge) on a page of `page_height`.
    ///
    /// ```
    /// use readorder::core::geometry::BBox;
    ///
    /// let bbox = BBox::from_bottom_origin(10.0, 700.0, 110.0, 742.0, 792.0);
    /// assert_eq!(bbox.top, 50.0);
    /// assert_eq!(bbox.bottom, 92.0);
    /// ```
    pub fn from_bottom_origin(x0: f64, y0: f64, x1: f64, y1: f64, page_height: f64) -> Self {
        Self {
            x0,
            top: page_height - y1,
            x1,
            bottom: page_height - y0,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Midpoint of the horizontal and vertical extents
    pub fn centroid(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// Half-open point test: left/top edges are inside, right/bottom
    /// edges are outside.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.top && y < self.bottom
    }

    /// Whether the centroid of `other` lies within this box
    pub fn contains_centroid_of(&self, other: &BBox) -> bool {
        let (x, y) = other.centroid();
        self.contains_point(x, y)
    }

    /// Whether `other` lies entirely within this box (edges inclusive)
    pub fn contains(&self, other: &BBox) -> bool {
        other.x0 >= self.x0
            && other.x1 <= self.x1
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    /// Whether the two boxes share interior area
    pub fn overlaps(&self, other: &BBox) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.top < other.bottom && other.top < self.bottom
    }

    /// Clip the right and bottom edges to the page bounds
    pub fn clamp_to_page(&self, page_width: f64, page_height: f64) -> BBox {
        BBox {
            x0: self.x0,
            top: self.top,
            x1: self.x1.min(page_width),
            bottom: self.bottom.min(page_height),
        }
    }

    /// Reject boxes that cannot be ordered: non-finite coordinates or
    /// inverted extents.
    pub fn validate(&self, what: &str) -> Result<()> {
        let coords = [self.x0, self.top, self.x1, self.bottom];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(ReadorderError::Geometry(format!(
                "{what} has non-finite coordinates: {self:?}"
            )));
        }
        if self.top > self.bottom || self.x0 > self.x1 {
            return Err(ReadorderError::Geometry(format!(
                "{what} has inverted extents: {self:?}"
            )));
        }
        Ok(())
    }
}
