// Page fixtures for integration testing

use readorder::core::format::{PipeTableFormatter, UriImageFormatter};
use readorder::core::geometry::BBox;
use readorder::core::layout::{Fragment, Linearizer};
use readorder::core::page::{RawImage, RawPage, RawTable};

/// Left edge shared by all fixture text lines
#[allow(dead_code)]
pub const TEXT_X0: f64 = 50.0;

/// Builds a US Letter page whose text lines sit in the left column
#[allow(dead_code)]
pub struct PageBuilder {
    page: RawPage,
}

#[allow(dead_code)]
impl PageBuilder {
    pub fn new(page_number: usize) -> Self {
        Self {
            page: RawPage {
                page_number,
                width: 612.0,
                height: 792.0,
                ..Default::default()
            },
        }
    }

    /// Text line occupying `top..top + 10`, separated from the
    /// previous line by a line-break sentinel
    pub fn line(mut self, text: &str, top: f64) -> Self {
        if !self.page.text_map.is_empty() {
            self.page.text_map.push(Fragment::sentinel());
        }
        self.page.text_map.push(Fragment::glyph(
            text,
            BBox::new(TEXT_X0, top, TEXT_X0 + 70.0, top + 10.0),
        ));
        self
    }

    pub fn table(mut self, bbox: BBox, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| Some(c.to_string())).collect())
            .collect();
        self.page.tables.push(RawTable { bbox, rows });
        self
    }

    /// Image in the right column, top-origin `top..bottom`
    pub fn image(mut self, name: &str, top: f64, bottom: f64) -> Self {
        self.page.images.push(RawImage {
            name: name.to_string(),
            x0: 300.0,
            x1: 400.0,
            top: Some(top),
            bottom: Some(bottom),
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> RawPage {
        self.page
    }
}

/// Linearizer with bare `a|b` tables
#[allow(dead_code)]
pub fn pipe_linearizer() -> Linearizer {
    Linearizer::new(Box::new(PipeTableFormatter), Box::new(UriImageFormatter))
}
