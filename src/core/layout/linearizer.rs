//! Page linearizer: raw page in, reading-order fragments out.

use crate::core::config::LayoutConfig;
use crate::core::error::{ReadorderError, Result};
use crate::core::format::{ImageFormatter, TableFormatter, UriImageFormatter};
use crate::core::layout::{
    filter_fragments, merge_elements, render, ElementKind, Fragment, PageElement,
};
use crate::core::page::{CharDirection, LineDirection, RawPage};

/// A linearized page
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPage {
    pub page_number: usize,
    pub fragments: Vec<Fragment>,
}

impl LinearPage {
    pub fn text(&self) -> String {
        render(&self.fragments)
    }
}

/// Filters and merges one page at a time
pub struct Linearizer {
    table_formatter: Box<dyn TableFormatter>,
    image_formatter: Box<dyn ImageFormatter>,
}

impl Linearizer {
    pub fn new(
        table_formatter: Box<dyn TableFormatter>,
        image_formatter: Box<dyn ImageFormatter>,
    ) -> Self {
        Self {
            table_formatter,
            image_formatter,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.table_format.formatter(), Box::new(UriImageFormatter))
    }

    pub fn table_formatter(&self) -> &dyn TableFormatter {
        self.table_formatter.as_ref()
    }

    pub fn image_formatter(&self) -> &dyn ImageFormatter {
        self.image_formatter.as_ref()
    }

    /// Tables and images of `page` with rendered content, in vertical
    /// order. Tables precede images that start at the same height.
    pub fn page_elements(&self, page: &RawPage) -> Result<Vec<PageElement>> {
        let mut elements = Vec::with_capacity(page.tables.len() + page.images.len());

        for table in &page.tables {
            table.bbox.validate("table")?;
            let content = table.table().render(self.table_formatter.as_ref());
            elements.push(PageElement::new(ElementKind::Table, table.bbox, content));
        }
        for image in &page.images {
            if image.name.trim().is_empty() {
                return Err(ReadorderError::InvalidInput(format!(
                    "image on page {} has no name",
                    page.page_number
                )));
            }
            let bbox = image.bbox(page.height)?;
            bbox.validate(&format!("image '{}'", image.name))?;
            let content = self.image_formatter.format(&image.name);
            elements.push(PageElement::new(ElementKind::Image, bbox, content));
        }

        elements.sort_by(|a, b| a.bbox.top.total_cmp(&b.bbox.top));
        Ok(elements)
    }

    pub fn linearize(&self, page: &RawPage) -> Result<LinearPage> {
        let elements = self.page_elements(page)?;
        let regions: Vec<_> = elements.iter().map(|e| e.bbox).collect();
        let filtered = filter_fragments(&page.text_map, &regions);

        tracing::debug!(
            "Page {}: {} of {} fragments kept, {} element(s) to merge",
            page.page_number,
            filtered.len(),
            page.text_map.len(),
            elements.len()
        );

        let fragments = if page.char_dir == CharDirection::Ltr && page.line_dir == LineDirection::Ttb
        {
            merge_elements(filtered, elements)?
        } else {
            tracing::warn!(
                "Page {}: merge is defined for ltr/ttb text only ({:?}/{:?}); appending elements",
                page.page_number,
                page.char_dir,
                page.line_dir
            );
            let mut fragments = filtered;
            fragments.extend(
                elements
                    .into_iter()
                    .map(|e| Fragment::text(format!("\n{}", e.content))),
            );
            fragments
        };

        Ok(LinearPage {
            page_number: page.page_number,
            fragments,
        })
    }
}

impl Default for Linearizer {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}
