//! Line-window and table-row chunking.
//!
//! Turns a linearized page (or a table) into a linked list of
//! [`TextNode`]s held by a [`NodeArena`]. Node ids are generated per
//! node; links are assigned positionally afterwards.
//!
//! # Example
//!
//! ```
//! use readorder::core::chunker::NodeChunker;
//!
//! let chunker = NodeChunker::new(2);
//! let arena = chunker.chunk_text("one\ntwo\nthree");
//!
//! assert_eq!(arena.len(), 2);
//! assert_eq!(arena.as_slice()[0].text, "one\ntwo");
//! assert_eq!(arena.as_slice()[1].text, "three");
//! ```

use crate::core::error::Result;
use crate::core::format::TableFormatter;
use crate::core::layout::LinearPage;
use crate::core::node::{NodeArena, TextNode};
use crate::core::table::{wrap_table_text, Table};

/// Default number of lines per text node
pub const DEFAULT_LINES_PER_NODE: usize = 2;

#[derive(Debug, Clone)]
pub struct NodeChunker {
    lines_per_node: usize,
}

impl NodeChunker {
    /// # Panics
    ///
    /// Panics if `lines_per_node` is 0.
    pub fn new(lines_per_node: usize) -> Self {
        assert!(lines_per_node > 0, "lines_per_node must be > 0");
        Self { lines_per_node }
    }

    pub fn lines_per_node(&self) -> usize {
        self.lines_per_node
    }

    /// Split `text` on `\n` into windows of `lines_per_node` lines.
    ///
    /// Lines are neither trimmed nor dropped, so joining the node
    /// texts with `\n` reproduces the input. Empty input yields no
    /// nodes.
    pub fn chunk_text(&self, text: &str) -> NodeArena {
        if text.is_empty() {
            return NodeArena::default();
        }

        let lines: Vec<&str> = text.split('\n').collect();
        let nodes = lines
            .chunks(self.lines_per_node)
            .map(|window| TextNode::new(window.join("\n")))
            .collect();

        NodeArena::linked(nodes)
    }

    /// One node per data row: the effective header and the row,
    /// formatted together and wrapped in table delimiters.
    ///
    /// Fails with a validation error when any data row's width
    /// differs from the header's. A table with no data rows yields
    /// no nodes.
    pub fn chunk_table(&self, table: &Table, formatter: &dyn TableFormatter) -> Result<NodeArena> {
        table.validate()?;

        let Some(header) = table.effective_header() else {
            return Ok(NodeArena::default());
        };

        let nodes = table
            .data_rows()
            .iter()
            .map(|row| {
                let body = formatter.format(&[header.clone(), row.clone()]);
                TextNode::new(wrap_table_text(&body))
            })
            .collect();

        Ok(NodeArena::linked(nodes))
    }

    /// Chunk each page and link the result into a single chain in
    /// page order.
    pub fn chunk_pages<'a>(&self, pages: impl IntoIterator<Item = &'a LinearPage>) -> NodeArena {
        let parts: Vec<NodeArena> = pages
            .into_iter()
            .map(|page| {
                let arena = self.chunk_text(&page.text());
                tracing::debug!("Page {}: {} node(s)", page.page_number, arena.len());
                arena
            })
            .collect();
        NodeArena::concat(parts)
    }
}

impl Default for NodeChunker {
    fn default() -> Self {
        Self::new(DEFAULT_LINES_PER_NODE)
    }
}
