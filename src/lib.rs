//! readorder - reading-order linearization for parsed document pages
//!
//! Takes pages as delivered by a PDF parsing library (characters,
//! tables and images with bounding boxes), rebuilds one reading-order
//! text stream per page, splits it into linked text nodes and records
//! documents and nodes in a content-addressed SQLite index.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - geometry, format, page, layout (linearization)
//!   - table, node, chunker (node chunking)
//!   - index (document store)
//!   - output, convert, pipeline, walker, services
//!   - config, error, types, xdg
//!
//! - **cli**: Command-line adapter (depends on core)

pub mod cli;
pub mod core;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{ReadorderError, Result};
pub use core::layout::{Fragment, LinearPage, Linearizer, PageElement};
pub use core::node::{NodeArena, NodeId, NodeRelationship, TextNode};
pub use core::services::Services;
pub use core::types::*;
