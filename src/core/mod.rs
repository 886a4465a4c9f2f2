//! Core domain logic (interface-agnostic)
//!
//! # Architecture
//!
//! - **geometry**: Bounding boxes and coordinate normalization
//! - **format**: Table and image formatters
//! - **page**: Parsed page input (JSON page dumps)
//! - **layout**: Centroid filter and reading-order merge
//! - **table**: Tables, headers and continuations
//! - **node**: Text nodes and the id-keyed node arena
//! - **chunker**: Line-window and table-row chunking
//! - **index**: Content-addressed SQLite document index
//! - **output**: Markdown and image artifacts
//! - **convert**: Office document to PDF conversion
//! - **pipeline**: Per-document orchestration
//! - **walker**: Page dump discovery
//! - **config**, **xdg**, **error**, **types**: Shared infrastructure
//! - **services**: Unified service container

pub mod chunker;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod geometry;
pub mod index;
pub mod layout;
pub mod node;
pub mod output;
pub mod page;
pub mod pipeline;
pub mod services;
pub mod table;
pub mod types;
pub mod walker;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{ReadorderError, Result};
pub use services::Services;
