//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a
//! specific CLI command.

pub mod completions;
pub mod config;
pub mod convert;
pub mod documents;
pub mod index;
pub mod nodes;
pub mod to_pdf;

// Re-export argument types for use in mod.rs
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use convert::ConvertArgs;
pub use documents::DocumentsArgs;
pub use index::IndexArgs;
pub use nodes::NodesArgs;
pub use to_pdf::ToPdfArgs;
