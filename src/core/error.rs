//! Error types and error handling for the readorder pipeline.
//!
//! This module defines the error types used throughout the
//! crate. Page-level failures are reported by the pipeline as
//! [`PageFailure`](crate::core::types::PageFailure) values rather
//! than aborting the whole document.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for readorder operations
pub type Result<T> = std::result::Result<T, ReadorderError>;

/// Main error type for readorder
#[derive(Error, Debug)]
pub enum ReadorderError {
    /// Missing or ambiguous bounding-box attributes during merge
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Table header/row width mismatch
    #[error("Validation error: {0}")]
    Validation(String),

    /// Source file could not be read while computing its content hash
    #[error("Failed to hash {path:?}: {source}")]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Conversion failed: {0}")]
    Conversion(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Malformed page dump (bad base64 payload, unknown field values)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ReadorderError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Errors that only invalidate the page being linearized
    pub fn is_page_local(&self) -> bool {
        matches!(self, ReadorderError::Geometry(_))
    }

    /// Check if this is a table validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, ReadorderError::Validation(_))
    }

    /// Check if this error came from the document store
    pub fn is_persistence(&self) -> bool {
        matches!(self, ReadorderError::Persistence(_))
    }
}
