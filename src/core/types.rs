//! Core data types for readorder.
//!
//! Records read from and written to the document index, plus the
//! reports returned by batch operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::error::Result;
use crate::core::node::{NodeId, NodeRelationship, TextNode};

/// A recorded source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Path as given at indexing time (unique)
    pub path: String,

    /// File name component of the path
    pub name: String,

    /// Lowercase hex SHA-256 of the file bytes
    pub hash: String,
}

/// A persisted node as read back from the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node_id: String,

    /// Opaque embedding payload, if one was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<u8>>,

    pub metadata: Option<String>,
}

/// A node to append under a document
#[derive(Debug, Clone, PartialEq)]
pub struct NewNodeRecord {
    pub node_id: String,
    pub embedding: Option<Vec<u8>>,
    pub metadata: Option<String>,
}

#[derive(Serialize)]
struct NodeMetadata<'a> {
    text: &'a str,
    relationships: &'a BTreeMap<NodeRelationship, NodeId>,
}

impl NewNodeRecord {
    /// Record for `node` with its text and links as JSON metadata
    pub fn from_text_node(node: &TextNode, embedding: Option<Vec<u8>>) -> Result<Self> {
        let metadata = serde_json::to_string(&NodeMetadata {
            text: &node.text,
            relationships: &node.relationships,
        })?;

        Ok(Self {
            node_id: node.node_id.to_string(),
            embedding,
            metadata: Some(metadata),
        })
    }
}

/// A page that could not be linearized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFailure {
    pub page_number: usize,
    pub error: String,
}

/// Result of converting one page dump to Markdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertReport {
    pub source: PathBuf,
    pub markdown: PathBuf,
    pub images: Vec<PathBuf>,
    pub pages: usize,
    pub failed_pages: Vec<PageFailure>,
    /// Images skipped because they could not be rendered or written
    pub failed_images: Vec<PageFailure>,
}

/// Result of indexing one page dump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexReport {
    pub path: String,
    pub doc_id: i64,
    pub nodes: usize,
    pub failed_pages: Vec<PageFailure>,
}

/// Totals of a batch indexing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of dumps successfully indexed
    pub files_indexed: usize,

    /// Dumps that failed as a whole
    pub files_failed: usize,

    /// Total nodes appended
    pub nodes_created: usize,

    /// Pages that failed inside otherwise indexed dumps
    pub pages_failed: usize,

    /// Duration in milliseconds
    pub duration_ms: u64,
}
