//! Chunk nodes and their Previous/Next relationships.
//!
//! Nodes never own each other. A relationship stores the neighbour's
//! [`NodeId`] and is resolved through a [`NodeArena`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use uuid::Uuid;

/// Opaque, globally unique node identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRelationship {
    Previous,
    Next,
}

/// A chunk of text ready for embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub node_id: NodeId,
    pub text: String,
    #[serde(default)]
    pub relationships: BTreeMap<NodeRelationship, NodeId>,
}

impl TextNode {
    /// New unlinked node with a fresh id
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            node_id: NodeId::generate(),
            text: text.into(),
            relationships: BTreeMap::new(),
        }
    }

    pub fn previous(&self) -> Option<&NodeId> {
        self.relationships.get(&NodeRelationship::Previous)
    }

    pub fn next(&self) -> Option<&NodeId> {
        self.relationships.get(&NodeRelationship::Next)
    }
}

/// Ordered node storage with id lookup
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<TextNode>,
    positions: HashMap<NodeId, usize>,
}

impl NodeArena {
    /// Take ownership of `nodes` and link them in order.
    ///
    /// Any relationships already present are replaced: node `i` gets
    /// `Previous = i-1` and `Next = i+1` where those exist.
    pub fn linked(mut nodes: Vec<TextNode>) -> Self {
        let ids: Vec<NodeId> = nodes.iter().map(|n| n.node_id.clone()).collect();
        for (i, node) in nodes.iter_mut().enumerate() {
            node.relationships.clear();
            if i > 0 {
                node.relationships
                    .insert(NodeRelationship::Previous, ids[i - 1].clone());
            }
            if let Some(next) = ids.get(i + 1) {
                node.relationships
                    .insert(NodeRelationship::Next, next.clone());
            }
        }

        let positions = ids.into_iter().enumerate().map(|(i, id)| (id, i)).collect();
        Self { nodes, positions }
    }

    /// Concatenate several arenas into one chain
    pub fn concat(parts: impl IntoIterator<Item = NodeArena>) -> Self {
        let nodes = parts.into_iter().flat_map(|a| a.nodes).collect();
        Self::linked(nodes)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<&TextNode> {
        self.nodes.first()
    }

    pub fn get(&self, id: &NodeId) -> Option<&TextNode> {
        self.positions.get(id).map(|&i| &self.nodes[i])
    }

    pub fn next_of(&self, id: &NodeId) -> Option<&TextNode> {
        self.get(id)?.next().and_then(|next| self.get(next))
    }

    pub fn previous_of(&self, id: &NodeId) -> Option<&TextNode> {
        self.get(id)?.previous().and_then(|prev| self.get(prev))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextNode> {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[TextNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<TextNode> {
        self.nodes
    }
}

impl<'a> IntoIterator for &'a NodeArena {
    type Item = &'a TextNode;
    type IntoIter = std::slice::Iter<'a, TextNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
