//! Edge implementation for the knowledge graph

use super::property::{PropertyMap, PropertyValue};
use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// A directed edge (relation) between two topics
///
/// Self-loops are allowed. A graph never holds two edges with the same
/// `(source, target)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Attributes associated with this edge
    #[serde(flatten)]
    pub attributes: PropertyMap,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
            attributes: PropertyMap::new(),
        }
    }

    /// Create a new edge with attributes
    pub fn with_attributes(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        attributes: PropertyMap,
    ) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
            attributes,
        }
    }

    /// Get an attribute value
    pub fn get_attribute(&self, key: &str) -> Option<&PropertyValue> {
        self.attributes.get(key)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
