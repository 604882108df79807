//! Node implementation for the knowledge graph

use super::property::{PropertyMap, PropertyValue};
use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// A node (topic) in the graph
///
/// Nodes carry a unique identifier and a flat attribute map. They have no
/// behavior of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Attributes associated with this node
    #[serde(flatten)]
    pub attributes: PropertyMap,
}

impl Node {
    /// Create a node without attributes
    pub fn new(id: impl Into<NodeId>) -> Self {
        Node {
            id: id.into(),
            attributes: PropertyMap::new(),
        }
    }

    /// Create a node with attributes
    pub fn with_attributes(id: impl Into<NodeId>, attributes: PropertyMap) -> Self {
        Node {
            id: id.into(),
            attributes,
        }
    }

    /// Get an attribute value
    pub fn get_attribute(&self, key: &str) -> Option<&PropertyValue> {
        self.attributes.get(key)
    }

    /// Check if attribute exists
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_node() {
        let node = Node::new("Mortal Kombat");
        assert_eq!(node.id.as_str(), "Mortal Kombat");
        assert!(node.attributes.is_empty());
    }

    #[test]
    fn test_node_with_attributes() {
        let mut attrs = PropertyMap::new();
        attrs.insert("year".to_string(), 1992i64.into());
        let node = Node::with_attributes("Mortal Kombat", attrs);

        assert!(node.has_attribute("year"));
        assert_eq!(node.get_attribute("year"), Some(&PropertyValue::Integer(1992)));
        assert!(node.get_attribute("publisher").is_none());
    }
}
