//! Node-link JSON reader
//!
//! Layout: `{"directed": true, "graph": {...}, "nodes": [{"id": ...}],
//! "links": [{"source": ..., "target": ...}]}`. `"edges"` is accepted as an
//! alias for `"links"`.

use super::{FormatError, Parsed};
use crate::graph::{Graph, PropertyMap, PropertyValue};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct NodeLinkDocument {
    #[serde(default = "default_directed")]
    directed: bool,
    #[serde(default)]
    graph: Map<String, Value>,
    nodes: Vec<NodeRecord>,
    #[serde(default, alias = "edges")]
    links: Vec<LinkRecord>,
}

fn default_directed() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct NodeRecord {
    id: Value,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct LinkRecord {
    source: Value,
    target: Value,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

/// Parse a node-link JSON document
pub fn parse(text: &str) -> Result<Parsed, FormatError> {
    let doc: NodeLinkDocument =
        serde_json::from_str(text).map_err(|err| FormatError::new(format!("invalid node-link JSON: {}", err)))?;

    let mut builder = Graph::builder();

    for (key, value) in doc.graph {
        if let Some(value) = scalar(&key, value)? {
            builder.set_graph_attribute(key, value);
        }
    }

    for node in doc.nodes {
        let id = identifier(node.id, "node id")?;
        builder.add_node(id, attribute_map(node.attributes)?)?;
    }

    // Multigraph exports carry a "key" per link; it only disambiguates parallel edges
    for link in doc.links {
        let source = identifier(link.source, "link source")?;
        let target = identifier(link.target, "link target")?;
        let mut attributes = link.attributes;
        attributes.remove("key");
        let attributes = attribute_map(attributes)?;

        if !doc.directed && source != target {
            builder.add_edge(target.as_str(), source.as_str(), attributes.clone())?;
        }
        builder.add_edge(source, target, attributes)?;
    }

    Ok(Parsed {
        duplicate_edges: builder.duplicate_edges(),
        graph: builder.build(),
    })
}

fn identifier(value: Value, what: &str) -> Result<String, FormatError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(FormatError::new(format!(
            "{} must be a string or number, got {}",
            what, other
        ))),
    }
}

fn scalar(key: &str, value: Value) -> Result<Option<PropertyValue>, FormatError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(PropertyValue::Boolean(b))),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Some(PropertyValue::Integer(i))),
            None => n
                .as_f64()
                .map(|f| Some(PropertyValue::Float(f)))
                .ok_or_else(|| FormatError::new(format!("attribute '{}' is out of range", key))),
        },
        Value::String(s) => Ok(Some(PropertyValue::String(s))),
        Value::Array(_) | Value::Object(_) => Err(FormatError::new(format!(
            "attribute '{}' must be a scalar",
            key
        ))),
    }
}

fn attribute_map(raw: Map<String, Value>) -> Result<PropertyMap, FormatError> {
    let mut attributes = PropertyMap::new();
    for (key, value) in raw {
        if let Some(value) = scalar(&key, value)? {
            attributes.insert(key, value);
        }
    }
    Ok(attributes)
}
