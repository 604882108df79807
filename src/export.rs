//! Node-link JSON export
//!
//! Writes the same layout [`crate::loader::node_link`] reads, so a subgraph
//! handed to an external renderer can also be loaded back. Attribute keys that
//! would shadow the structural fields (`id` on nodes, `source`/`target`/`key`
//! on links) are left out.

use crate::error::{GraphLensError, Result};
use crate::graph::{Graph, NodeId, PropertyMap};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const NODE_RESERVED: &[&str] = &["id"];
const LINK_RESERVED: &[&str] = &["source", "target", "key"];

/// Node-link JSON value of `graph`
pub fn node_link(graph: &Graph) -> Result<Value> {
    Ok(serde_json::to_value(graph)?)
}

/// Write `graph` as pretty-printed node-link JSON
pub fn write_node_link(graph: &Graph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let export_err = |source| GraphLensError::Export {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(export_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, graph)?;
    writer.write_all(b"\n").map_err(export_err)?;
    writer.flush().map_err(export_err)?;

    info!(
        "Exported {} nodes and {} edges to {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(())
}

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let nodes: Vec<Record<'_>> = self
            .nodes()
            .map(|node| Record {
                fields: vec![("id", &node.id)],
                attributes: &node.attributes,
                reserved: NODE_RESERVED,
            })
            .collect();
        let links: Vec<Record<'_>> = self
            .edges()
            .iter()
            .map(|edge| Record {
                fields: vec![("source", &edge.source), ("target", &edge.target)],
                attributes: &edge.attributes,
                reserved: LINK_RESERVED,
            })
            .collect();

        let mut state = serializer.serialize_struct("Graph", 5)?;
        state.serialize_field("directed", &true)?;
        state.serialize_field("multigraph", &false)?;
        state.serialize_field("graph", self.attributes())?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("links", &links)?;
        state.end()
    }
}

/// Structural fields followed by the non-reserved attributes
struct Record<'a> {
    fields: Vec<(&'static str, &'a NodeId)>,
    attributes: &'a PropertyMap,
    reserved: &'static [&'static str],
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, id) in &self.fields {
            map.serialize_entry(key, id)?;
        }
        for (key, value) in self.attributes {
            if !self.reserved.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
