//! In-memory graph storage
//!
//! The base graph is built once and never mutated. Subgraphs are produced as
//! independent deep copies through [`Graph::induced_subgraph`].

use super::edge::Edge;
use super::node::Node;
use super::property::{PropertyMap, PropertyValue};
use super::types::NodeId;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Errors that can occur while assembling a graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("Invalid edge {from} -> {to}: endpoint {missing} does not exist")]
    DanglingEdge {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Immutable directed graph
///
/// Storage layout:
/// - nodes: NodeId -> Node, in load order (the fixed node-iteration order)
/// - edges: edge list, in load order
/// - endpoints: (source position, target position) aligned with `edges`
/// - in/out degree per node position
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    endpoints: Vec<(usize, usize)>,
    out_degree: Vec<usize>,
    in_degree: Vec<usize>,
    attributes: PropertyMap,
}

impl Graph {
    /// Create an empty graph
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a graph
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in the fixed iteration order
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = &NodeId> + '_ {
        self.nodes.keys()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// `(source, target)` node positions, aligned with [`Graph::edges`]
    pub fn endpoints(&self) -> &[(usize, usize)] {
        &self.endpoints
    }

    /// Graph-level attributes
    pub fn attributes(&self) -> &PropertyMap {
        &self.attributes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Position of a node in the iteration order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source.as_str() == source && e.target.as_str() == target)
    }

    pub fn out_degree(&self, id: &str) -> Option<usize> {
        self.index_of(id).map(|i| self.out_degree[i])
    }

    pub fn in_degree(&self, id: &str) -> Option<usize> {
        self.index_of(id).map(|i| self.in_degree[i])
    }

    /// In-degree plus out-degree; a self-loop counts toward both
    pub fn degree(&self, id: &str) -> Option<usize> {
        self.index_of(id).map(|i| self.in_degree[i] + self.out_degree[i])
    }

    /// Out-degree per node position
    pub fn out_degrees(&self) -> &[usize] {
        &self.out_degree
    }

    /// In-degree per node position
    pub fn in_degrees(&self) -> &[usize] {
        &self.in_degree
    }

    /// Copy of the subgraph induced by the given node positions
    ///
    /// Node and edge order follow the base graph regardless of the order of
    /// `indices`. Out-of-range positions are ignored.
    pub fn induced_subgraph(&self, indices: impl IntoIterator<Item = usize>) -> Graph {
        let n = self.node_count();
        let mut keep = vec![false; n];
        for i in indices {
            if i < n {
                keep[i] = true;
            }
        }

        let mut remap = vec![usize::MAX; n];
        let mut nodes = IndexMap::new();
        for (i, (id, node)) in self.nodes.iter().enumerate() {
            if keep[i] {
                remap[i] = nodes.len();
                nodes.insert(id.clone(), node.clone());
            }
        }

        let mut edges = Vec::new();
        let mut endpoints = Vec::new();
        let mut out_degree = vec![0; nodes.len()];
        let mut in_degree = vec![0; nodes.len()];
        for (edge, &(u, v)) in self.edges.iter().zip(&self.endpoints) {
            if keep[u] && keep[v] {
                let (nu, nv) = (remap[u], remap[v]);
                edges.push(edge.clone());
                endpoints.push((nu, nv));
                out_degree[nu] += 1;
                in_degree[nv] += 1;
            }
        }

        Graph {
            nodes,
            edges,
            endpoints,
            out_degree,
            in_degree,
            attributes: self.attributes.clone(),
        }
    }
}

/// Incremental graph construction enforcing the model invariants
///
/// - duplicate node identifiers are rejected
/// - edges must reference existing nodes
/// - repeated `(source, target)` pairs are dropped (the first one wins)
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
    seen: FxHashSet<(usize, usize)>,
    duplicate_edges: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its position
    pub fn add_node(&mut self, id: impl Into<NodeId>, attributes: PropertyMap) -> GraphResult<usize> {
        let id = id.into();
        if self.graph.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        let index = self.graph.nodes.len();
        self.graph.nodes.insert(id.clone(), Node::with_attributes(id, attributes));
        self.graph.out_degree.push(0);
        self.graph.in_degree.push(0);
        Ok(index)
    }

    /// Add a directed edge
    ///
    /// Returns `Ok(false)` when an edge with the same endpoints already exists.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        attributes: PropertyMap,
    ) -> GraphResult<bool> {
        let source = source.into();
        let target = target.into();

        let u = match self.graph.index_of(source.as_str()) {
            Some(u) => u,
            None => {
                return Err(GraphError::DanglingEdge {
                    missing: source.clone(),
                    from: source,
                    to: target,
                })
            }
        };
        let v = match self.graph.index_of(target.as_str()) {
            Some(v) => v,
            None => {
                return Err(GraphError::DanglingEdge {
                    missing: target.clone(),
                    from: source,
                    to: target,
                })
            }
        };

        if !self.seen.insert((u, v)) {
            self.duplicate_edges += 1;
            return Ok(false);
        }

        self.graph.edges.push(Edge::with_attributes(source, target, attributes));
        self.graph.endpoints.push((u, v));
        self.graph.out_degree[u] += 1;
        self.graph.in_degree[v] += 1;
        Ok(true)
    }

    pub fn set_graph_attribute(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.graph.attributes.insert(key.into(), value.into());
    }

    /// Number of repeated edges dropped so far
    pub fn duplicate_edges(&self) -> usize {
        self.duplicate_edges
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}
