//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Nodes are the indices `0..node_count`. Callers own the mapping from their
/// identifiers to indices; every algorithm in this crate returns results
/// aligned with these indices.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,

    /// Undirected projection: distinct neighbors, excluding the node itself.
    /// Offsets into `und_neighbors`. Size = node_count + 1
    pub und_offsets: Vec<usize>,
    /// Sorted neighbor indices per node
    pub und_neighbors: Vec<usize>,

    /// Nodes carrying a self-loop
    pub self_loops: Vec<bool>,
}

impl GraphView {
    /// Build a view from a directed edge list.
    ///
    /// Edges are expected to be unique `(source, target)` pairs with both
    /// endpoints below `node_count`. Out-of-range edges are skipped.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut undirected: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut self_loops = vec![false; node_count];

        for &(u, v) in edges {
            if u >= node_count || v >= node_count {
                continue;
            }
            outgoing[u].push(v);
            incoming[v].push(u);
            if u == v {
                self_loops[u] = true;
            } else {
                undirected[u].push(v);
                undirected[v].push(u);
            }
        }

        for neighbors in undirected.iter_mut() {
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        let (out_offsets, out_targets) = flatten(outgoing);
        let (in_offsets, in_sources) = flatten(incoming);
        let (und_offsets, und_neighbors) = flatten(undirected);

        GraphView {
            node_count,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
            und_offsets,
            und_neighbors,
            self_loops,
        }
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// In-degree plus out-degree; a self-loop contributes two
    pub fn total_degree(&self, idx: usize) -> usize {
        self.in_degree(idx) + self.out_degree(idx)
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Distinct neighbors in the undirected projection, self excluded
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.und_offsets[idx];
        let end = self.und_offsets[idx + 1];
        &self.und_neighbors[start..end]
    }

    /// Degree in the undirected projection (self-loops not counted)
    pub fn undirected_degree(&self, idx: usize) -> usize {
        self.und_offsets[idx + 1] - self.und_offsets[idx]
    }

    /// Iterate all directed edges as `(source, target)` index pairs
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.node_count).flat_map(move |u| self.successors(u).iter().map(move |&v| (u, v)))
    }
}

fn flatten(lists: Vec<Vec<usize>>) -> (Vec<usize>, Vec<usize>) {
    let mut offsets = Vec::with_capacity(lists.len() + 1);
    let mut flat = Vec::new();
    offsets.push(0);
    for list in lists {
        flat.extend(list);
        offsets.push(flat.len());
    }
    (offsets, flat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csr_degrees() {
        // 0 -> 1, 0 -> 2, 1 -> 0, 2 -> 2
        let view = GraphView::from_edges(3, &[(0, 1), (0, 2), (1, 0), (2, 2)]);

        assert_eq!(view.edge_count(), 4);
        assert_eq!(view.out_degree(0), 2);
        assert_eq!(view.in_degree(0), 1);
        assert_eq!(view.successors(0), &[1, 2]);
        assert_eq!(view.predecessors(2), &[0, 2]);
        assert_eq!(view.total_degree(2), 3);
    }

    #[test]
    fn test_undirected_projection_dedups() {
        let view = GraphView::from_edges(3, &[(0, 1), (1, 0), (2, 2)]);

        assert_eq!(view.neighbors(0), &[1]);
        assert_eq!(view.neighbors(1), &[0]);
        assert_eq!(view.undirected_degree(2), 0);
        assert!(view.self_loops[2]);
        assert!(!view.self_loops[0]);
    }

    #[test]
    fn test_edges_iterator() {
        let view = GraphView::from_edges(3, &[(2, 0), (0, 1)]);
        let edges: Vec<_> = view.edges().collect();
        assert_eq!(edges, vec![(0, 1), (2, 0)]);
    }
}
