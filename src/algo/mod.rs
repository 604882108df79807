//! Graph algorithms module
//!
//! Algorithms are implemented in the `graphlens-algorithms` crate.
//! This module provides the integration/adapter layer.

use crate::graph::Graph;

// Re-export algorithms
pub use graphlens_algorithms::{
    average_clustering, betweenness_centrality, closeness_centrality, core_numbers,
    degree_assortativity, degree_centrality, eigenvector_centrality, k_core,
    strongly_connected_components, weakly_connected_components, DegreeMode, EigenvectorConfig,
    GraphView, SccResult, WccResult,
};

/// Build a GraphView from a graph for algorithm execution
///
/// View index `i` is the graph's node at position `i`.
pub fn build_view(graph: &Graph) -> GraphView {
    GraphView::from_edges(graph.node_count(), graph.endpoints())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PropertyMap;

    #[test]
    fn test_graph_view_projection() {
        let mut b = Graph::builder();
        for id in ["n1", "n2", "n3"] {
            b.add_node(id, PropertyMap::new()).unwrap();
        }
        // n1 -> n2 -> n3, n3 -> n3
        b.add_edge("n1", "n2", PropertyMap::new()).unwrap();
        b.add_edge("n2", "n3", PropertyMap::new()).unwrap();
        b.add_edge("n3", "n3", PropertyMap::new()).unwrap();
        let graph = b.build();

        let view = build_view(&graph);
        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 3);
        assert_eq!(view.successors(0), &[1]);
        assert_eq!(view.predecessors(2), &[1, 2]);
        assert_eq!(view.neighbors(2), &[1]);

        for (i, id) in graph.node_ids().enumerate() {
            assert_eq!(view.out_degree(i), graph.out_degree(id.as_str()).unwrap());
            assert_eq!(view.in_degree(i), graph.in_degree(id.as_str()).unwrap());
        }
    }
}
