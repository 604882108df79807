//! Structural metrics over a (sub)graph
//!
//! Each metric is computed independently. A metric that is undefined for the
//! given graph is reported as a sentinel (`None` or 0), never as an error.

use crate::algo::{
    average_clustering, build_view, degree_assortativity, strongly_connected_components,
    weakly_connected_components, DegreeMode, GraphView,
};
use crate::graph::Graph;
use serde::Serialize;
use tracing::debug;

/// Summary statistics of one graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub node_count: usize,
    pub edge_count: usize,
    /// `|E| / (|V|·(|V|-1))`, within `[0, 1]`
    pub density: f64,
    /// Degree assortativity; `None` when not applicable
    pub assortativity: Option<f64>,
    pub average_clustering: f64,
    pub strongly_connected_components: usize,
    pub weakly_connected_components: usize,
}

impl MetricsReport {
    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }
}

/// Compute every metric for `graph`
pub fn compute(graph: &Graph) -> MetricsReport {
    let view = build_view(graph);
    let report = compute_view(&view);
    debug!(
        "Metrics: density={:.4}, clustering={:.4}, scc={}, wcc={}",
        report.density,
        report.average_clustering,
        report.strongly_connected_components,
        report.weakly_connected_components
    );
    report
}

/// Metrics for an already-built view
pub fn compute_view(view: &GraphView) -> MetricsReport {
    MetricsReport {
        node_count: view.node_count,
        edge_count: view.edge_count(),
        density: density(view.node_count, view.edge_count()),
        assortativity: assortativity(view),
        average_clustering: average_clustering(view),
        strongly_connected_components: strongly_connected_components(view).component_count(),
        weakly_connected_components: weakly_connected_components(view).component_count(),
    }
}

/// Directed density; self-loops count toward the edge total
pub fn density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let n = node_count as f64;
    (edge_count as f64 / (n * (n - 1.0))).min(1.0)
}

/// Out-degree of the source against in-degree of the target
pub fn assortativity(view: &GraphView) -> Option<f64> {
    degree_assortativity(view, DegreeMode::Out, DegreeMode::In)
}
