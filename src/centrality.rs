//! Node importance rankings
//!
//! Computes degree, eigenvector, closeness and betweenness centrality for every
//! node of a subgraph and extracts a top-k list per metric.

use crate::algo::{
    betweenness_centrality, build_view, closeness_centrality, degree_centrality,
    eigenvector_centrality, EigenvectorConfig,
};
use crate::graph::{Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// The four supported centrality measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralityMetric {
    Degree,
    Eigenvector,
    Closeness,
    Betweenness,
}

impl CentralityMetric {
    pub const ALL: [CentralityMetric; 4] = [
        CentralityMetric::Degree,
        CentralityMetric::Eigenvector,
        CentralityMetric::Closeness,
        CentralityMetric::Betweenness,
    ];
}

impl fmt::Display for CentralityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CentralityMetric::Degree => "degree",
            CentralityMetric::Eigenvector => "eigenvector",
            CentralityMetric::Closeness => "closeness",
            CentralityMetric::Betweenness => "betweenness",
        };
        f.write_str(name)
    }
}

/// One row of the centrality table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityRow {
    pub node: NodeId,
    pub degree: f64,
    /// `None` when eigenvector centrality is undefined for the graph
    pub eigenvector: Option<f64>,
    pub closeness: f64,
    pub betweenness: f64,
}

impl CentralityRow {
    pub fn score(&self, metric: CentralityMetric) -> Option<f64> {
        match metric {
            CentralityMetric::Degree => Some(self.degree),
            CentralityMetric::Eigenvector => self.eigenvector,
            CentralityMetric::Closeness => Some(self.closeness),
            CentralityMetric::Betweenness => Some(self.betweenness),
        }
    }
}

/// Scores for every node, in graph node order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CentralityTable {
    rows: Vec<CentralityRow>,
}

impl CentralityTable {
    /// Compute all four metrics for `graph`
    pub fn compute(graph: &Graph, config: EigenvectorConfig) -> Self {
        let view = build_view(graph);

        let degree = degree_centrality(&view);
        let eigenvector = eigenvector_centrality(&view, config);
        if eigenvector.is_none() {
            warn!(
                "Eigenvector centrality undefined for a graph of {} nodes and {} edges",
                view.node_count,
                view.edge_count()
            );
        }
        let closeness = closeness_centrality(&view);
        let betweenness = betweenness_centrality(&view);

        let rows = graph
            .node_ids()
            .enumerate()
            .map(|(i, id)| CentralityRow {
                node: id.clone(),
                degree: degree[i],
                eigenvector: eigenvector.as_ref().map(|scores| scores[i]),
                closeness: closeness[i],
                betweenness: betweenness[i],
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[CentralityRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, node: &str) -> Option<&CentralityRow> {
        self.rows.iter().find(|row| row.node.as_str() == node)
    }

    /// Whether the eigenvector column carries scores
    pub fn has_eigenvector(&self) -> bool {
        self.rows.iter().all(|row| row.eigenvector.is_some())
    }

    /// The `k` highest-scoring nodes for `metric`
    ///
    /// Sorted by descending score, ties by node id ascending. Empty when the
    /// metric is undefined.
    pub fn top(&self, metric: CentralityMetric, k: usize) -> Vec<RankedNode> {
        let mut scored: Vec<RankedNode> = self
            .rows
            .iter()
            .filter_map(|row| {
                row.score(metric).map(|score| RankedNode {
                    node: row.node.clone(),
                    score,
                })
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.node.cmp(&b.node)));
        scored.truncate(k);
        scored
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    pub node: NodeId,
    pub score: f64,
}

/// Top-k list for one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopK {
    pub metric: CentralityMetric,
    pub nodes: Vec<RankedNode>,
}

/// Full table plus one [`TopK`] per metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityReport {
    /// Effective k after clamping
    pub top_k: usize,
    pub table: CentralityTable,
    pub rankings: Vec<TopK>,
}

impl CentralityReport {
    pub fn ranking(&self, metric: CentralityMetric) -> &[RankedNode] {
        self.rankings
            .iter()
            .find(|r| r.metric == metric)
            .map(|r| r.nodes.as_slice())
            .unwrap_or(&[])
    }
}

/// Clamp a requested k to `[1, node_count]`; 0 for an empty graph
pub fn clamp_top_k(top_k: i64, node_count: usize) -> usize {
    if node_count == 0 {
        return 0;
    }
    let k = usize::try_from(top_k.max(1)).unwrap_or(usize::MAX);
    k.min(node_count)
}

/// Compute the centrality table for `graph` and rank its `top_k` nodes
pub fn rank(graph: &Graph, top_k: i64, config: EigenvectorConfig) -> CentralityReport {
    let k = clamp_top_k(top_k, graph.node_count());
    if !graph.is_empty() && i64::try_from(k).ok() != Some(top_k) {
        debug!("Requested top-{} clamped to {}", top_k, k);
    }

    let table = CentralityTable::compute(graph, config);
    let rankings = CentralityMetric::ALL
        .iter()
        .map(|&metric| TopK {
            metric,
            nodes: table.top(metric, k),
        })
        .collect();

    CentralityReport {
        top_k: k,
        table,
        rankings,
    }
}
