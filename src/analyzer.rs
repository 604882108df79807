//! End-to-end analysis pipeline
//!
//! select -> {metrics, degree profiles, centrality}. Each stage is a pure
//! function of the selected subgraph, so running the pipeline twice on the
//! same input gives the same report.

use crate::centrality::{self, CentralityReport};
use crate::config::AnalysisConfig;
use crate::degree::{DegreeKind, DegreeProfile};
use crate::graph::Graph;
use crate::metrics::{self, MetricsReport};
use crate::selection::{self, SelectionPolicy, SelectionResult, Subgraph};
use serde::Serialize;
use tracing::info;

/// Everything computed for one selected subgraph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub policy: SelectionPolicy,
    pub node_count: usize,
    pub edge_count: usize,
    /// The selection produced no nodes; all statistics are sentinels
    pub empty: bool,
    pub metrics: MetricsReport,
    pub degrees: Vec<DegreeProfile>,
    pub centrality: CentralityReport,
}

impl AnalysisReport {
    pub fn degree_profile(&self, kind: DegreeKind) -> Option<&DegreeProfile> {
        self.degrees.iter().find(|p| p.kind == kind)
    }
}

pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Select the configured subgraph of `graph`
    pub fn select(&self, graph: &Graph) -> SelectionResult<Subgraph> {
        selection::select(graph, self.config.policy()?)
    }

    /// Run the whole pipeline
    pub fn run(&self, graph: &Graph) -> SelectionResult<AnalysisReport> {
        let subgraph = self.select(graph)?;
        Ok(self.analyze(&subgraph))
    }

    /// Analyze an already-selected subgraph
    pub fn analyze(&self, subgraph: &Subgraph) -> AnalysisReport {
        let graph = subgraph.graph();
        if subgraph.is_empty() {
            info!("Selection '{}' is empty; reporting sentinel statistics", subgraph.policy());
        }

        let metrics = metrics::compute(graph);
        let degrees = DegreeKind::ALL
            .iter()
            .map(|&kind| DegreeProfile::compute(graph, kind))
            .collect();
        let centrality = centrality::rank(graph, self.config.top_k, self.config.eigenvector_config());

        AnalysisReport {
            policy: subgraph.policy(),
            node_count: subgraph.node_count(),
            edge_count: subgraph.edge_count(),
            empty: subgraph.is_empty(),
            metrics,
            degrees,
            centrality,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
