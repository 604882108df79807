//! Graphlens
//!
//! Structural analysis of directed knowledge graphs: load a graph once, derive
//! a subgraph (full graph, largest weakly connected component, or k-core) and
//! compute metrics, degree distributions and centrality rankings over it.
//!
//! # Architecture
//!
//! - `graph`: immutable directed graph model (nodes, edges, flat attributes)
//! - `loader`: GraphML and node-link JSON readers, [`GraphStore`]
//! - `cache`: explicit load-once memoization keyed by path
//! - `selection`: subgraph selection policies
//! - `metrics`, `degree`, `centrality`: the analyses
//! - `analyzer`: the select-then-analyze pipeline
//! - `export`: node-link JSON for external renderers
//!
//! Algorithms run on the dense CSR view from the `graphlens-algorithms` crate.
//!
//! ## Example Usage
//!
//! ```rust
//! use graphlens::{Analyzer, AnalysisConfig, GraphFormat, GraphStore, SelectionPolicy};
//!
//! let json = r#"{
//!     "nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}, {"id": "D"}],
//!     "links": [
//!         {"source": "A", "target": "B"},
//!         {"source": "B", "target": "C"},
//!         {"source": "C", "target": "D"},
//!         {"source": "A", "target": "D"}
//!     ]
//! }"#;
//! let store = GraphStore::from_text(json, GraphFormat::NodeLinkJson).unwrap();
//!
//! let config = AnalysisConfig::default().with_policy(SelectionPolicy::KCore(2));
//! let report = Analyzer::new(config).run(store.graph()).unwrap();
//!
//! assert_eq!(report.node_count, 4);
//! assert_eq!(report.metrics.weakly_connected_components, 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod analyzer;
pub mod cache;
pub mod centrality;
pub mod config;
pub mod degree;
pub mod error;
pub mod export;
pub mod graph;
pub mod loader;
pub mod metrics;
pub mod selection;

// Re-export main types for convenience
pub use graph::{Edge, Graph, GraphBuilder, GraphError, GraphResult, Node, NodeId, PropertyMap, PropertyValue};

pub use loader::{GraphFormat, GraphStore, LoadError, LoadResult};

pub use cache::GraphCache;

pub use selection::{select, SelectionError, SelectionPolicy, SelectionResult, Subgraph};

pub use metrics::MetricsReport;

pub use degree::{DegreeKind, DegreeProfile, DegreeSummary};

pub use centrality::{CentralityMetric, CentralityReport, CentralityRow, CentralityTable, RankedNode, TopK};

pub use analyzer::{AnalysisReport, Analyzer};

pub use config::{AnalysisConfig, ConfigError};

pub use error::GraphLensError;

pub use algo::EigenvectorConfig;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
