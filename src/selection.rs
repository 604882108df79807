//! Subgraph selection
//!
//! Derives the subgraph that downstream analyses run on. Every policy returns
//! an induced subgraph of the base graph with original edge directions, as an
//! independent copy.

use crate::algo::{build_view, k_core, weakly_connected_components};
use crate::graph::{Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while choosing a selection policy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid parameter k = {k}: {reason}")]
    InvalidParameter { k: i64, reason: String },

    #[error("Unknown selection policy '{0}' (expected full, lwcc or kcore)")]
    UnknownPolicy(String),
}

pub type SelectionResult<T> = Result<T, SelectionError>;

/// How the display subgraph is derived from the base graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "policy", content = "k", rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// The entire graph
    Full,
    /// The largest weakly connected component
    #[serde(rename = "lwcc")]
    LargestWeaklyConnectedComponent,
    /// The k-core of the undirected projection, `k >= 1`
    #[serde(rename = "kcore")]
    KCore(u32),
}

impl SelectionPolicy {
    /// Validated k-core policy
    pub fn k_core(k: i64) -> SelectionResult<Self> {
        if k < 1 {
            return Err(SelectionError::InvalidParameter {
                k,
                reason: "k must be at least 1".to_string(),
            });
        }
        u32::try_from(k)
            .map(SelectionPolicy::KCore)
            .map_err(|_| SelectionError::InvalidParameter {
                k,
                reason: "k is too large".to_string(),
            })
    }

    /// Policy from its name; `k` is only consulted for the k-core
    pub fn from_name(name: &str, k: i64) -> SelectionResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(SelectionPolicy::Full),
            "lwcc" | "largest-wcc" | "largest_wcc" => Ok(SelectionPolicy::LargestWeaklyConnectedComponent),
            "kcore" | "k-core" | "k_core" => Self::k_core(k),
            other => Err(SelectionError::UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::Full => write!(f, "full graph"),
            SelectionPolicy::LargestWeaklyConnectedComponent => {
                write!(f, "largest weakly connected component")
            }
            SelectionPolicy::KCore(k) => write!(f, "{}-core", k),
        }
    }
}

/// A derived graph plus the policy that produced it
///
/// Possibly empty: an empty k-core is a valid result, not a failure.
#[derive(Debug, Clone, Serialize)]
pub struct Subgraph {
    policy: SelectionPolicy,
    graph: Graph,
}

impl Subgraph {
    pub fn new(policy: SelectionPolicy, graph: Graph) -> Self {
        Self { policy, graph }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl AsRef<Graph> for Subgraph {
    fn as_ref(&self) -> &Graph {
        &self.graph
    }
}

/// Derive a subgraph under `policy`
pub fn select(graph: &Graph, policy: SelectionPolicy) -> SelectionResult<Subgraph> {
    let selected = match policy {
        SelectionPolicy::Full => graph.clone(),
        SelectionPolicy::LargestWeaklyConnectedComponent => largest_weak_component(graph),
        SelectionPolicy::KCore(0) => {
            return Err(SelectionError::InvalidParameter {
                k: 0,
                reason: "k must be at least 1".to_string(),
            })
        }
        SelectionPolicy::KCore(k) => {
            let view = build_view(graph);
            let survivors = k_core(&view, k as usize);
            if survivors.is_empty() && !graph.is_empty() {
                info!("No {}-core exists in a graph of {} nodes", k, graph.node_count());
            }
            graph.induced_subgraph(survivors)
        }
    };

    debug!(
        "Selected {}: {} nodes, {} edges",
        policy,
        selected.node_count(),
        selected.edge_count()
    );

    Ok(Subgraph::new(policy, selected))
}

/// Largest component by node count; ties go to the component holding the
/// smallest node identifier
fn largest_weak_component(graph: &Graph) -> Graph {
    let view = build_view(graph);
    let wcc = weakly_connected_components(&view);
    let ids: Vec<&NodeId> = graph.node_ids().collect();

    let best = wcc
        .components
        .iter()
        .filter_map(|members| {
            let smallest = members.iter().map(|&i| ids[i]).min()?;
            Some((members, smallest))
        })
        .max_by(|(a, a_min), (b, b_min)| a.len().cmp(&b.len()).then_with(|| b_min.cmp(a_min)));

    match best {
        Some((members, _)) => graph.induced_subgraph(members.iter().copied()),
        None => Graph::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PropertyMap;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut b = Graph::builder();
        for id in nodes {
            b.add_node(*id, PropertyMap::new()).unwrap();
        }
        for (s, t) in edges {
            b.add_edge(*s, *t, PropertyMap::new()).unwrap();
        }
        b.build()
    }

    fn ids(sub: &Subgraph) -> Vec<&str> {
        sub.graph().node_ids().map(NodeId::as_str).collect()
    }

    #[test]
    fn test_full_is_copy() {
        let g = graph(&["a", "b", "c"], &[("a", "b")]);
        let sub = select(&g, SelectionPolicy::Full).unwrap();
        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 1);
        assert_eq!(sub.policy(), SelectionPolicy::Full);
    }

    #[test]
    fn test_lwcc_picks_largest() {
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("c", "d"), ("e", "d")],
        );
        let sub = select(&g, SelectionPolicy::LargestWeaklyConnectedComponent).unwrap();
        assert_eq!(ids(&sub), vec!["c", "d", "e"]);
        assert!(sub.graph().has_edge("e", "d"));
        assert!(!sub.graph().has_edge("d", "e"));
    }

    #[test]
    fn test_lwcc_tie_goes_to_smallest_identifier() {
        // Two components of size 2; "m" < "x" even though "x" loads first
        let g = graph(&["x", "y", "m", "n"], &[("x", "y"), ("n", "m")]);
        let sub = select(&g, SelectionPolicy::LargestWeaklyConnectedComponent).unwrap();
        assert_eq!(ids(&sub), vec!["m", "n"]);
    }

    #[test]
    fn test_lwcc_empty_graph() {
        let sub = select(&Graph::empty(), SelectionPolicy::LargestWeaklyConnectedComponent).unwrap();
        assert!(sub.is_empty());
    }

    #[test]
    fn test_kcore_scenario() {
        // A->B->C->D, A->D: every undirected degree is 2
        let g = graph(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D"), ("A", "D")]);

        assert_eq!(select(&g, SelectionPolicy::KCore(1)).unwrap().node_count(), 4);
        let two = select(&g, SelectionPolicy::KCore(2)).unwrap();
        assert_eq!(two.node_count(), 4);
        assert_eq!(two.edge_count(), 4);
        assert!(select(&g, SelectionPolicy::KCore(3)).unwrap().is_empty());
    }

    #[test]
    fn test_kcore_one_drops_isolated_and_self_loop_only_nodes() {
        let g = graph(&["a", "b", "lonely", "loop"], &[("a", "b"), ("loop", "loop")]);
        let sub = select(&g, SelectionPolicy::KCore(1)).unwrap();
        assert_eq!(ids(&sub), vec!["a", "b"]);
    }

    #[test]
    fn test_kcore_keeps_directions_and_self_loops() {
        // triangle with a self-loop on a, plus pendant d
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("a", "a"), ("d", "a")],
        );
        let sub = select(&g, SelectionPolicy::KCore(2)).unwrap();
        assert_eq!(ids(&sub), vec!["a", "b", "c"]);
        assert_eq!(sub.edge_count(), 4);
        assert!(sub.graph().has_edge("a", "a"));
        assert!(sub.graph().has_edge("c", "a"));
        assert!(!sub.graph().has_edge("a", "c"));
    }

    #[test]
    fn test_kcore_zero_rejected() {
        let g = graph(&["a"], &[]);
        assert!(matches!(
            select(&g, SelectionPolicy::KCore(0)),
            Err(SelectionError::InvalidParameter { k: 0, .. })
        ));
        assert!(SelectionPolicy::k_core(0).is_err());
        assert!(SelectionPolicy::k_core(-3).is_err());
        assert_eq!(SelectionPolicy::k_core(4), Ok(SelectionPolicy::KCore(4)));
    }

    #[test]
    fn test_policy_from_name() {
        assert_eq!(SelectionPolicy::from_name("full", 0), Ok(SelectionPolicy::Full));
        assert_eq!(
            SelectionPolicy::from_name("LWCC", 0),
            Ok(SelectionPolicy::LargestWeaklyConnectedComponent)
        );
        assert_eq!(SelectionPolicy::from_name("k-core", 3), Ok(SelectionPolicy::KCore(3)));
        assert!(matches!(
            SelectionPolicy::from_name("kcore", 0),
            Err(SelectionError::InvalidParameter { .. })
        ));
        assert!(matches!(
            SelectionPolicy::from_name("random", 1),
            Err(SelectionError::UnknownPolicy(_))
        ));
    }

    #[test]
    fn test_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&SelectionPolicy::KCore(2)).unwrap(),
            r#"{"policy":"kcore","k":2}"#
        );
        assert_eq!(
            serde_json::to_string(&SelectionPolicy::Full).unwrap(),
            r#"{"policy":"full"}"#
        );
    }
}
