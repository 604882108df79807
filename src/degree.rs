//! Degree distributions
//!
//! Raw per-node samples plus the aggregates an external plot renderer needs.

use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which degree to sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeKind {
    /// In-degree plus out-degree
    Total,
    In,
    Out,
}

impl DegreeKind {
    pub const ALL: [DegreeKind; 3] = [DegreeKind::Total, DegreeKind::In, DegreeKind::Out];
}

impl fmt::Display for DegreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DegreeKind::Total => "total",
            DegreeKind::In => "in",
            DegreeKind::Out => "out",
        };
        f.write_str(name)
    }
}

impl FromStr for DegreeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "total" | "degree" => Ok(DegreeKind::Total),
            "in" | "in-degree" => Ok(DegreeKind::In),
            "out" | "out-degree" => Ok(DegreeKind::Out),
            other => Err(format!("unknown degree kind '{}'", other)),
        }
    }
}

/// One degree value per node, in node order
///
/// A self-loop adds one to both in- and out-degree.
pub fn profile(graph: &Graph, kind: DegreeKind) -> Vec<usize> {
    match kind {
        DegreeKind::In => graph.in_degrees().to_vec(),
        DegreeKind::Out => graph.out_degrees().to_vec(),
        DegreeKind::Total => graph
            .in_degrees()
            .iter()
            .zip(graph.out_degrees())
            .map(|(i, o)| i + o)
            .collect(),
    }
}

/// Degree -> number of nodes with that degree
pub fn histogram(degrees: &[usize]) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for &d in degrees {
        *counts.entry(d).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeSummary {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

impl DegreeSummary {
    /// `None` for an empty sample
    pub fn of(degrees: &[usize]) -> Option<Self> {
        let min = *degrees.iter().min()?;
        let max = *degrees.iter().max()?;
        let mean = degrees.iter().sum::<usize>() as f64 / degrees.len() as f64;
        Some(Self { min, max, mean })
    }
}

/// Samples, histogram and summary for one degree kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeProfile {
    pub kind: DegreeKind,
    pub degrees: Vec<usize>,
    pub histogram: BTreeMap<usize, usize>,
    pub summary: Option<DegreeSummary>,
}

impl DegreeProfile {
    pub fn compute(graph: &Graph, kind: DegreeKind) -> Self {
        let degrees = profile(graph, kind);
        Self {
            kind,
            histogram: histogram(&degrees),
            summary: DegreeSummary::of(&degrees),
            degrees,
        }
    }
}
