//! Degree mixing (assortativity)

use super::common::GraphView;

/// Which degree of an edge endpoint enters the correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeMode {
    In,
    Out,
    Total,
}

impl DegreeMode {
    fn of(self, view: &GraphView, idx: usize) -> f64 {
        match self {
            DegreeMode::In => view.in_degree(idx) as f64,
            DegreeMode::Out => view.out_degree(idx) as f64,
            DegreeMode::Total => view.total_degree(idx) as f64,
        }
    }
}

/// Degree assortativity coefficient
///
/// Pearson correlation over all edges `u -> v` of `(source_mode(u),
/// target_mode(v))`. Returns `None` when the coefficient is undefined: fewer
/// than two edges, or zero variance on either side.
pub fn degree_assortativity(
    view: &GraphView,
    source_mode: DegreeMode,
    target_mode: DegreeMode,
) -> Option<f64> {
    let m = view.edge_count();
    if m < 2 {
        return None;
    }

    let pairs: Vec<(f64, f64)> = view
        .edges()
        .map(|(u, v)| (source_mode.of(view, u), target_mode.of(view, v)))
        .collect();

    let mf = m as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / mf;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / mf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for &(x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom <= f64::EPSILON {
        return None;
    }

    let r = cov / denom;
    if r.is_finite() {
        Some(r.clamp(-1.0, 1.0))
    } else {
        None
    }
}
