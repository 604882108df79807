//! Centrality algorithms
//!
//! Degree, eigenvector, closeness and betweenness centrality. Every function
//! returns one score per node index of the view.

use super::common::GraphView;
use super::pathfinding::{bfs_distances, Direction};
use ndarray::Array1;
use std::collections::VecDeque;

/// Eigenvector centrality configuration
#[derive(Debug, Clone, Copy)]
pub struct EigenvectorConfig {
    /// Maximum number of power iterations
    pub max_iterations: usize,
    /// Per-node tolerance; iteration stops once the L1 change drops below `n * tolerance`
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-6,
        }
    }
}

/// Degree centrality: `(in + out) / (n - 1)`
///
/// A single-node graph scores 1.0.
pub fn degree_centrality(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    if n == 1 {
        return vec![1.0];
    }
    let scale = 1.0 / (n as f64 - 1.0);
    (0..n).map(|v| view.total_degree(v) as f64 * scale).collect()
}

/// Lanczos cycle length
const LANCZOS_STEPS: usize = 300;
/// Lanczos restarts from the current Ritz vector
const LANCZOS_RESTARTS: usize = 50;
/// Relative residual `|Bx - θx| / θ` accepted by the Lanczos fallback
const LANCZOS_RESIDUAL: f64 = 1e-10;

/// Eigenvector centrality on the undirected projection
///
/// Power iteration on `B = A + I` (same eigenvectors as `A`, but no oscillation
/// on bipartite graphs) from the all-ones vector, L2-normalized. Self-loops add
/// a diagonal entry. Nodes without neighbors score 0.
///
/// When the power loop exhausts `max_iterations` (long paths and other graphs
/// with a small spectral gap), the dominant eigenvector of `B` is taken from a
/// restarted Lanczos solve instead.
///
/// Returns `None` only when there is no edge between distinct nodes.
pub fn eigenvector_centrality(view: &GraphView, config: EigenvectorConfig) -> Option<Vec<f64>> {
    let n = view.node_count;
    if n == 0 {
        return Some(Vec::new());
    }
    if view.und_neighbors.is_empty() {
        return None;
    }

    let mut x: Array1<f64> = (0..n)
        .map(|v| if view.undirected_degree(v) > 0 { 1.0 } else { 0.0 })
        .collect();
    let norm = x.dot(&x).sqrt();
    x.mapv_inplace(|s| s / norm);

    let threshold = n as f64 * config.tolerance;

    for _ in 0..config.max_iterations {
        let mut next = shifted_product(view, &x);
        let norm = next.dot(&next).sqrt();
        if norm <= 0.0 || !norm.is_finite() {
            break;
        }
        next.mapv_inplace(|s| s / norm);

        let diff: f64 = (&next - &x).mapv(f64::abs).sum();
        x = next;
        if diff < threshold {
            return Some(x.to_vec());
        }
    }

    // the Perron vector is nonnegative up to sign
    let mut x = lanczos_dominant(view, x);
    x.mapv_inplace(f64::abs);
    let norm = x.dot(&x).sqrt();
    if norm <= 0.0 || !norm.is_finite() {
        return None;
    }
    x.mapv_inplace(|s| s / norm);
    Some(x.to_vec())
}

/// `(A + I) x` over the undirected projection, self-loops on the diagonal
fn shifted_product(view: &GraphView, x: &Array1<f64>) -> Array1<f64> {
    let mut y = x.clone();
    for v in 0..view.node_count {
        let mut acc: f64 = view.neighbors(v).iter().map(|&u| x[u]).sum();
        if view.self_loops[v] {
            acc += x[v];
        }
        y[v] += acc;
    }
    y
}

/// Dominant eigenvector of `A + I`, restarting each Lanczos cycle from the
/// previous Ritz vector until the residual is small
fn lanczos_dominant(view: &GraphView, start: Array1<f64>) -> Array1<f64> {
    let steps = view.node_count.min(LANCZOS_STEPS);
    let mut x = start;

    for _ in 0..LANCZOS_RESTARTS {
        let ritz = lanczos_cycle(view, &x, steps);
        let norm = ritz.dot(&ritz).sqrt();
        if norm <= 0.0 || !norm.is_finite() {
            break;
        }
        x = ritz / norm;

        let product = shifted_product(view, &x);
        let theta = x.dot(&product);
        let residual = &product - &(&x * theta);
        if residual.dot(&residual).sqrt() <= LANCZOS_RESIDUAL * theta.abs().max(1.0) {
            break;
        }
    }

    x
}

/// One Lanczos cycle with full reorthogonalization; returns the Ritz vector of
/// the largest Ritz value
fn lanczos_cycle(view: &GraphView, start: &Array1<f64>, steps: usize) -> Array1<f64> {
    let mut basis: Vec<Array1<f64>> = Vec::with_capacity(steps);
    let mut alpha: Vec<f64> = Vec::with_capacity(steps);
    let mut beta: Vec<f64> = Vec::with_capacity(steps);

    let mut v = start / start.dot(start).sqrt();
    loop {
        let mut w = shifted_product(view, &v);
        let a = w.dot(&v);
        alpha.push(a);
        basis.push(v);

        // two Gram-Schmidt passes against the whole basis
        for _ in 0..2 {
            for q in &basis {
                let c = w.dot(q);
                w.scaled_add(-c, q);
            }
        }

        if basis.len() == steps {
            break;
        }
        let b = w.dot(&w).sqrt();
        if b <= 1e-12 * a.abs().max(1.0) {
            // invariant subspace
            break;
        }
        beta.push(b);
        v = w / b;
    }

    let y = tridiagonal_dominant(&alpha, &beta);
    let mut ritz = Array1::zeros(view.node_count);
    for (q, &c) in basis.iter().zip(y.iter()) {
        ritz.scaled_add(c, q);
    }
    ritz
}

/// Eigenvector of the largest eigenvalue of the symmetric tridiagonal matrix
/// with diagonal `alpha` and off-diagonal `beta`
///
/// Sturm-sequence bisection brackets the eigenvalue from above, then inverse
/// iteration with that shift recovers the vector.
fn tridiagonal_dominant(alpha: &[f64], beta: &[f64]) -> Vec<f64> {
    let m = alpha.len();
    if m == 1 {
        return vec![1.0];
    }

    let off = |i: usize| if i < beta.len() { beta[i].abs() } else { 0.0 };
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for i in 0..m {
        let radius = off(i) + if i > 0 { off(i - 1) } else { 0.0 };
        lo = lo.min(alpha[i] - radius);
        hi = hi.max(alpha[i] + radius);
    }
    let margin = f64::EPSILON * lo.abs().max(hi.abs()).max(1.0);
    lo -= margin;
    hi += margin;

    // eigenvalues strictly below x
    let below = |x: f64| {
        let mut count = 0;
        let mut d = 1.0;
        for i in 0..m {
            let coupling = if i > 0 { beta[i - 1] * beta[i - 1] / d } else { 0.0 };
            d = alpha[i] - x - coupling;
            if d == 0.0 {
                d = -f64::MIN_POSITIVE;
            }
            if d < 0.0 {
                count += 1;
            }
        }
        count
    };

    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        if below(mid) == m {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    // T - hi*I is negative definite, so elimination without pivoting is stable
    let mut y = vec![1.0; m];
    let mut c = vec![0.0; m];
    let mut z = vec![0.0; m];
    for _ in 0..3 {
        for i in 0..m {
            let sub = if i > 0 { beta[i - 1] } else { 0.0 };
            let mut pivot = alpha[i] - hi - if i > 0 { sub * c[i - 1] } else { 0.0 };
            if pivot == 0.0 {
                pivot = -f64::MIN_POSITIVE;
            }
            c[i] = if i + 1 < m { beta[i] / pivot } else { 0.0 };
            z[i] = (y[i] - if i > 0 { sub * z[i - 1] } else { 0.0 }) / pivot;
        }
        y[m - 1] = z[m - 1];
        for i in (0..m - 1).rev() {
            y[i] = z[i] - c[i] * y[i + 1];
        }

        let scale = y.iter().fold(0.0f64, |acc, s| acc.max(s.abs()));
        if scale <= 0.0 || !scale.is_finite() {
            break;
        }
        y.iter_mut().for_each(|s| *s /= scale);
    }

    y
}

/// Closeness centrality using inward distances
///
/// Only the nodes that can reach `v` enter the sum, scaled by the fraction of
/// the graph they represent (Wasserman–Faust). Nodes nobody reaches score 0.
pub fn closeness_centrality(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    let mut scores = vec![0.0; n];
    if n < 2 {
        return scores;
    }

    for (v, score) in scores.iter_mut().enumerate() {
        let dist = bfs_distances(view, v, Direction::Incoming);
        let (reached, total) = dist
            .iter()
            .flatten()
            .fold((0usize, 0usize), |(r, t), &d| (r + 1, t + d));

        if total > 0 {
            let r = (reached - 1) as f64;
            *score = (r / total as f64) * (r / (n - 1) as f64);
        }
    }

    scores
}

/// Betweenness centrality (Brandes), directed, unweighted
///
/// Normalized by `1 / ((n-1)(n-2))` when `n > 2`.
pub fn betweenness_centrality(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    let mut bc = vec![0.0; n];

    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![-1i64; n];
    let mut delta = vec![0.0f64; n];
    let mut queue = VecDeque::new();

    for s in 0..n {
        order.clear();
        for p in preds.iter_mut() {
            p.clear();
        }
        sigma.iter_mut().for_each(|x| *x = 0.0);
        dist.iter_mut().for_each(|x| *x = -1);
        delta.iter_mut().for_each(|x| *x = 0.0);

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            for &w in view.successors(v) {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        while let Some(w) = order.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                bc[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        bc.iter_mut().for_each(|x| *x *= scale);
    }

    bc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_degree_centrality() {
        // 0->1, 0->2, 1->2
        let view = GraphView::from_edges(3, &[(0, 1), (0, 2), (1, 2)]);
        assert_eq!(degree_centrality(&view), vec![1.0, 1.0, 1.0]);

        let single = GraphView::from_edges(1, &[]);
        assert_eq!(degree_centrality(&single), vec![1.0]);
        assert!(degree_centrality(&GraphView::from_edges(0, &[])).is_empty());
    }

    #[test]
    fn test_eigenvector_star() {
        // Star: hub 0 with leaves 1..4; hub score = 1/sqrt(2), leaves = 1/(2*sqrt(2))
        let view = GraphView::from_edges(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let scores = eigenvector_centrality(&view, EigenvectorConfig::default()).unwrap();

        assert!((scores[0] - 1.0 / 2f64.sqrt()).abs() < 1e-4);
        for leaf in 1..5 {
            assert!((scores[leaf] - 1.0 / (2.0 * 2f64.sqrt())).abs() < 1e-4);
        }
        let norm: f64 = scores.iter().map(|s| s * s).sum();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_eigenvector_isolated_nodes_score_zero() {
        // Triangle 0-1-2 plus isolated 3
        let view = GraphView::from_edges(4, &[(0, 1), (1, 2), (2, 0)]);
        let scores = eigenvector_centrality(&view, EigenvectorConfig::default()).unwrap();
        assert_eq!(scores[3], 0.0);
        assert!(approx(scores[0], scores[1]));
        assert!(scores[0] > 0.0);
    }

    #[test]
    fn test_eigenvector_edgeless_is_none() {
        let view = GraphView::from_edges(3, &[(1, 1)]);
        assert_eq!(eigenvector_centrality(&view, EigenvectorConfig::default()), None);
    }

    fn path(n: usize) -> GraphView {
        let edges: Vec<(usize, usize)> = (1..n).map(|i| (i - 1, i)).collect();
        GraphView::from_edges(n, &edges)
    }

    #[test]
    fn test_eigenvector_long_path_defined() {
        let n = 200;
        let scores = eigenvector_centrality(&path(n), EigenvectorConfig::default()).unwrap();
        assert_eq!(scores.len(), n);

        // x_i = sin(pi (i+1) / (n+1)), peaked at the two middle nodes
        let top = (0..n)
            .max_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap())
            .unwrap();
        assert!(top == 99 || top == 100, "top = {}", top);
        assert!((scores[99] - scores[100]).abs() < 1e-6);
        assert!(scores[0] < scores[50] && scores[50] < scores[99]);
        assert!((scores[0] - scores[n - 1]).abs() < 1e-6);

        let norm: f64 = scores.iter().map(|s| s * s).sum();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_eigenvector_exhausted_iterations_fall_back() {
        let config = EigenvectorConfig {
            max_iterations: 1,
            tolerance: 1e-15,
        };
        let scores = eigenvector_centrality(&path(3), config).unwrap();
        assert!((scores[0] - 0.5).abs() < 1e-9);
        assert!((scores[1] - 1.0 / 2f64.sqrt()).abs() < 1e-9);
        assert!((scores[2] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_eigenvector_fallback_keeps_isolated_at_zero() {
        // Star 0..4 plus isolated 5, solved without any power iteration
        let config = EigenvectorConfig {
            max_iterations: 0,
            tolerance: 1e-6,
        };
        let view = GraphView::from_edges(6, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let scores = eigenvector_centrality(&view, config).unwrap();
        assert_eq!(scores[5], 0.0);
        assert!((scores[0] - 1.0 / 2f64.sqrt()).abs() < 1e-9);
        assert!((scores[1] - 1.0 / (2.0 * 2f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_tridiagonal_dominant() {
        // [[2, 1], [1, 2]]: eigenvalues 1 and 3, dominant vector (1, 1)
        let y = tridiagonal_dominant(&[2.0, 2.0], &[1.0]);
        assert!((y[0] - y[1]).abs() < 1e-9);
        assert!(y[0].abs() > 0.0);
    }

    #[test]
    fn test_eigenvector_disconnected_does_not_panic() {
        // Two disjoint edges have equal spectral radius
        let view = GraphView::from_edges(4, &[(0, 1), (2, 3)]);
        let scores = eigenvector_centrality(&view, EigenvectorConfig::default()).unwrap();
        assert!(scores.iter().all(|s| s.is_finite() && *s >= 0.0));
    }

    #[test]
    fn test_closeness_chain() {
        // 0->1->2: node 2 is reached by 1 at 1 hop, 0 at 2 hops
        let view = GraphView::from_edges(3, &[(0, 1), (1, 2)]);
        let scores = closeness_centrality(&view);

        assert_eq!(scores[0], 0.0);
        // r-1 = 1, total = 1 -> 1 * 1/2
        assert!(approx(scores[1], 0.5));
        // r-1 = 2, total = 3 -> 2/3 * 2/2
        assert!(approx(scores[2], 2.0 / 3.0));
    }

    #[test]
    fn test_closeness_never_nan() {
        let view = GraphView::from_edges(3, &[(0, 0)]);
        assert!(closeness_centrality(&view).iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_betweenness_chain() {
        // 0->1->2: only node 1 lies between a pair; normalized by 1/(2*1)
        let view = GraphView::from_edges(3, &[(0, 1), (1, 2)]);
        let scores = betweenness_centrality(&view);
        assert!(approx(scores[0], 0.0));
        assert!(approx(scores[1], 0.5));
        assert!(approx(scores[2], 0.0));
    }

    #[test]
    fn test_betweenness_split_paths() {
        // 0->1->3, 0->2->3: two shortest paths 0~3, each middle node gets half
        let view = GraphView::from_edges(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let scores = betweenness_centrality(&view);
        let scale = 1.0 / 6.0;
        assert!(approx(scores[1], 0.5 * scale));
        assert!(approx(scores[2], 0.5 * scale));
        assert!(approx(scores[0], 0.0));
    }

    #[test]
    fn test_betweenness_isolated_is_zero() {
        let view = GraphView::from_edges(4, &[(0, 1), (1, 2)]);
        assert_eq!(betweenness_centrality(&view)[3], 0.0);
    }
}
