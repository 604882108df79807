//! Graph topology analysis algorithms
//!
//! Triangle counting, local clustering and k-core decomposition, all on the
//! undirected projection of the view.

use super::common::GraphView;

/// Triangles through each node of the undirected projection
pub fn node_triangles(view: &GraphView) -> Vec<usize> {
    let n = view.node_count;
    let mut triangles = vec![0; n];
    // stamp[w] == v + 1 marks w as a neighbor of the current v
    let mut stamp = vec![0usize; n];

    for v in 0..n {
        let nbrs = view.neighbors(v);
        if nbrs.len() < 2 {
            continue;
        }
        for &u in nbrs {
            stamp[u] = v + 1;
        }
        let mut links = 0;
        for &u in nbrs {
            links += view.neighbors(u).iter().filter(|&&w| stamp[w] == v + 1).count();
        }
        // each closing edge u-w was seen from both u and w
        triangles[v] = links / 2;
    }

    triangles
}

/// Triangle Counting
///
/// Returns total number of triangles in the graph.
/// Directed edges are treated as undirected; each triangle is counted once.
pub fn count_triangles(view: &GraphView) -> usize {
    node_triangles(view).iter().sum::<usize>() / 3
}

/// Local clustering coefficient per node: `2T / (d(d-1))`, 0 when `d < 2`
pub fn local_clustering(view: &GraphView) -> Vec<f64> {
    node_triangles(view)
        .into_iter()
        .enumerate()
        .map(|(v, t)| {
            let d = view.undirected_degree(v);
            if d < 2 {
                0.0
            } else {
                (2 * t) as f64 / (d * (d - 1)) as f64
            }
        })
        .collect()
}

/// Mean local clustering over all nodes (zeros included); 0 for an empty view
pub fn average_clustering(view: &GraphView) -> f64 {
    if view.node_count == 0 {
        return 0.0;
    }
    local_clustering(view).iter().sum::<f64>() / view.node_count as f64
}

/// Core number of every node (Batagelj–Zaversnik bucket peeling, O(V+E))
///
/// Degree is taken on the undirected projection, so reciprocal edges count
/// once and self-loops do not count.
pub fn core_numbers(view: &GraphView) -> Vec<usize> {
    let n = view.node_count;
    if n == 0 {
        return Vec::new();
    }

    let mut degree: Vec<usize> = (0..n).map(|v| view.undirected_degree(v)).collect();
    let max_degree = degree.iter().copied().max().unwrap_or(0);

    // bin[d] = start position of degree-d nodes in `order`
    let mut bin = vec![0usize; max_degree + 1];
    for &d in &degree {
        bin[d] += 1;
    }
    let mut start = 0;
    for slot in bin.iter_mut() {
        let count = *slot;
        *slot = start;
        start += count;
    }

    let mut position = vec![0usize; n];
    let mut order = vec![0usize; n];
    for v in 0..n {
        position[v] = bin[degree[v]];
        order[position[v]] = v;
        bin[degree[v]] += 1;
    }
    for d in (1..=max_degree).rev() {
        bin[d] = bin[d - 1];
    }
    bin[0] = 0;

    for i in 0..n {
        let v = order[i];
        for &u in view.neighbors(v) {
            if degree[u] > degree[v] {
                let du = degree[u];
                let pu = position[u];
                let pw = bin[du];
                let w = order[pw];
                if u != w {
                    position[u] = pw;
                    order[pu] = w;
                    position[w] = pu;
                    order[pw] = u;
                }
                bin[du] += 1;
                degree[u] -= 1;
            }
        }
    }

    degree
}

/// Node indices of the k-core, in ascending index order
///
/// Empty when no node survives peeling. `k == 0` keeps every node.
pub fn k_core(view: &GraphView, k: usize) -> Vec<usize> {
    core_numbers(view)
        .into_iter()
        .enumerate()
        .filter(|&(_, core)| core >= k)
        .map(|(v, _)| v)
        .collect()
}
