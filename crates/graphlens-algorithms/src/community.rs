//! Connected component algorithms
//!
//! Weakly connected components via union-find, strongly connected components
//! via an iterative Tarjan traversal.

use super::common::GraphView;

/// Result of WCC algorithm
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WccResult {
    /// Node indices per component, ordered by each component's smallest index
    pub components: Vec<Vec<usize>>,
    /// Component position (into `components`) for each node index
    pub node_component: Vec<usize>,
}

impl WccResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Size of the largest component, 0 for an empty graph
    pub fn largest_size(&self) -> usize {
        self.components.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Result of SCC algorithm
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SccResult {
    /// Node indices per component, in the order Tarjan completes them
    pub components: Vec<Vec<usize>>,
    /// Component position (into `components`) for each node index
    pub node_component: Vec<usize>,
}

impl SccResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

/// Union-Find data structure
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

/// Weakly Connected Components (WCC)
///
/// Finds all disjoint subgraphs in the graph.
/// Ignores edge direction.
pub fn weakly_connected_components(view: &GraphView) -> WccResult {
    let n = view.node_count;
    let mut uf = UnionFind::new(n);

    for (u, v) in view.edges() {
        uf.union(u, v);
    }

    // Number components in order of first appearance so the output is stable
    let mut root_to_component = vec![usize::MAX; n];
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut node_component = vec![0; n];

    for i in 0..n {
        let root = uf.find(i);
        if root_to_component[root] == usize::MAX {
            root_to_component[root] = components.len();
            components.push(Vec::new());
        }
        let c = root_to_component[root];
        components[c].push(i);
        node_component[i] = c;
    }

    WccResult {
        components,
        node_component,
    }
}

/// Strongly Connected Components (SCC)
///
/// Tarjan's algorithm with an explicit call stack, so deep chains do not
/// overflow the thread stack.
pub fn strongly_connected_components(view: &GraphView) -> SccResult {
    let n = view.node_count;
    const UNVISITED: usize = usize::MAX;

    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut next_index = 0;

    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut node_component = vec![0; n];

    // (node, position in its successor list)
    let mut call_stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..n {
        if index[start] != UNVISITED {
            continue;
        }
        call_stack.push((start, 0));
        index[start] = next_index;
        lowlink[start] = next_index;
        next_index += 1;
        stack.push(start);
        on_stack[start] = true;

        while let Some(frame) = call_stack.last_mut() {
            let v = frame.0;
            let succ = view.successors(v);
            if frame.1 < succ.len() {
                let w = succ[frame.1];
                frame.1 += 1;
                if index[w] == UNVISITED {
                    index[w] = next_index;
                    lowlink[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    call_stack.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
                continue;
            }

            call_stack.pop();
            if let Some(&(parent, _)) = call_stack.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }

            if lowlink[v] == index[v] {
                let c = components.len();
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    node_component[w] = c;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                components.push(component);
            }
        }
    }

    SccResult {
        components,
        node_component,
    }
}
