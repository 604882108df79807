//! Pathfinding algorithms
//!
//! Unweighted breadth-first distances over the CSR view.

use super::common::GraphView;
use std::collections::VecDeque;

/// Which adjacency a traversal follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow edges source -> target
    Outgoing,
    /// Follow edges target -> source
    Incoming,
}

/// Hop distance from `source` to every node, `None` where unreachable
pub fn bfs_distances(view: &GraphView, source: usize, direction: Direction) -> Vec<Option<usize>> {
    let mut dist = vec![None; view.node_count];
    if source >= view.node_count {
        return dist;
    }

    let mut queue = VecDeque::new();
    dist[source] = Some(0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next_dist = dist[current].map(|d| d + 1);
        let next_nodes = match direction {
            Direction::Outgoing => view.successors(current),
            Direction::Incoming => view.predecessors(current),
        };
        for &next in next_nodes {
            if dist[next].is_none() {
                dist[next] = next_dist;
                queue.push_back(next);
            }
        }
    }

    dist
}
