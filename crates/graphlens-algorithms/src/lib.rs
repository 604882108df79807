pub mod common;
pub mod community;
pub mod centrality;
pub mod mixing;
pub mod pathfinding;
pub mod topology;

pub use common::GraphView;
pub use community::{weakly_connected_components, WccResult, strongly_connected_components, SccResult};
pub use centrality::{
    betweenness_centrality, closeness_centrality, degree_centrality, eigenvector_centrality,
    EigenvectorConfig,
};
pub use mixing::{degree_assortativity, DegreeMode};
pub use pathfinding::{bfs_distances, Direction};
pub use topology::{average_clustering, core_numbers, count_triangles, k_core, local_clustering, node_triangles};
