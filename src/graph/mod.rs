//! Core graph model
//!
//! This module implements the directed knowledge-graph model with:
//! - Nodes identified by unique strings, carrying flat attributes
//! - Directed edges (self-loops allowed, no parallel edges)
//! - Immutable storage with a builder that enforces the invariants

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{Graph, GraphBuilder, GraphError, GraphResult};
pub use types::NodeId;
