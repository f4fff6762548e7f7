//! Domain types for the transit network.
//!
//! The graph is immutable input to every algorithm: stations (nodes),
//! directed weighted edges and the great-circle distance helper used to
//! synthesize weights.

mod edge;
mod error;
mod geo;
mod graph;
mod node;

pub use edge::Edge;
pub use error::GraphError;
pub use geo::{Coordinate, haversine_km};
pub use graph::{Graph, GraphBuilder, GraphData};
pub use node::{Node, NodeId, TransportMode};
