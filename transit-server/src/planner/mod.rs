//! Shortest-path search over the transit graph.
//!
//! Two algorithms answer "how do I get from this station to that one":
//! Dijkstra minimises total travel time, BFS minimises the number of
//! edges. Both record a snapshot of their state at every visited node so a
//! client can replay the traversal step by step.
//!
//! The weighted search also comes in an async flavour that asks the
//! routing service for realistic edge weights.

pub mod bfs;
mod compare;
mod config;
pub mod dijkstra;
mod osrm_dijkstra;
mod result;
mod trace;


pub use compare::{ComparisonMetrics, compare};
pub use config::{MemoryModel, SearchConfig};
pub use osrm_dijkstra::{EdgeWeightResolver, search_async};
pub use result::{
    AlgorithmResult, BfsResult, DijkstraResult, RouteCache, SearchSummary, WeightMode,
};
pub use trace::AlgorithmStep;

use crate::domain::{Graph, NodeId};

/// Errors that reject a query before any traversal starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Start or end is not a node of the graph.
    #[error("unknown station: {0}")]
    UnknownNode(NodeId),
}

fn check_endpoints(graph: &Graph, start: &NodeId, end: &NodeId) -> Result<(), SearchError> {
    for id in [start, end] {
        if !graph.contains(id) {
            return Err(SearchError::UnknownNode(id.clone()));
        }
    }
    Ok(())
}
