//! Data transfer objects for the web API.

use serde::{Deserialize, Serialize};

use crate::domain::{Node, NodeId};
use crate::planner::{AlgorithmResult, ComparisonMetrics};
use crate::segments::{RouteMetrics, RouteSegment, RoutingMode};

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Dijkstra,
    Bfs,
    /// Dijkstra with weights from the routing service.
    DijkstraOsrm,
}

/// Request body for `POST /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub algorithm: Algorithm,
    pub start: NodeId,
    pub end: NodeId,
}

/// Request body for `POST /api/compare`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub start: NodeId,
    pub end: NodeId,
    #[serde(default, alias = "use_osrm_weights")]
    pub use_osrm_weights: bool,
}

/// Response for `POST /api/compare`.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub dijkstra: AlgorithmResult,
    pub bfs: AlgorithmResult,
    pub metrics: ComparisonMetrics,
}

/// Request body for `POST /api/segments`.
#[derive(Debug, Deserialize)]
pub struct SegmentsRequest {
    pub path: Vec<NodeId>,
    #[serde(default)]
    pub mode: RoutingMode,
}

/// Response for `POST /api/segments`.
#[derive(Debug, Serialize)]
pub struct SegmentsResponse {
    pub segments: Vec<RouteSegment>,
    pub metrics: RouteMetrics,
}

/// Response for `GET /api/stations`.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<Node>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
