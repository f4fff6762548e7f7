//! Search results.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::trace::AlgorithmStep;
use crate::domain::NodeId;
use crate::osrm::OsrmRoute;

/// Fields every algorithm reports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    /// Empty when `end` is unreachable.
    pub path: Vec<NodeId>,
    /// Cumulative weight in minutes; +infinity when unreachable.
    pub distance: f64,
    pub steps: Vec<AlgorithmStep>,
    pub nodes_explored: usize,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

impl SearchSummary {
    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges on the path.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Where the weighted search took its edge weights from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightMode {
    Static,
    Osrm,
}

/// Routes resolved during one search, keyed by the edge they weighted.
pub type RouteCache = HashMap<(NodeId, NodeId), Arc<OsrmRoute>>;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DijkstraResult {
    #[serde(flatten)]
    pub summary: SearchSummary,
    pub priority_queue_operations: usize,
    pub edges_processed: usize,
    pub execution_time_ms: f64,
    pub memory_estimate: usize,
    pub weight_mode: WeightMode,
    /// Routing-service requests made by this search (cache hits excluded).
    pub osrm_calls_count: usize,
    /// Number of successfully resolved routes; lower than the call count
    /// when some edges fell back to their static weight.
    pub osrm_cache_size: usize,
    #[serde(skip)]
    pub route_cache: RouteCache,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BfsResult {
    #[serde(flatten)]
    pub summary: SearchSummary,
    pub queue_operations: usize,
    pub edges_processed: usize,
    pub execution_time_ms: f64,
    pub memory_estimate: usize,
    pub max_queue_size: usize,
}

/// Result of either algorithm.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum AlgorithmResult {
    Dijkstra(DijkstraResult),
    Bfs(BfsResult),
}

impl AlgorithmResult {
    pub fn summary(&self) -> &SearchSummary {
        match self {
            Self::Dijkstra(r) => &r.summary,
            Self::Bfs(r) => &r.summary,
        }
    }

    pub fn path(&self) -> &[NodeId] {
        &self.summary().path
    }

    pub fn distance(&self) -> f64 {
        self.summary().distance
    }

    pub fn steps(&self) -> &[AlgorithmStep] {
        &self.summary().steps
    }

    pub fn nodes_explored(&self) -> usize {
        self.summary().nodes_explored
    }

    /// Priority-queue operations for Dijkstra, queue operations for BFS.
    pub fn operations(&self) -> usize {
        match self {
            Self::Dijkstra(r) => r.priority_queue_operations,
            Self::Bfs(r) => r.queue_operations,
        }
    }

    pub fn edges_processed(&self) -> usize {
        match self {
            Self::Dijkstra(r) => r.edges_processed,
            Self::Bfs(r) => r.edges_processed,
        }
    }

    pub fn execution_time_ms(&self) -> f64 {
        match self {
            Self::Dijkstra(r) => r.execution_time_ms,
            Self::Bfs(r) => r.execution_time_ms,
        }
    }

    pub fn memory_estimate(&self) -> usize {
        match self {
            Self::Dijkstra(r) => r.memory_estimate,
            Self::Bfs(r) => r.memory_estimate,
        }
    }

    pub fn as_dijkstra(&self) -> Option<&DijkstraResult> {
        match self {
            Self::Dijkstra(r) => Some(r),
            Self::Bfs(_) => None,
        }
    }

    pub fn as_bfs(&self) -> Option<&BfsResult> {
        match self {
            Self::Bfs(r) => Some(r),
            Self::Dijkstra(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(path: &[&str], distance: f64) -> SearchSummary {
        SearchSummary {
            path: path.iter().map(|s| NodeId::from(*s)).collect(),
            distance,
            steps: Vec::new(),
            nodes_explored: path.len(),
            time_complexity: "O(V + E)",
            space_complexity: "O(V)",
        }
    }

    #[test]
    fn accessors_dispatch_on_variant() {
        let bfs = AlgorithmResult::Bfs(BfsResult {
            summary: summary(&["A", "C"], 10.0),
            queue_operations: 5,
            edges_processed: 3,
            execution_time_ms: 0.5,
            memory_estimate: 300,
            max_queue_size: 2,
        });

        assert_eq!(bfs.operations(), 5);
        assert_eq!(bfs.edges_processed(), 3);
        assert_eq!(bfs.memory_estimate(), 300);
        assert_eq!(bfs.summary().hop_count(), 1);
        assert!(bfs.as_bfs().is_some());
        assert!(bfs.as_dijkstra().is_none());
    }

    #[test]
    fn serializes_with_algorithm_tag_and_flat_summary() {
        let result = AlgorithmResult::Dijkstra(DijkstraResult {
            summary: summary(&["A", "B"], 2.0),
            priority_queue_operations: 4,
            edges_processed: 2,
            execution_time_ms: 0.1,
            memory_estimate: 128,
            weight_mode: WeightMode::Osrm,
            osrm_calls_count: 1,
            osrm_cache_size: 1,
            route_cache: RouteCache::new(),
        });

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["algorithm"], "dijkstra");
        assert_eq!(json["path"], serde_json::json!(["A", "B"]));
        assert_eq!(json["weightMode"], "osrm");
        assert_eq!(json["priorityQueueOperations"], 4);
        assert!(json.get("routeCache").is_none());
    }

    #[test]
    fn unreachable_summary() {
        let s = summary(&[], f64::INFINITY);
        assert!(!s.is_reachable());
        assert_eq!(s.hop_count(), 0);
    }
}
