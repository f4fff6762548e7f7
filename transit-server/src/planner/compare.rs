//! Side-by-side metrics for two search results.

use serde::Serialize;

use super::result::AlgorithmResult;

/// Differences are `weighted - bfs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetrics {
    pub distance_difference: f64,
    pub path_length_difference: i64,
    pub nodes_explored_difference: i64,
    pub execution_time_difference: f64,
    pub operations_difference: i64,
    pub edges_processed_difference: i64,
    pub memory_difference: i64,
    pub is_path_identical: bool,
    /// Path nodes per explored node, weighted over BFS.
    pub efficiency_ratio: f64,
    /// Operations per millisecond, weighted over BFS.
    pub speed_ratio: f64,
}

fn signed_difference(a: usize, b: usize) -> i64 {
    a as i64 - b as i64
}

/// Zero denominators become 1.
fn guard(value: f64) -> f64 {
    if value == 0.0 { 1.0 } else { value }
}

/// Compare a weighted result with a BFS result. Pure.
pub fn compare(weighted: &AlgorithmResult, bfs: &AlgorithmResult) -> ComparisonMetrics {
    let w = weighted.summary();
    let b = bfs.summary();

    // Equal values, including two infinities, differ by zero.
    let distance_difference = if w.distance == b.distance {
        0.0
    } else {
        w.distance - b.distance
    };

    let w_efficiency = w.path.len() as f64 / guard(w.nodes_explored as f64);
    let b_efficiency = b.path.len() as f64 / guard(b.nodes_explored as f64);

    let w_speed = weighted.operations() as f64 / guard(weighted.execution_time_ms());
    let b_speed = bfs.operations() as f64 / guard(bfs.execution_time_ms());

    ComparisonMetrics {
        distance_difference,
        path_length_difference: signed_difference(w.path.len(), b.path.len()),
        nodes_explored_difference: signed_difference(w.nodes_explored, b.nodes_explored),
        execution_time_difference: weighted.execution_time_ms() - bfs.execution_time_ms(),
        operations_difference: signed_difference(weighted.operations(), bfs.operations()),
        edges_processed_difference: signed_difference(
            weighted.edges_processed(),
            bfs.edges_processed(),
        ),
        memory_difference: signed_difference(weighted.memory_estimate(), bfs.memory_estimate()),
        is_path_identical: w.path == b.path,
        efficiency_ratio: w_efficiency / guard(b_efficiency),
        speed_ratio: w_speed / guard(b_speed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeId;
    use crate::planner::result::{BfsResult, DijkstraResult, RouteCache, SearchSummary, WeightMode};

    fn summary(path: &[&str], distance: f64, explored: usize) -> SearchSummary {
        SearchSummary {
            path: path.iter().map(|s| NodeId::from(*s)).collect(),
            distance,
            steps: Vec::new(),
            nodes_explored: explored,
            time_complexity: "",
            space_complexity: "",
        }
    }

    fn dijkstra(summary: SearchSummary, ops: usize, edges: usize, ms: f64, memory: usize) -> AlgorithmResult {
        AlgorithmResult::Dijkstra(DijkstraResult {
            summary,
            priority_queue_operations: ops,
            edges_processed: edges,
            execution_time_ms: ms,
            memory_estimate: memory,
            weight_mode: WeightMode::Static,
            osrm_calls_count: 0,
            osrm_cache_size: 0,
            route_cache: RouteCache::new(),
        })
    }

    fn bfs(summary: SearchSummary, ops: usize, edges: usize, ms: f64, memory: usize) -> AlgorithmResult {
        AlgorithmResult::Bfs(BfsResult {
            summary,
            queue_operations: ops,
            edges_processed: edges,
            execution_time_ms: ms,
            memory_estimate: memory,
            max_queue_size: 1,
        })
    }

    #[test]
    fn identical_results_have_zero_deltas() {
        let w = dijkstra(summary(&["A", "B", "C"], 5.0, 3), 6, 4, 2.0, 500);
        let b = bfs(summary(&["A", "B", "C"], 5.0, 3), 6, 4, 2.0, 500);

        let m = compare(&w, &b);

        assert!(m.is_path_identical);
        assert_eq!(m.distance_difference, 0.0);
        assert_eq!(m.path_length_difference, 0);
        assert_eq!(m.nodes_explored_difference, 0);
        assert_eq!(m.execution_time_difference, 0.0);
        assert_eq!(m.operations_difference, 0);
        assert_eq!(m.edges_processed_difference, 0);
        assert_eq!(m.memory_difference, 0);
        assert_eq!(m.efficiency_ratio, 1.0);
        assert_eq!(m.speed_ratio, 1.0);
    }

    #[test]
    fn differences_are_weighted_minus_bfs() {
        let w = dijkstra(summary(&["A", "B", "C"], 5.0, 3), 8, 5, 4.0, 700);
        let b = bfs(summary(&["A", "C"], 10.0, 2), 4, 3, 1.0, 400);

        let m = compare(&w, &b);

        assert!(!m.is_path_identical);
        assert_eq!(m.distance_difference, -5.0);
        assert_eq!(m.path_length_difference, 1);
        assert_eq!(m.nodes_explored_difference, 1);
        assert_eq!(m.execution_time_difference, 3.0);
        assert_eq!(m.operations_difference, 4);
        assert_eq!(m.edges_processed_difference, 2);
        assert_eq!(m.memory_difference, 300);
        // (3/3) / (2/2)
        assert_eq!(m.efficiency_ratio, 1.0);
        // (8/4) / (4/1)
        assert_eq!(m.speed_ratio, 0.5);
    }

    #[test]
    fn zero_denominators_are_guarded() {
        let w = dijkstra(summary(&[], f64::INFINITY, 0), 0, 0, 0.0, 0);
        let b = bfs(summary(&[], f64::INFINITY, 0), 0, 0, 0.0, 0);

        let m = compare(&w, &b);

        assert!(m.is_path_identical);
        assert_eq!(m.distance_difference, 0.0);
        assert!(m.efficiency_ratio.is_finite());
        assert!(m.speed_ratio.is_finite());
        assert_eq!(m.efficiency_ratio, 0.0);
    }

    #[test]
    fn same_length_different_nodes_not_identical() {
        let w = dijkstra(summary(&["A", "B", "D"], 5.0, 3), 1, 1, 1.0, 1);
        let b = bfs(summary(&["A", "C", "D"], 5.0, 3), 1, 1, 1.0, 1);

        assert!(!compare(&w, &b).is_path_identical);
    }
}
