//! Breadth-first search.
//!
//! Finds the path with the fewest edges. Nodes are marked visited when
//! discovered, so each is enqueued at most once. The reported distance is
//! the sum of edge weights along the discovery path, kept for display next
//! to the weighted search; it is neither a hop count nor minimal.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::debug;

use super::config::SearchConfig;
use super::result::{AlgorithmResult, BfsResult, SearchSummary};
use super::trace::TraversalState;
use super::{SearchError, check_endpoints};
use crate::domain::{Graph, NodeId};

const TIME_COMPLEXITY: &str = "O(V + E)";
const SPACE_COMPLEXITY: &str = "O(V)";

/// Fewest-edge path with the default configuration.
pub fn search(graph: &Graph, start: &NodeId, end: &NodeId) -> Result<AlgorithmResult, SearchError> {
    search_with(graph, start, end, &SearchConfig::default())
}

/// Fewest-edge path.
pub fn search_with(
    graph: &Graph,
    start: &NodeId,
    end: &NodeId,
    config: &SearchConfig,
) -> Result<AlgorithmResult, SearchError> {
    check_endpoints(graph, start, end)?;

    let started = Instant::now();
    let mut state = TraversalState::new(graph, start);
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    let mut queue_operations = 0;
    let mut edges_processed = 0;
    let mut found = false;

    state.mark_visited(start);
    queue.push_back(start.clone());
    queue_operations += 1;
    let mut max_queue_size = queue.len();

    while let Some(current) = queue.pop_front() {
        queue_operations += 1;

        let snapshot = config.record_queue.then(|| queue.iter().cloned().collect());
        state.record(&current, snapshot);

        if &current == end {
            found = true;
            break;
        }

        for edge in graph.outgoing(&current) {
            edges_processed += 1;

            if state.is_visited(&edge.target) {
                continue;
            }
            if !graph.contains(&edge.target) {
                debug!(source = %edge.source, target = %edge.target, "skipping edge to unknown node");
                continue;
            }

            state.mark_visited(&edge.target);
            let distance = state.distance(&current) + edge.weight;
            state.update(&edge.target, distance, &current);

            queue.push_back(edge.target.clone());
            queue_operations += 1;
            max_queue_size = max_queue_size.max(queue.len());
        }
    }

    let (path, distance) = if found {
        (state.reconstruct_path(start, end), state.distance(end))
    } else {
        (Vec::new(), f64::INFINITY)
    };

    let nodes_explored = state.steps.len();
    let memory_estimate = config.memory.estimate(
        state.distances.len(),
        state.previous.len(),
        state.visited_count(),
        state.steps.len(),
        queue_operations,
        0,
    );

    debug!(
        %start,
        %end,
        hops = path.len().saturating_sub(1),
        explored = nodes_explored,
        queue_operations,
        "bfs finished"
    );

    Ok(AlgorithmResult::Bfs(BfsResult {
        summary: SearchSummary {
            path,
            distance,
            steps: state.steps,
            nodes_explored,
            time_complexity: TIME_COMPLEXITY,
            space_complexity: SPACE_COMPLEXITY,
        },
        queue_operations,
        edges_processed,
        execution_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        memory_estimate,
        max_queue_size,
    }))
}
