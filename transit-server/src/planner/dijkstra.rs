//! Weighted shortest-path search.
//!
//! Lazy-deletion Dijkstra: relaxation pushes a fresh queue entry instead of
//! decreasing a key, and entries for already-finalised nodes are discarded
//! when popped. The search stops as soon as the destination is finalised.
//!
//! Edge weights must be non-negative. Negative weights are not detected and
//! give unspecified results.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Instant;

use tracing::{debug, trace};

use super::config::{MemoryModel, SearchConfig};
use super::result::{AlgorithmResult, DijkstraResult, RouteCache, SearchSummary, WeightMode};
use super::trace::TraversalState;
use super::{SearchError, check_endpoints};
use crate::domain::{Edge, Graph, NodeId};

pub(crate) const TIME_COMPLEXITY: &str = "O((V + E) log V)";
pub(crate) const SPACE_COMPLEXITY: &str = "O(V)";

#[derive(Debug, Clone, Copy, PartialEq)]
struct FloatOrd(f64);

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueueEntry {
    cost: FloatOrd,
    sequence: u64,
    node: NodeId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the cheapest entry, earliest push first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How a finished run obtained its weights.
pub(crate) struct WeightSource {
    pub mode: WeightMode,
    pub external_calls: usize,
    pub routes: RouteCache,
}

impl WeightSource {
    pub fn static_weights() -> Self {
        Self {
            mode: WeightMode::Static,
            external_calls: 0,
            routes: RouteCache::new(),
        }
    }
}

/// One Dijkstra traversal, independent of where weights come from.
pub(crate) struct DijkstraRun {
    state: TraversalState,
    heap: BinaryHeap<QueueEntry>,
    sequence: u64,
    queue_operations: usize,
    edges_processed: usize,
    record_queue: bool,
    started: Instant,
}

impl DijkstraRun {
    pub fn new(graph: &Graph, start: &NodeId, record_queue: bool) -> Self {
        let mut run = Self {
            state: TraversalState::new(graph, start),
            heap: BinaryHeap::new(),
            sequence: 0,
            queue_operations: 0,
            edges_processed: 0,
            record_queue,
            started: Instant::now(),
        };
        run.push(start.clone(), 0.0);
        run
    }

    fn push(&mut self, node: NodeId, cost: f64) {
        self.heap.push(QueueEntry {
            cost: FloatOrd(cost),
            sequence: self.sequence,
            node,
        });
        self.sequence += 1;
        self.queue_operations += 1;
    }

    /// Unfinalised nodes on the frontier, cheapest first.
    ///
    /// A node pushed more than once is listed once, at its cheapest entry.
    fn queue_snapshot(&self) -> Vec<NodeId> {
        let mut entries: Vec<&QueueEntry> = self
            .heap
            .iter()
            .filter(|e| !self.state.is_visited(&e.node))
            .collect();
        entries.sort_by(|a, b| b.cmp(a));

        let mut seen = HashSet::new();
        entries
            .into_iter()
            .filter(|e| seen.insert(&e.node))
            .map(|e| e.node.clone())
            .collect()
    }

    /// Pop until an unfinalised node appears, finalise it and record a step.
    pub fn next_node(&mut self) -> Option<NodeId> {
        while let Some(entry) = self.heap.pop() {
            self.queue_operations += 1;

            if !self.state.mark_visited(&entry.node) {
                trace!(node = %entry.node, "discarding stale queue entry");
                continue;
            }

            let queue = self.record_queue.then(|| self.queue_snapshot());
            self.state.record(&entry.node, queue);
            return Some(entry.node);
        }
        None
    }

    /// Whether `edge` leads somewhere worth relaxing. Counts the edge.
    pub fn should_relax(&mut self, graph: &Graph, edge: &Edge) -> bool {
        self.edges_processed += 1;

        if self.state.is_visited(&edge.target) {
            return false;
        }
        if !graph.contains(&edge.target) {
            debug!(source = %edge.source, target = %edge.target, "skipping edge to unknown node");
            return false;
        }
        true
    }

    /// Relax `from -> to` with `weight`, pushing a new entry on improvement.
    pub fn relax(&mut self, from: &NodeId, to: &NodeId, weight: f64) {
        let candidate = self.state.distance(from) + weight;
        if candidate < self.state.distance(to) {
            self.state.update(to, candidate, from);
            self.push(to.clone(), candidate);
        }
    }

    pub fn finish(
        self,
        start: &NodeId,
        end: &NodeId,
        memory: &MemoryModel,
        weights: WeightSource,
    ) -> DijkstraResult {
        let (path, distance) = if self.state.is_visited(end) {
            (self.state.reconstruct_path(start, end), self.state.distance(end))
        } else {
            (Vec::new(), f64::INFINITY)
        };

        let memory_estimate = memory.estimate(
            self.state.distances.len(),
            self.state.previous.len(),
            self.state.visited_count(),
            self.state.steps.len(),
            self.queue_operations,
            weights.external_calls,
        );
        let execution_time_ms = self.started.elapsed().as_secs_f64() * 1000.0;

        debug!(
            %start,
            %end,
            distance,
            explored = self.state.visited_count(),
            queue_operations = self.queue_operations,
            mode = ?weights.mode,
            "dijkstra finished"
        );

        DijkstraResult {
            summary: SearchSummary {
                path,
                distance,
                nodes_explored: self.state.visited_count(),
                steps: self.state.steps,
                time_complexity: TIME_COMPLEXITY,
                space_complexity: SPACE_COMPLEXITY,
            },
            priority_queue_operations: self.queue_operations,
            edges_processed: self.edges_processed,
            execution_time_ms,
            memory_estimate,
            weight_mode: weights.mode,
            osrm_calls_count: weights.external_calls,
            osrm_cache_size: weights.routes.len(),
            route_cache: weights.routes,
        }
    }
}

/// Shortest path by static edge weight with the default configuration.
pub fn search(graph: &Graph, start: &NodeId, end: &NodeId) -> Result<AlgorithmResult, SearchError> {
    search_with(graph, start, end, &SearchConfig::default())
}

/// Shortest path by static edge weight.
pub fn search_with(
    graph: &Graph,
    start: &NodeId,
    end: &NodeId,
    config: &SearchConfig,
) -> Result<AlgorithmResult, SearchError> {
    check_endpoints(graph, start, end)?;

    let mut run = DijkstraRun::new(graph, start, config.record_queue);

    while let Some(current) = run.next_node() {
        if &current == end {
            break;
        }
        for edge in graph.outgoing(&current) {
            if run.should_relax(graph, edge) {
                run.relax(&current, &edge.target, edge.weight);
            }
        }
    }

    Ok(AlgorithmResult::Dijkstra(run.finish(
        start,
        end,
        &config.memory,
        WeightSource::static_weights(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(node: &str, cost: f64, sequence: u64) -> QueueEntry {
        QueueEntry {
            cost: FloatOrd(cost),
            sequence,
            node: NodeId::from(node),
        }
    }

    #[test]
    fn heap_pops_cheapest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(entry("A", 5.0, 0));
        heap.push(entry("B", 1.0, 1));
        heap.push(entry("C", 3.0, 2));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|e| e.node).collect();
        assert_eq!(order, vec![NodeId::from("B"), NodeId::from("C"), NodeId::from("A")]);
    }

    #[test]
    fn equal_costs_pop_in_push_order() {
        let mut heap = BinaryHeap::new();
        heap.push(entry("X", 2.0, 0));
        heap.push(entry("Y", 2.0, 1));
        heap.push(entry("Z", 2.0, 2));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|e| e.node).collect();
        assert_eq!(order, vec![NodeId::from("X"), NodeId::from("Y"), NodeId::from("Z")]);
    }

    #[test]
    fn infinity_sorts_last() {
        let mut heap = BinaryHeap::new();
        heap.push(entry("far", f64::INFINITY, 0));
        heap.push(entry("near", 1e9, 1));

        assert_eq!(heap.pop().map(|e| e.node), Some(NodeId::from("near")));
    }
}
