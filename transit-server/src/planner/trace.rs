//! Live traversal state and the step snapshots taken from it.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::domain::{Graph, NodeId};

/// A point-in-time copy of the traversal state.
///
/// Every field is an owned copy; nothing is shared with the live state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmStep {
    pub current_node: NodeId,
    /// In the order nodes were marked visited.
    pub visited_nodes: Vec<NodeId>,
    pub distances: BTreeMap<NodeId, f64>,
    pub previous_nodes: BTreeMap<NodeId, Option<NodeId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_snapshot: Option<Vec<NodeId>>,
}

/// Mutable state shared by every traversal.
pub(crate) struct TraversalState {
    pub distances: HashMap<NodeId, f64>,
    pub previous: HashMap<NodeId, Option<NodeId>>,
    visited_order: Vec<NodeId>,
    visited: HashSet<NodeId>,
    pub steps: Vec<AlgorithmStep>,
}

impl TraversalState {
    /// All graph nodes at +infinity except `start`.
    pub fn new(graph: &Graph, start: &NodeId) -> Self {
        let mut distances = HashMap::with_capacity(graph.node_count());
        let mut previous = HashMap::with_capacity(graph.node_count());
        for node in graph.nodes() {
            distances.insert(node.id.clone(), f64::INFINITY);
            previous.insert(node.id.clone(), None);
        }
        distances.insert(start.clone(), 0.0);

        Self {
            distances,
            previous,
            visited_order: Vec::new(),
            visited: HashSet::new(),
            steps: Vec::new(),
        }
    }

    pub fn distance(&self, id: &NodeId) -> f64 {
        self.distances.get(id).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_visited(&self, id: &NodeId) -> bool {
        self.visited.contains(id)
    }

    /// Returns false if `id` was already visited.
    pub fn mark_visited(&mut self, id: &NodeId) -> bool {
        if !self.visited.insert(id.clone()) {
            return false;
        }
        self.visited_order.push(id.clone());
        true
    }

    pub fn visited_count(&self) -> usize {
        self.visited_order.len()
    }

    pub fn update(&mut self, target: &NodeId, distance: f64, via: &NodeId) {
        self.distances.insert(target.clone(), distance);
        self.previous.insert(target.clone(), Some(via.clone()));
    }

    /// Append a deep copy of the current state.
    pub fn record(&mut self, current: &NodeId, queue: Option<Vec<NodeId>>) {
        let step = AlgorithmStep {
            current_node: current.clone(),
            visited_nodes: self.visited_order.clone(),
            distances: self
                .distances
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            previous_nodes: self
                .previous
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            queue_snapshot: queue,
        };
        self.steps.push(step);
    }

    /// Walk predecessors back from `end`.
    ///
    /// Empty when the walk does not arrive at `start`.
    pub fn reconstruct_path(&self, start: &NodeId, end: &NodeId) -> Vec<NodeId> {
        let mut path = vec![end.clone()];
        let mut current = end;

        // Bounded by node count so a corrupted map cannot loop forever.
        while let Some(Some(prev)) = self.previous.get(current) {
            if path.len() > self.previous.len() {
                return Vec::new();
            }
            path.push(prev.clone());
            current = prev;
        }

        if current != start {
            return Vec::new();
        }
        path.reverse();
        path
    }
}
