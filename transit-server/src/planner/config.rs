//! Search configuration for the planners.

use crate::osrm::Profile;

/// Heuristic per-entry byte costs used for the memory estimate.
///
/// These are display figures for comparing algorithms, not measurements
/// of the process heap.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryModel {
    /// Bytes per entry in the distance map.
    pub distance_entry: usize,

    /// Bytes per entry in the previous-node map.
    pub previous_entry: usize,

    /// Bytes per visited node.
    pub visited_entry: usize,

    /// Bytes per recorded trace step.
    pub step: usize,

    /// Bytes per queue push or pop.
    pub queue_operation: usize,

    /// Fixed overhead per routing-service request.
    pub external_call: usize,
}

impl MemoryModel {
    /// Estimate in bytes for the given structure sizes and counters.
    pub fn estimate(
        &self,
        distances: usize,
        previous: usize,
        visited: usize,
        steps: usize,
        queue_operations: usize,
        external_calls: usize,
    ) -> usize {
        distances * self.distance_entry
            + previous * self.previous_entry
            + visited * self.visited_entry
            + steps * self.step
            + queue_operations * self.queue_operation
            + external_calls * self.external_call
    }
}

impl Default for MemoryModel {
    fn default() -> Self {
        Self {
            distance_entry: 8,
            previous_entry: 8,
            visited_entry: 4,
            step: 100,
            queue_operation: 12,
            external_call: 1024,
        }
    }
}

/// Configuration parameters for a search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Cost model for `memory_estimate`.
    pub memory: MemoryModel,

    /// Profile used when resolving edge weights through the routing service.
    pub external_profile: Profile,

    /// Whether steps carry a copy of the queue.
    /// Large graphs produce very large traces with this enabled.
    pub record_queue: bool,
}

impl SearchConfig {
    pub fn with_memory_model(mut self, memory: MemoryModel) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_external_profile(mut self, profile: Profile) -> Self {
        self.external_profile = profile;
        self
    }

    pub fn with_queue_snapshots(mut self, record: bool) -> Self {
        self.record_queue = record;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            memory: MemoryModel::default(),
            external_profile: Profile::Driving,
            record_queue: true,
        }
    }
}
