//! Transfer edges between nearby stations.
//!
//! Stations served by different modes often sit within a short walk of
//! each other (a metro entrance next to a bus stop). The source data only
//! contains in-mode edges, so transfers are synthesized from coordinates:
//! any two stations close enough and not sharing a mode get a walking
//! edge in both directions.

use crate::domain::{Edge, Graph, Node, TransportMode};

/// Configuration for transfer edge generation.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Maximum straight-line distance between stations (km).
    pub max_distance_km: f64,

    /// Walking speed used to derive transfer time (km/h).
    pub walking_speed_kmh: f64,

    /// Lower bound on any transfer (minutes).
    pub min_transfer_minutes: f64,
}

impl TransferConfig {
    /// Create a new configuration.
    pub fn new(max_distance_km: f64, walking_speed_kmh: f64, min_transfer_minutes: f64) -> Self {
        Self {
            max_distance_km,
            walking_speed_kmh,
            min_transfer_minutes,
        }
    }

    /// Walking time for a distance, never below the minimum transfer.
    pub fn transfer_minutes(&self, distance_km: f64) -> f64 {
        let walk = if self.walking_speed_kmh > 0.0 {
            distance_km / self.walking_speed_kmh * 60.0
        } else {
            0.0
        };
        walk.max(self.min_transfer_minutes)
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_distance_km: 0.25,
            walking_speed_kmh: 4.8,
            min_transfer_minutes: 2.0,
        }
    }
}

/// Build both directed transfer edges for a pair of stations.
fn transfer_pair(a: &Node, b: &Node, config: &TransferConfig) -> [Edge; 2] {
    let distance = a.coordinate().distance_km(&b.coordinate());
    let edge = Edge::new(
        a.id.as_str(),
        b.id.as_str(),
        config.transfer_minutes(distance),
        distance,
    )
    .with_mode(TransportMode::Transfer);
    [edge.reversed(), edge]
}

/// Generate transfer edges for every nearby cross-mode station pair.
///
/// Pairs already joined by an edge in either direction are left alone.
pub fn generate_transfer_edges(graph: &Graph, config: &TransferConfig) -> Vec<Edge> {
    let nodes = graph.nodes();
    let mut edges = Vec::new();

    for (i, a) in nodes.iter().enumerate() {
        for b in nodes.iter().skip(i + 1) {
            if !a.modes_differ(b) {
                continue;
            }
            if a.coordinate().distance_km(&b.coordinate()) > config.max_distance_km {
                continue;
            }
            if graph.connecting_edge(&a.id, &b.id).is_some() {
                continue;
            }
            edges.extend(transfer_pair(a, b, config));
        }
    }

    tracing::debug!(count = edges.len(), "generated transfer edges");
    edges
}

/// A copy of `graph` with transfer edges added.
pub fn with_transfers(graph: &Graph, config: &TransferConfig) -> Graph {
    graph.with_edges(generate_transfer_edges(graph, config))
}
