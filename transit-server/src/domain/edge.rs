//! Directed weighted edges.

use serde::{Deserialize, Serialize};

use super::node::{NodeId, TransportMode};

/// A directed connection between two stations.
///
/// Two-way links are stored as two edges with swapped endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,

    /// Travel time in minutes. Must be non-negative.
    pub weight: f64,

    /// Length in kilometres.
    #[serde(default)]
    pub distance: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corridor: Option<String>,
}

impl Edge {
    /// Create an untagged edge.
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64, distance: f64) -> Self {
        Self {
            source: NodeId::new(source),
            target: NodeId::new(target),
            weight,
            distance,
            transport_mode: None,
            color: None,
            route_number: None,
            corridor: None,
        }
    }

    /// Tag the edge with a transport mode.
    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.transport_mode = Some(mode);
        self
    }

    /// Set the display colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the route number.
    pub fn with_route_number(mut self, route: impl Into<String>) -> Self {
        self.route_number = Some(route.into());
        self
    }

    /// The same edge travelling the other way.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            ..self.clone()
        }
    }

    /// Whether this edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }
}
