//! Station identifiers, transport modes and nodes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::geo::Coordinate;

/// Unique identifier of a station node.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create an identifier from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Transport mode tag carried by nodes and edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Bus,
    Brt,
    Metro,
    Train,
    Tram,
    Ferry,
    Bike,
    Walk,
    Transfer,
    #[serde(other)]
    Other,
}

impl TransportMode {
    /// Lowercase tag as used in serialized data.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Bus => "bus",
            TransportMode::Brt => "brt",
            TransportMode::Metro => "metro",
            TransportMode::Train => "train",
            TransportMode::Tram => "tram",
            TransportMode::Ferry => "ferry",
            TransportMode::Bike => "bike",
            TransportMode::Walk => "walk",
            TransportMode::Transfer => "transfer",
            TransportMode::Other => "other",
        }
    }

    /// Whether travel in this mode happens on foot.
    pub fn is_pedestrian(&self) -> bool {
        matches!(self, TransportMode::Walk | TransportMode::Transfer)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station in the transit graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Modes serving this station. Empty when unknown.
    #[serde(default)]
    pub transport_modes: Vec<TransportMode>,

    /// Any other descriptive attributes (address, operator, ...).
    #[serde(flatten, default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Node {
    /// Create a node with no mode tags or attributes.
    pub fn new(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: NodeId::new(id),
            name: name.into(),
            latitude,
            longitude,
            transport_modes: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add a mode tag.
    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        if !self.transport_modes.contains(&mode) {
            self.transport_modes.push(mode);
        }
        self
    }

    /// The node's position.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Whether two nodes share no mode tag. Untagged nodes never differ.
    pub fn modes_differ(&self, other: &Node) -> bool {
        if self.transport_modes.is_empty() || other.transport_modes.is_empty() {
            return false;
        }
        !self
            .transport_modes
            .iter()
            .any(|m| other.transport_modes.contains(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display_and_debug() {
        let id = NodeId::new("BRT-01");
        assert_eq!(id.to_string(), "BRT-01");
        assert_eq!(format!("{:?}", id), "NodeId(BRT-01)");
    }

    #[test]
    fn mode_roundtrip_names() {
        let json = serde_json::to_string(&TransportMode::Metro).unwrap();
        assert_eq!(json, "\"metro\"");
        let mode: TransportMode = serde_json::from_str("\"hovercraft\"").unwrap();
        assert_eq!(mode, TransportMode::Other);
    }

    #[test]
    fn deserialize_node_with_attributes() {
        let json = r#"{
            "id": "M1",
            "name": "Central",
            "latitude": -6.2,
            "longitude": 106.8,
            "transportModes": ["metro"],
            "address": "Jl. Sudirman"
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.id.as_str(), "M1");
        assert_eq!(node.transport_modes, vec![TransportMode::Metro]);
        assert_eq!(
            node.attributes.get("address"),
            Some(&serde_json::Value::String("Jl. Sudirman".into()))
        );
    }

    #[test]
    fn modes_differ() {
        let bus = Node::new("a", "A", 0.0, 0.0).with_mode(TransportMode::Bus);
        let metro = Node::new("b", "B", 0.0, 0.0).with_mode(TransportMode::Metro);
        let both = Node::new("c", "C", 0.0, 0.0)
            .with_mode(TransportMode::Bus)
            .with_mode(TransportMode::Metro);
        let untagged = Node::new("d", "D", 0.0, 0.0);

        assert!(bus.modes_differ(&metro));
        assert!(!bus.modes_differ(&both));
        assert!(!bus.modes_differ(&untagged));
    }

    #[test]
    fn with_mode_deduplicates() {
        let node = Node::new("a", "A", 0.0, 0.0)
            .with_mode(TransportMode::Bus)
            .with_mode(TransportMode::Bus);
        assert_eq!(node.transport_modes.len(), 1);
    }
}
