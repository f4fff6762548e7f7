//! The transit graph.
//!
//! Nodes and edges are kept in their input order. Two indexes are built
//! once at construction: node id to position, and node id to outgoing
//! edges (in edge order, so parallel edges are all visible to traversals).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::error::GraphError;
use super::node::{Node, NodeId, TransportMode};

/// Serialized form of a graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Immutable station graph shared by all algorithms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GraphData", into = "GraphData")]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<NodeId, usize>,
    outgoing: HashMap<NodeId, Vec<usize>>,
}

impl Graph {
    /// Build a graph, rejecting duplicate node ids.
    ///
    /// Edges referencing unknown nodes are kept; traversals skip them.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(GraphError::DuplicateNode(node.id.to_string()));
            }
        }

        let mut outgoing: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for (i, edge) in edges.iter().enumerate() {
            outgoing.entry(edge.source.clone()).or_default().push(i);
        }

        Ok(Self {
            nodes,
            edges,
            index,
            outgoing,
        })
    }

    /// Parse a graph from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let data: GraphData = serde_json::from_str(json)?;
        Self::try_from(data)
    }

    /// Load a graph from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// All nodes in input order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in input order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).and_then(|&i| self.nodes.get(i))
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Edges leaving `id`, in input order.
    pub fn outgoing<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a Edge> + use<'a> {
        self.outgoing
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.edges.get(i))
    }

    /// Find an edge joining `a` and `b`, preferring the `a -> b` direction.
    pub fn connecting_edge(&self, a: &NodeId, b: &NodeId) -> Option<&Edge> {
        self.outgoing(a)
            .find(|e| &e.target == b)
            .or_else(|| self.outgoing(b).find(|e| &e.target == a))
    }

    /// A new graph with `extra` edges appended.
    pub fn with_edges(&self, extra: impl IntoIterator<Item = Edge>) -> Self {
        let mut edges = self.edges.clone();
        edges.extend(extra);

        let mut outgoing: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for (i, edge) in edges.iter().enumerate() {
            outgoing.entry(edge.source.clone()).or_default().push(i);
        }

        Self {
            nodes: self.nodes.clone(),
            edges,
            index: self.index.clone(),
            outgoing,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl TryFrom<GraphData> for Graph {
    type Error = GraphError;

    fn try_from(data: GraphData) -> Result<Self, Self::Error> {
        Graph::new(data.nodes, data.edges)
    }
}

impl From<Graph> for GraphData {
    fn from(graph: Graph) -> Self {
        GraphData {
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}

/// Builder for graphs with synthesized edge weights.
///
/// `connect` derives distance from station coordinates and weight from a
/// nominal speed, adding both directions.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node.
    pub fn node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Add an explicit directed edge.
    pub fn edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Add a two-way edge between `a` and `b` travelling at `speed_kmh`.
    ///
    /// Ignored when either id is unknown or the speed is not positive.
    pub fn connect(mut self, a: &str, b: &str, mode: TransportMode, speed_kmh: f64) -> Self {
        if speed_kmh <= 0.0 {
            return self;
        }
        let find = |id: &str| self.nodes.iter().find(|n| n.id.as_str() == id);
        let (Some(from), Some(to)) = (find(a), find(b)) else {
            return self;
        };

        let distance = from.coordinate().distance_km(&to.coordinate());
        let weight = distance / speed_kmh * 60.0;
        let edge = Edge::new(a, b, weight, distance).with_mode(mode);

        self.edges.push(edge.reversed());
        self.edges.push(edge);
        self
    }

    /// Build the graph.
    pub fn build(self) -> Result<Graph, GraphError> {
        Graph::new(self.nodes, self.edges)
    }
}
