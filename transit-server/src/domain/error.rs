//! Domain error types.
//!
//! These errors cover loading and validating graph data. Missing nodes
//! referenced by edges are not errors; they are skipped during traversal.

use std::path::PathBuf;

/// Errors raised while loading a graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Reading the graph file failed
    #[error("failed to read graph file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The graph JSON is malformed
    #[error("invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two nodes share one identifier
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),
}
