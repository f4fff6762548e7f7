//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, RoutingService};
use crate::domain::Graph;
use crate::osrm::OsrmClient;
use crate::planner::SearchConfig;
use crate::segments::SegmentComposer;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// The transit network, transfer edges included
    pub graph: Arc<Graph>,

    /// Cached routing-service client
    pub routing: Arc<RoutingService<OsrmClient>>,

    /// Segment builder sharing the routing cache
    pub segments: Arc<SegmentComposer<OsrmClient>>,

    /// Search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(graph: Graph, client: OsrmClient, cache: &CacheConfig, config: SearchConfig) -> Self {
        let routing = Arc::new(RoutingService::new(client, cache));
        let segments = Arc::new(SegmentComposer::new(routing.clone(), cache));

        Self {
            graph: Arc::new(graph),
            routing,
            segments,
            config: Arc::new(config),
        }
    }
}
