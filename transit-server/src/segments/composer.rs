//! Turns a node path into segments, straight or along roads.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use super::types::{RouteInfo, RouteMetrics, RouteSegment, RoutingMode, SegmentSource};
use crate::cache::{CacheConfig, RoutingService};
use crate::domain::{Edge, Graph, Node, NodeId, TransportMode};
use crate::osrm::{PathLeg, Profile, RouteProvider};

type SegmentKey = (RoutingMode, Vec<NodeId>);

/// Routing profile for travelling an edge of `mode`.
pub fn profile_for(mode: Option<TransportMode>) -> Profile {
    match mode {
        Some(m) if m.is_pedestrian() => Profile::Walking,
        Some(TransportMode::Bike) => Profile::Cycling,
        _ => Profile::Driving,
    }
}

/// A path pair whose nodes exist and are joined by an edge.
struct Hop<'a> {
    from: &'a Node,
    to: &'a Node,
    edge: &'a Edge,
}

impl Hop<'_> {
    fn route_info(&self) -> RouteInfo {
        RouteInfo {
            name: self
                .edge
                .corridor
                .clone()
                .unwrap_or_else(|| format!("{} - {}", self.from.name, self.to.name)),
            color: self.edge.color.clone(),
            route_number: self.edge.route_number.clone(),
            transport_mode: self.edge.transport_mode,
        }
    }
}

/// Builds and caches route segments for one graph.
///
/// Segments are cached by mode and path only, so a composer must not be
/// shared between different graphs.
pub struct SegmentComposer<P> {
    routing: Arc<RoutingService<P>>,
    cache: MokaCache<SegmentKey, Arc<Vec<RouteSegment>>>,
}

impl<P: RouteProvider> SegmentComposer<P> {
    pub fn new(routing: Arc<RoutingService<P>>, config: &CacheConfig) -> Self {
        Self {
            routing,
            cache: config.build(),
        }
    }

    /// Segments for each consecutive pair of `path`.
    ///
    /// Pairs with a missing node or no connecting edge are skipped in both
    /// modes. Realistic mode falls back to straight lines for the whole
    /// path when no pair could be routed. Concurrent calls for one key
    /// build the segments once.
    pub async fn get_route_segments(
        &self,
        path: &[NodeId],
        graph: &Graph,
        mode: RoutingMode,
    ) -> Arc<Vec<RouteSegment>> {
        if path.len() < 2 {
            return Arc::new(Vec::new());
        }

        let key = (mode, path.to_vec());
        self.cache
            .get_with(key, async {
                let hops = resolve_hops(path, graph);
                let segments = match mode {
                    RoutingMode::StraightLine => straight_segments(&hops),
                    RoutingMode::OsrmRealistic => match self.realistic_segments(&hops).await {
                        Some(segments) => segments,
                        None => {
                            warn!(stops = path.len(), "realistic routing unavailable, using straight lines");
                            straight_segments(&hops)
                        }
                    },
                };
                Arc::new(segments)
            })
            .await
    }

    /// Totals for the segments of `path`, computing them if needed.
    pub async fn get_route_metrics(
        &self,
        path: &[NodeId],
        graph: &Graph,
        mode: RoutingMode,
    ) -> RouteMetrics {
        let segments = self.get_route_segments(path, graph, mode).await;
        RouteMetrics::from_segments(&segments, mode)
    }

    async fn realistic_segments(&self, hops: &[Hop<'_>]) -> Option<Vec<RouteSegment>> {
        let pairs: Vec<_> = hops
            .iter()
            .map(|h| (h.from.coordinate(), h.to.coordinate(), profile_for(h.edge.transport_mode)))
            .collect();

        let realistic = self.routing.route_pairs(&pairs).await?;

        Some(
            hops.iter()
                .zip(realistic.legs)
                .map(|(hop, leg)| realistic_segment(hop, leg))
                .collect(),
        )
    }

    pub async fn cached_entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }

    pub fn routing(&self) -> &RoutingService<P> {
        &self.routing
    }
}

fn resolve_hops<'a>(path: &[NodeId], graph: &'a Graph) -> Vec<Hop<'a>> {
    path.windows(2)
        .filter_map(|pair| {
            let (Some(from), Some(to)) = (graph.node(&pair[0]), graph.node(&pair[1])) else {
                debug!(from = %pair[0], to = %pair[1], "skipping pair with unknown node");
                return None;
            };
            let Some(edge) = graph.connecting_edge(&pair[0], &pair[1]) else {
                debug!(from = %pair[0], to = %pair[1], "no edge between path nodes");
                return None;
            };
            Some(Hop { from, to, edge })
        })
        .collect()
}

fn straight_segments(hops: &[Hop<'_>]) -> Vec<RouteSegment> {
    hops.iter()
        .map(|hop| RouteSegment {
            from: hop.from.id.clone(),
            to: hop.to.id.clone(),
            coordinates: vec![hop.from.coordinate(), hop.to.coordinate()],
            transport_mode: hop.edge.transport_mode,
            route_info: hop.route_info(),
            duration_minutes: hop.edge.weight,
            distance_km: hop.edge.distance,
            instructions: vec![format!("Travel from {} to {}", hop.from.name, hop.to.name)],
            source: SegmentSource::StraightLine,
        })
        .collect()
}

fn realistic_segment(hop: &Hop<'_>, leg: PathLeg) -> RouteSegment {
    RouteSegment {
        from: hop.from.id.clone(),
        to: hop.to.id.clone(),
        coordinates: leg.geometry,
        transport_mode: hop.edge.transport_mode,
        route_info: hop.route_info(),
        duration_minutes: leg.duration_seconds / 60.0,
        distance_km: leg.distance_meters / 1000.0,
        instructions: leg.instructions,
        source: if leg.fallback {
            SegmentSource::Fallback
        } else {
            SegmentSource::Osrm
        },
    }
}
