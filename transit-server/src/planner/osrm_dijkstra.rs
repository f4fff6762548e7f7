//! Dijkstra with edge weights from the routing service.
//!
//! Same traversal as the static search. Each candidate edge's weight is
//! awaited before it is compared, so the queue and distance maps are only
//! touched by one relaxation at a time.
//!
//! Two caches are involved: the `RoutingService` keeps raw routes by
//! coordinates across searches, while the resolver here keeps minute
//! weights by edge pair for a single search only.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::config::SearchConfig;
use super::dijkstra::{DijkstraRun, WeightSource};
use super::result::{AlgorithmResult, RouteCache, WeightMode};
use super::{SearchError, check_endpoints};
use crate::cache::RoutingService;
use crate::domain::{Edge, Graph, NodeId};
use crate::osrm::{Profile, RouteProvider};

/// Resolves edge weights for one search.
pub struct EdgeWeightResolver<'a, P> {
    graph: &'a Graph,
    routing: Option<&'a RoutingService<P>>,
    profile: Profile,
    weights: HashMap<(NodeId, NodeId), f64>,
    routes: RouteCache,
    calls: usize,
}

impl<'a, P: RouteProvider> EdgeWeightResolver<'a, P> {
    /// Resolver returning static weights only.
    pub fn static_weights(graph: &'a Graph) -> Self {
        Self::build(graph, None, Profile::Driving)
    }

    /// Resolver asking `routing` for every new edge pair.
    pub fn external(graph: &'a Graph, routing: &'a RoutingService<P>, profile: Profile) -> Self {
        Self::build(graph, Some(routing), profile)
    }

    fn build(graph: &'a Graph, routing: Option<&'a RoutingService<P>>, profile: Profile) -> Self {
        Self {
            graph,
            routing,
            profile,
            weights: HashMap::new(),
            routes: RouteCache::new(),
            calls: 0,
        }
    }

    /// Weight of `edge` in minutes.
    ///
    /// A pair resolved in either direction is reused. A failed lookup
    /// stores the static weight so the pair is not retried in this search.
    pub async fn resolve(&mut self, edge: &Edge) -> f64 {
        let Some(routing) = self.routing else {
            return edge.weight;
        };

        let forward = (edge.source.clone(), edge.target.clone());
        if let Some(&weight) = self.weights.get(&forward) {
            return weight;
        }
        let reverse = (edge.target.clone(), edge.source.clone());
        if let Some(&weight) = self.weights.get(&reverse) {
            return weight;
        }

        let (Some(from), Some(to)) = (self.graph.node(&edge.source), self.graph.node(&edge.target))
        else {
            debug!(source = %edge.source, target = %edge.target, "edge endpoint missing, using static weight");
            return edge.weight;
        };

        self.calls += 1;
        let weight = match routing
            .get_route(from.coordinate(), to.coordinate(), self.profile)
            .await
        {
            Some(route) => {
                let minutes = route.duration_seconds / 60.0;
                self.routes.insert(forward.clone(), route);
                minutes
            }
            None => {
                warn!(
                    source = %edge.source,
                    target = %edge.target,
                    weight = edge.weight,
                    "routing failed, keeping static weight"
                );
                edge.weight
            }
        };

        self.weights.insert(forward, weight);
        weight
    }

    /// Requests made so far (per-search cache hits excluded).
    pub fn calls(&self) -> usize {
        self.calls
    }

    fn into_source(self) -> WeightSource {
        WeightSource {
            mode: if self.routing.is_some() {
                WeightMode::Osrm
            } else {
                WeightMode::Static
            },
            external_calls: self.calls,
            routes: self.routes,
        }
    }
}

/// Shortest path with weights resolved through `routing`.
///
/// With `use_external_weights` false this returns the same path and
/// distance as the static search. Routing failures never fail the search;
/// the affected edges keep their static weight.
pub async fn search_async<P: RouteProvider>(
    graph: &Graph,
    start: &NodeId,
    end: &NodeId,
    use_external_weights: bool,
    routing: &RoutingService<P>,
    config: &SearchConfig,
) -> Result<AlgorithmResult, SearchError> {
    check_endpoints(graph, start, end)?;

    let mut resolver = if use_external_weights {
        EdgeWeightResolver::external(graph, routing, config.external_profile)
    } else {
        EdgeWeightResolver::static_weights(graph)
    };
    let mut run = DijkstraRun::new(graph, start, config.record_queue);

    while let Some(current) = run.next_node() {
        if &current == end {
            break;
        }
        for edge in graph.outgoing(&current) {
            if !run.should_relax(graph, edge) {
                continue;
            }
            let weight = resolver.resolve(edge).await;
            run.relax(&current, &edge.target, weight);
        }
    }

    Ok(AlgorithmResult::Dijkstra(run.finish(
        start,
        end,
        &config.memory,
        resolver.into_source(),
    )))
}
