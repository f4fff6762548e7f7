//! Caching layer for OSRM route responses.
//!
//! Routes are cached by exact coordinates and profile for the lifetime of
//! the service. Nothing is evicted unless a capacity or TTL is configured,
//! so memory grows with the number of distinct station pairs queried.
//!
//! Concurrent lookups of one key share a single upstream request. Failures
//! are never cached: a pair that failed once is retried on the next
//! request. Per-search fallback memoisation lives in the planner.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::join_all;
use moka::future::Cache as MokaCache;

use crate::domain::{Coordinate, haversine_km};
use crate::osrm::{
    MultiRoute, OsrmError, OsrmRoute, PathLeg, Profile, RealisticPath, RouteProvider,
    convert_multi_route, convert_route,
};

/// Cache key for point-to-point routes: start, end (bit patterns) and profile.
type RouteKey = ((u64, u64), (u64, u64), Profile);

/// Cache key for multi-waypoint routes.
type MultiKey = (Vec<(u64, u64)>, Profile);

/// Duration assumed for a station pair the service could not route.
pub const FALLBACK_DURATION_SECONDS: f64 = 300.0;

/// Distance assumed for a station pair the service could not route.
pub const FALLBACK_DISTANCE_METERS: f64 = 1000.0;

/// Configuration for the route cache.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// TTL for cached entries. `None` keeps entries for the process lifetime.
    pub ttl: Option<Duration>,

    /// Maximum number of cached entries. `None` is unbounded.
    pub max_capacity: Option<u64>,
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Build an empty moka cache honouring this configuration.
    pub(crate) fn build<K, V>(&self) -> MokaCache<K, V>
    where
        K: std::hash::Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let mut builder = MokaCache::<K, V>::builder();
        if let Some(ttl) = self.ttl {
            builder = builder.time_to_live(ttl);
        }
        if let Some(capacity) = self.max_capacity {
            builder = builder.max_capacity(capacity);
        }
        builder.build()
    }
}

/// Routing service with caching.
///
/// Wraps a `RouteProvider` and caches decoded routes. Every public lookup
/// returns `None` instead of an error; failures are logged.
pub struct RoutingService<P> {
    provider: P,
    routes: MokaCache<RouteKey, Arc<OsrmRoute>>,
    multi_routes: MokaCache<MultiKey, Arc<MultiRoute>>,
    upstream_calls: AtomicUsize,
}

impl<P: RouteProvider> RoutingService<P> {
    /// Create a new cached service.
    pub fn new(provider: P, config: &CacheConfig) -> Self {
        Self {
            provider,
            routes: config.build(),
            multi_routes: config.build(),
            upstream_calls: AtomicUsize::new(0),
        }
    }

    /// Get a route between two points, using the cache if available.
    pub async fn get_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        profile: Profile,
    ) -> Option<Arc<OsrmRoute>> {
        let key = (start.key(), end.key(), profile);

        let fetched = self
            .routes
            .try_get_with(key, async {
                self.fetch_route(start, end, profile).await.map(Arc::new)
            })
            .await;

        match fetched {
            Ok(route) => Some(route),
            Err(e) => {
                tracing::warn!(
                    start = ?start,
                    end = ?end,
                    %profile,
                    error = %e,
                    "route lookup failed"
                );
                None
            }
        }
    }

    async fn fetch_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        profile: Profile,
    ) -> Result<OsrmRoute, OsrmError> {
        self.upstream_calls.fetch_add(1, Ordering::Relaxed);
        let response = self.provider.route(&[start, end], profile).await?;
        convert_route(&response)
    }

    /// Get one route through all `waypoints` with per-leg values.
    ///
    /// Returns `None` for fewer than two waypoints or on any failure.
    pub async fn get_multi_route(
        &self,
        waypoints: &[Coordinate],
        profile: Profile,
    ) -> Option<Arc<MultiRoute>> {
        if waypoints.len() < 2 {
            return None;
        }

        let key = (waypoints.iter().map(Coordinate::key).collect(), profile);

        let fetched = self
            .multi_routes
            .try_get_with(key, async {
                self.upstream_calls.fetch_add(1, Ordering::Relaxed);
                self.provider
                    .route(waypoints, profile)
                    .await
                    .and_then(|response| convert_multi_route(&response))
                    .map(Arc::new)
            })
            .await;

        match fetched {
            Ok(route) => Some(route),
            Err(e) => {
                tracing::warn!(
                    waypoints = waypoints.len(),
                    %profile,
                    error = %e,
                    "multi-waypoint route lookup failed"
                );
                None
            }
        }
    }

    /// Route a station sequence pair by pair with one profile.
    pub async fn get_realistic_route_for_path(
        &self,
        stops: &[Coordinate],
        profile: Profile,
    ) -> Option<RealisticPath> {
        let pairs: Vec<_> = stops.windows(2).map(|w| (w[0], w[1], profile)).collect();
        self.route_pairs(&pairs).await
    }

    /// Route consecutive station pairs, each with its own profile.
    ///
    /// A pair the service cannot route becomes a straight two-point leg
    /// with fixed fallback values. Returns `None` when there are no pairs
    /// or every pair fell back.
    pub async fn route_pairs(
        &self,
        pairs: &[(Coordinate, Coordinate, Profile)],
    ) -> Option<RealisticPath> {
        if pairs.is_empty() {
            return None;
        }

        let lookups = pairs
            .iter()
            .map(|&(from, to, profile)| async move { self.get_route(from, to, profile).await });
        let results = join_all(lookups).await;

        let legs: Vec<PathLeg> = pairs
            .iter()
            .zip(results)
            .map(|(&(from, to, _), route)| match route {
                Some(route) => PathLeg {
                    geometry: route.geometry.clone(),
                    duration_seconds: route.duration_seconds,
                    distance_meters: route.distance_meters,
                    instructions: route.instructions.clone(),
                    fallback: false,
                },
                None => fallback_leg(from, to),
            })
            .collect();

        if legs.iter().all(|l| l.fallback) {
            tracing::debug!(pairs = pairs.len(), "every pair fell back to straight lines");
            return None;
        }

        Some(assemble_path(legs))
    }

    /// Number of requests sent to the provider (cache misses).
    pub fn upstream_calls(&self) -> usize {
        self.upstream_calls.load(Ordering::Relaxed)
    }

    /// Number of cached point-to-point routes.
    pub async fn cache_entry_count(&self) -> u64 {
        self.routes.run_pending_tasks().await;
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.routes.invalidate_all();
        self.multi_routes.invalidate_all();
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// Straight leg used when a pair cannot be routed.
fn fallback_leg(from: Coordinate, to: Coordinate) -> PathLeg {
    PathLeg {
        geometry: vec![from, to],
        duration_seconds: FALLBACK_DURATION_SECONDS,
        distance_meters: FALLBACK_DISTANCE_METERS,
        instructions: vec![format!(
            "Continue straight for {:.0} m",
            haversine_km(from, to) * 1000.0
        )],
        fallback: true,
    }
}

/// Join legs, dropping the junction point repeated at each leg start.
fn assemble_path(legs: Vec<PathLeg>) -> RealisticPath {
    let mut geometry = Vec::new();
    let mut duration_seconds = 0.0;
    let mut distance_meters = 0.0;

    for (i, leg) in legs.iter().enumerate() {
        let skip = usize::from(i > 0);
        geometry.extend(leg.geometry.iter().skip(skip).copied());
        duration_seconds += leg.duration_seconds;
        distance_meters += leg.distance_meters;
    }

    RealisticPath {
        legs,
        geometry,
        duration_seconds,
        distance_meters,
    }
}
