//! In-memory route provider for tests.
//!
//! Serves canned responses, synthesizes simple routes on demand, or fails
//! every request, and counts how often it was asked.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{Coordinate, haversine_km};

use super::client::RouteProvider;
use super::error::OsrmError;
use super::polyline;
use super::types::{ApiLeg, ApiRoute, ApiStep, Maneuver, Profile, RouteResponse};

type WaypointKey = Vec<(u64, u64)>;

#[derive(Debug, Clone, Copy)]
enum Behaviour {
    /// Only canned responses; anything else is an API error.
    Canned,
    /// Synthesize a direct route at this speed (m/s).
    Synthesize(f64),
    /// Every request fails.
    Fail,
}

/// Mock provider counting every request.
pub struct MockRouteProvider {
    behaviour: Behaviour,
    canned: HashMap<WaypointKey, RouteResponse>,
    calls: AtomicUsize,
    profiles: Mutex<Vec<Profile>>,
}

impl MockRouteProvider {
    fn with_behaviour(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            canned: HashMap::new(),
            calls: AtomicUsize::new(0),
            profiles: Mutex::new(Vec::new()),
        }
    }

    /// Provider answering only registered waypoint lists.
    pub fn canned() -> Self {
        Self::with_behaviour(Behaviour::Canned)
    }

    /// Provider answering every request with a direct route.
    pub fn synthesizing(speed_mps: f64) -> Self {
        Self::with_behaviour(Behaviour::Synthesize(speed_mps))
    }

    /// Provider failing every request.
    pub fn failing() -> Self {
        Self::with_behaviour(Behaviour::Fail)
    }

    /// Register a response for an exact waypoint list.
    pub fn add_response(&mut self, waypoints: &[Coordinate], response: RouteResponse) {
        self.canned.insert(key(waypoints), response);
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Profiles requested, in order.
    pub fn requested_profiles(&self) -> Vec<Profile> {
        self.profiles.lock().unwrap().clone()
    }
}

fn key(waypoints: &[Coordinate]) -> WaypointKey {
    waypoints.iter().map(Coordinate::key).collect()
}

/// A successful single-route response.
pub fn ok_response(geometry: &[Coordinate], duration: f64, distance: f64) -> RouteResponse {
    let legs = geometry
        .windows(2)
        .map(|pair| {
            let d = haversine_km(pair[0], pair[1]) * 1000.0;
            let share = if distance > 0.0 { d / distance } else { 0.0 };
            ApiLeg {
                duration: duration * share,
                distance: d,
                steps: vec![
                    ApiStep {
                        maneuver: Maneuver {
                            kind: "depart".to_string(),
                            modifier: None,
                            instruction: None,
                            location: Some([pair[0].lng, pair[0].lat]),
                        },
                        name: String::new(),
                        duration: duration * share,
                        distance: d,
                        geometry: Some(polyline::encode(pair)),
                    },
                    ApiStep {
                        maneuver: Maneuver {
                            kind: "arrive".to_string(),
                            modifier: None,
                            instruction: None,
                            location: Some([pair[1].lng, pair[1].lat]),
                        },
                        name: String::new(),
                        duration: 0.0,
                        distance: 0.0,
                        geometry: Some(polyline::encode(&[pair[1], pair[1]])),
                    },
                ],
            }
        })
        .collect();

    RouteResponse {
        code: "Ok".to_string(),
        message: None,
        routes: vec![ApiRoute {
            geometry: polyline::encode(geometry),
            duration,
            distance,
            legs,
        }],
    }
}

impl RouteProvider for MockRouteProvider {
    async fn route(
        &self,
        waypoints: &[Coordinate],
        profile: Profile,
    ) -> Result<RouteResponse, OsrmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.profiles.lock().unwrap().push(profile);
        // Suspend like a network call so concurrent lookups interleave.
        tokio::task::yield_now().await;

        if let Some(response) = self.canned.get(&key(waypoints)) {
            return Ok(response.clone());
        }

        match self.behaviour {
            Behaviour::Fail | Behaviour::Canned => Err(OsrmError::Api {
                status: 503,
                message: "mock provider has no route".to_string(),
            }),
            Behaviour::Synthesize(speed) => {
                let distance: f64 = waypoints
                    .windows(2)
                    .map(|p| haversine_km(p[0], p[1]) * 1000.0)
                    .sum();
                Ok(ok_response(waypoints, distance / speed, distance))
            }
        }
    }
}
