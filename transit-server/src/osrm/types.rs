//! OSRM wire types and decoded route results.
//!
//! Wire types mirror the JSON returned by `/route/v1`. Only the fields
//! this crate consumes are modelled; everything else is ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;

/// OSRM routing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Driving,
    Walking,
    Cycling,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Driving => "driving",
            Profile::Walking => "walking",
            Profile::Cycling => "cycling",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level `/route` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    /// `"Ok"` on success, an error code otherwise.
    pub code: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub routes: Vec<ApiRoute>,
}

/// A single route alternative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRoute {
    /// Encoded polyline of the full route.
    pub geometry: String,

    /// Seconds.
    pub duration: f64,

    /// Meters.
    pub distance: f64,

    #[serde(default)]
    pub legs: Vec<ApiLeg>,
}

/// Route between two consecutive waypoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiLeg {
    #[serde(default)]
    pub duration: f64,

    #[serde(default)]
    pub distance: f64,

    #[serde(default)]
    pub steps: Vec<ApiStep>,
}

/// A maneuver and the road stretch that follows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStep {
    pub maneuver: Maneuver,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub duration: f64,

    #[serde(default)]
    pub distance: f64,

    /// Encoded polyline of this step.
    #[serde(default)]
    pub geometry: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maneuver {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub modifier: Option<String>,

    #[serde(default)]
    pub instruction: Option<String>,

    /// `[lng, lat]`
    #[serde(default)]
    pub location: Option<[f64; 2]>,
}

/// A decoded point-to-point route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsrmRoute {
    pub geometry: Vec<Coordinate>,
    pub duration_seconds: f64,
    pub distance_meters: f64,
    pub instructions: Vec<String>,
}

/// One leg of a multi-waypoint route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub geometry: Vec<Coordinate>,
    pub duration_seconds: f64,
    pub distance_meters: f64,
    pub instructions: Vec<String>,
}

/// A decoded multi-waypoint route: per-leg values plus the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiRoute {
    pub legs: Vec<RouteLeg>,
    pub geometry: Vec<Coordinate>,
    pub duration_seconds: f64,
    pub distance_meters: f64,
}

/// One station-to-station leg of a realistic path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathLeg {
    pub geometry: Vec<Coordinate>,
    pub duration_seconds: f64,
    pub distance_meters: f64,
    pub instructions: Vec<String>,

    /// Whether the routing service failed and a straight line was used.
    pub fallback: bool,
}

/// A realistic route over a whole station sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealisticPath {
    pub legs: Vec<PathLeg>,
    pub geometry: Vec<Coordinate>,
    pub duration_seconds: f64,
    pub distance_meters: f64,
}

impl RealisticPath {
    /// Number of legs that fell back to straight lines.
    pub fn fallback_count(&self) -> usize {
        self.legs.iter().filter(|l| l.fallback).count()
    }
}
