//! Renderable route segments.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, NodeId, TransportMode};

/// How segment geometry and timings are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingMode {
    /// Raw station coordinates and static edge values.
    #[default]
    StraightLine,
    /// Road geometry and timings from the routing service.
    OsrmRealistic,
}

/// Where a single segment's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentSource {
    StraightLine,
    Osrm,
    /// The routing service failed for this pair; fixed values were used.
    Fallback,
}

/// Display information for the line a segment belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
}

/// One consecutive pair of a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub from: NodeId,
    pub to: NodeId,
    pub coordinates: Vec<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
    pub route_info: RouteInfo,
    pub duration_minutes: f64,
    pub distance_km: f64,
    pub instructions: Vec<String>,
    pub source: SegmentSource,
}

/// Totals over a segment sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetrics {
    pub total_duration_minutes: f64,
    pub total_distance_km: f64,
    pub segment_count: usize,
    /// Distinct modes in order of first appearance.
    pub transport_modes: Vec<TransportMode>,
    pub mode: RoutingMode,
}

impl RouteMetrics {
    /// Reduce `segments`. Pure.
    pub fn from_segments(segments: &[RouteSegment], mode: RoutingMode) -> Self {
        let mut transport_modes = Vec::new();
        for m in segments.iter().filter_map(|s| s.transport_mode) {
            if !transport_modes.contains(&m) {
                transport_modes.push(m);
            }
        }

        Self {
            total_duration_minutes: segments.iter().map(|s| s.duration_minutes).sum(),
            total_distance_km: segments.iter().map(|s| s.distance_km).sum(),
            segment_count: segments.len(),
            transport_modes,
            mode,
        }
    }
}
