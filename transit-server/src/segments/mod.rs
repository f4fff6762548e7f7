//! Route segments for drawing a computed path.
//!
//! Each consecutive pair of stations becomes one segment with geometry,
//! timings and display info, either as a straight line between stations or
//! along the road network via the routing service.

mod composer;
mod types;

pub use composer::{SegmentComposer, profile_for};
pub use types::{RouteInfo, RouteMetrics, RouteSegment, RoutingMode, SegmentSource};
