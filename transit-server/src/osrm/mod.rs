//! OSRM routing service client.
//!
//! This module provides an HTTP client for the OSRM `/route` API, which
//! returns realistic road geometry, duration and distance between
//! coordinates.
//!
//! Key characteristics:
//! - Coordinates travel as `lng,lat` on the wire and are decoded back to
//!   `lat,lng`
//! - Geometry is an encoded polyline with 1e5 precision
//! - A non-`Ok` code or an empty route list means "no route", never a
//!   fatal error for callers

mod client;
mod convert;
mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod polyline;
mod types;

pub use client::{OsrmClient, OsrmConfig, RouteProvider};
pub use convert::{convert_multi_route, convert_route, step_instruction};
pub use error::OsrmError;
pub use types::{
    ApiLeg, ApiRoute, ApiStep, Maneuver, MultiRoute, OsrmRoute, PathLeg, Profile, RealisticPath,
    RouteLeg, RouteResponse,
};
