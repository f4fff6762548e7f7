//! OSRM client error types.

use super::polyline::PolylineError;

/// Errors from the routing service.
///
/// None of these reach the pathfinding core: callers log them and fall
/// back to static weights or straight-line geometry.
#[derive(Debug, thiserror::Error)]
pub enum OsrmError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The service answered but found no route
    #[error("no route: {code}")]
    NoRoute { code: String },

    /// The route geometry could not be decoded
    #[error("invalid geometry: {0}")]
    Geometry(#[from] PolylineError),

    /// Fewer than two waypoints were supplied
    #[error("at least two waypoints are required, got {0}")]
    TooFewWaypoints(usize),
}
