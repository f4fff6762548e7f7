//! OSRM HTTP client.
//!
//! Issues single-attempt `/route/v1` requests. Retries and backoff are
//! deliberately absent: callers degrade to static data on any failure.

use std::future::Future;

use crate::domain::Coordinate;

use super::error::OsrmError;
use super::types::{Profile, RouteResponse};

/// Default base URL (the public OSRM demo server).
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Source of raw route responses.
///
/// This abstraction lets the routing service and the planners be tested
/// without network access.
pub trait RouteProvider: Send + Sync {
    /// Fetch a route through `waypoints` (at least two) for `profile`.
    fn route(
        &self,
        waypoints: &[Coordinate],
        profile: Profile,
    ) -> impl Future<Output = Result<RouteResponse, OsrmError>> + Send;
}

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// OSRM route API client.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, OsrmError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Build the request URL for a waypoint list.
    ///
    /// OSRM expects `lng,lat` pairs separated by `;`.
    pub fn route_url(&self, waypoints: &[Coordinate], profile: Profile) -> String {
        let coords = waypoints
            .iter()
            .map(|c| format!("{},{}", c.lng, c.lat))
            .collect::<Vec<_>>()
            .join(";");
        format!("{}/route/v1/{}/{}", self.base_url, profile.as_str(), coords)
    }
}

impl RouteProvider for OsrmClient {
    async fn route(
        &self,
        waypoints: &[Coordinate],
        profile: Profile,
    ) -> Result<RouteResponse, OsrmError> {
        if waypoints.len() < 2 {
            return Err(OsrmError::TooFewWaypoints(waypoints.len()));
        }

        let url = self.route_url(waypoints, profile);
        tracing::trace!(%url, "requesting route");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "polyline"),
                ("steps", "true"),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OsrmError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| OsrmError::Json {
            message: e.to_string(),
        })
    }
}
