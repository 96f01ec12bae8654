use crate::core::{Route, Waypoint};
use crate::route::RouteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Public OSRM demo server
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

/// Routing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Cycling,
}

impl TravelMode {
    /// Parse a mode name, falling back to driving for anything unknown
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" | "driving" => TravelMode::Driving,
            "walking" => TravelMode::Walking,
            "cycling" => TravelMode::Cycling,
            other => {
                warn!("Invalid mode {}, defaulting to driving", other);
                TravelMode::Driving
            }
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Cycling => "cycling",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: Option<OsrmGeometry>,
}

/// GeoJSON line string; coordinates are `[lon, lat]`
#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Client for the OSRM `route` service
pub struct OsrmClient {
    client: reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RouteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the route request URL
    pub fn route_url(&self, start: Waypoint, end: Waypoint, mode: TravelMode) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, mode, start.lon, start.lat, end.lon, end.lat
        )
    }

    /// Fetch travel waypoints from `start` to `end`
    pub async fn fetch(
        &self,
        start: Waypoint,
        end: Waypoint,
        mode: TravelMode,
    ) -> Result<Route, RouteError> {
        let url = self.route_url(start, end, mode);
        debug!("Requesting route: {}", url);

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let route = parse_route(&body, end)?;
        info!("Route fetched: {} waypoints", route.len());
        Ok(route)
    }
}

/// Extract waypoints from an OSRM response body, ending exactly at `end`
pub fn parse_route(body: &str, end: Waypoint) -> Result<Route, RouteError> {
    let response: OsrmResponse = serde_json::from_str(body)?;

    let first = response.routes.into_iter().next().ok_or(RouteError::NoRoute)?;
    let geometry = first.geometry.ok_or(RouteError::InvalidGeometry)?;

    let mut route: Route = geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| Waypoint::new(lat, lon).map_err(|_| RouteError::InvalidGeometry))
        .collect::<Result<_, _>>()?;

    if route.last() != Some(&end) {
        route.push(end);
    }

    Ok(route)
}
