//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::catalog::StationCatalog;
use crate::domain::{GeoPoint, LineGeometry, Region, StationCode, StationRecord, line_color, line_display_name};
use crate::network::Network;
use crate::route::{PREVIEW_STOPS, RoutePlan, StopPreview};

/// Network summary.
#[derive(Debug, Serialize)]
pub struct NetworkSummary {
    /// Load counter of the current snapshot
    pub generation: u64,

    /// When the snapshot was built (RFC 3339)
    pub loaded_at: String,

    pub stations: usize,
    pub edges: usize,
    pub lines: usize,

    /// Distinct line codes, sorted
    pub line_codes: Vec<String>,

    /// Shortest paths held in the route cache
    pub cached_routes: u64,
}

impl NetworkSummary {
    pub fn from_network(network: &Network, cached_routes: u64) -> Self {
        let catalog = network.catalog();
        Self {
            generation: network.generation(),
            loaded_at: network.loaded_at().to_rfc3339(),
            stations: catalog.len(),
            edges: network.graph().edge_count(),
            lines: network.lines().len(),
            line_codes: catalog.line_codes().into_iter().map(String::from).collect(),
            cached_routes,
        }
    }
}

/// Request to search stations.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Text to match against either name
    pub q: Option<String>,

    /// Line code filter
    pub line: Option<String>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

/// A station in API responses.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub code: StationCode,
    pub name: String,
    pub name_secondary: String,
    pub line_code: String,
    pub line_name: String,

    /// Arabic line name from the fixed line table
    pub line_display_name: String,

    /// Hex colour of the line
    pub line_color: String,

    pub sequence: u32,

    /// Position along the line, numbered from 11
    pub display_number: Option<u32>,

    pub location: GeoPoint,

    /// Line codes served at this station's location
    pub lines: Vec<String>,

    pub is_interchange: bool,
    pub is_favorite: bool,
}

impl StationResult {
    /// Create from a catalog station.
    pub fn from_station(catalog: &StationCatalog, station: &StationRecord, is_favorite: bool) -> Self {
        let lines: Vec<String> = catalog
            .lines_at(station)
            .into_iter()
            .map(String::from)
            .collect();

        Self {
            code: station.code.clone(),
            name: station.name.primary.clone(),
            name_secondary: station.name.secondary.clone(),
            line_code: station.line_code.clone(),
            line_name: station.line_name.clone(),
            line_display_name: line_display_name(&station.line_code).to_string(),
            line_color: line_color(&station.line_code).to_string(),
            sequence: station.sequence,
            display_number: catalog.display_number(&station.code),
            location: station.location,
            is_interchange: lines.len() > 1,
            lines,
            is_favorite,
        }
    }
}

/// Response from station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationResult>,
}

/// Request for the nearest station.
#[derive(Debug, Deserialize)]
pub struct NearestRequest {
    pub lat: f64,
    pub lon: f64,
}

/// A line geometry.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub name: String,
    pub name_secondary: String,
    pub color: String,
    pub points: Vec<GeoPoint>,
}

impl From<&LineGeometry> for LineResult {
    fn from(line: &LineGeometry) -> Self {
        Self {
            name: line.name.clone(),
            name_secondary: line.name_secondary.clone(),
            color: line.color.clone(),
            points: line.points.clone(),
        }
    }
}

/// Response listing line geometries.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

/// Request to find a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin station code
    pub from: String,

    /// Destination station code
    pub to: String,
}

/// A resolved route.
#[derive(Debug, Serialize)]
pub struct PlanResult {
    /// Every stop, origin first
    pub stops: Vec<StopPreview>,

    /// The first few stops
    pub preview: Vec<StopPreview>,

    /// Route shape, snapped to the origin's line where geometry exists
    pub shape: Vec<GeoPoint>,

    pub remaining_stops: usize,
    pub next_station: StationCode,

    /// Map region framing the route
    pub region: Option<Region>,
}

impl PlanResult {
    /// Create from a route plan on a network.
    pub fn from_plan(network: &Network, plan: &RoutePlan) -> Self {
        let catalog = network.catalog();
        Self {
            stops: plan.preview(catalog, usize::MAX),
            preview: plan.preview(catalog, PREVIEW_STOPS),
            shape: network.project(plan),
            remaining_stops: plan.remaining_stops(),
            next_station: plan.next_station().code.clone(),
            region: plan.region(),
        }
    }
}

/// Response from route search.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Station codes from origin to destination
    pub path: Vec<StationCode>,

    /// Resolved route
    pub plan: PlanResult,
}

/// Request to measure progress along a route.
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    /// Station codes from origin to destination
    pub route: Vec<String>,

    /// Current position, if known
    pub position: Option<GeoPoint>,
}

/// Progress along a route.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub progress: f64,
    pub nearest_index: Option<usize>,
    pub stops_left: usize,
    pub current_line: Option<String>,
}

/// Response from a favourite toggle.
#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub code: StationCode,
    pub is_favorite: bool,
}

/// Request to choose a destination.
#[derive(Debug, Deserialize)]
pub struct DestinationRequest {
    /// Destination station code
    pub destination: String,

    /// Current position; the nearest station becomes the origin
    pub position: Option<GeoPoint>,
}

/// Request to feed a position to the session's tracker.
#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    pub position: Option<GeoPoint>,
}

/// Session state.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub favorites: Vec<StationCode>,
    pub origin: Option<StationCode>,
    pub destination: Option<StationCode>,
    pub route: Option<PlanResult>,
}

/// Response from a reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub generation: u64,
    pub stations: usize,
    pub lines: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
