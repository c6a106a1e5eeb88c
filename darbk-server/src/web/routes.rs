//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::catalog::{CatalogError, StationQuery};
use crate::domain::{GeoPoint, StationCode};
use crate::network::Network;
use crate::route::{RouteError, RoutePlan, TrackerUpdate, nearest_index, route_progress};
use crate::session::{Session, SessionError};

use super::dto::*;
use super::state::AppState;

/// Default number of search results.
const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/network", get(network_summary))
        .route("/api/stations", get(search_stations))
        .route("/api/stations/:code", get(get_station))
        .route("/api/nearest-station", get(nearest_station))
        .route("/api/lines", get(list_lines))
        .route("/api/route", get(find_route))
        .route("/api/route/progress", post(measure_progress))
        .route("/api/session", get(get_session))
        .route("/api/session/favorites/:code", post(toggle_favorite))
        .route("/api/session/destination", post(set_destination))
        .route("/api/session/route", delete(clear_route))
        .route("/api/session/track", post(track_position))
        .route("/api/reload", post(reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Summary of the current network.
async fn network_summary(State(state): State<AppState>) -> Json<NetworkSummary> {
    let network = state.network.current().await;
    let cached_routes = state.routes.path_count().await;
    Json(NetworkSummary::from_network(&network, cached_routes))
}

/// Search stations by name and line.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationSearchResponse> {
    let network = state.network.current().await;
    let session = state.session.lock().await;
    let catalog = network.catalog();

    let query = StationQuery {
        text: req.q,
        line_code: req.line,
        limit: Some(req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT)),
    };

    let stations = catalog
        .search(&query)
        .into_iter()
        .map(|s| StationResult::from_station(catalog, s, session.is_favorite(&s.code)))
        .collect();

    Json(StationSearchResponse { stations })
}

/// Look up one station.
async fn get_station(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StationResult>, AppError> {
    let code = parse_code(&code)?;
    let network = state.network.current().await;
    let catalog = network.catalog();

    let station = catalog
        .get(&code)
        .ok_or(RouteError::UnknownStation(code.clone()))?;
    let is_favorite = state.session.lock().await.is_favorite(&code);

    Ok(Json(StationResult::from_station(catalog, station, is_favorite)))
}

/// Nearest station to a coordinate.
async fn nearest_station(
    State(state): State<AppState>,
    Query(req): Query<NearestRequest>,
) -> Result<Json<StationResult>, AppError> {
    let network = state.network.current().await;
    let catalog = network.catalog();

    let station = catalog
        .nearest(GeoPoint::new(req.lat, req.lon))
        .ok_or_else(|| AppError::NotFound {
            message: "No stations loaded".into(),
        })?;
    let is_favorite = state.session.lock().await.is_favorite(&station.code);

    Ok(Json(StationResult::from_station(catalog, station, is_favorite)))
}

/// Line geometries.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let network = state.network.current().await;
    let lines = network.lines().iter().map(LineResult::from).collect();
    Json(LinesResponse { lines })
}

/// Shortest route between two stations.
async fn find_route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let from = parse_code(&req.from)?;
    let to = parse_code(&req.to)?;
    let network = state.network.current().await;

    let path = state.routes.find_path(&network, &from, &to).await?;
    // Empty and single-station paths are both "no route"
    let plan = network.plan_from_path(&from, &to, &path)?;

    debug!(%from, %to, hops = path.len() - 1, "Route found");
    Ok(Json(RouteResponse {
        path: path.to_vec(),
        plan: PlanResult::from_plan(&network, &plan),
    }))
}

/// Progress along a caller-supplied route.
async fn measure_progress(
    State(state): State<AppState>,
    Json(req): Json<ProgressRequest>,
) -> Result<Json<ProgressResponse>, AppError> {
    let network = state.network.current().await;
    let catalog = network.catalog();

    let mut stations = Vec::with_capacity(req.route.len());
    for code in &req.route {
        let code = parse_code(code)?;
        let station = catalog.get(&code).ok_or(RouteError::UnknownStation(code))?;
        stations.push(station.clone());
    }

    let progress = route_progress(&stations, req.position);
    let nearest = req.position.and_then(|p| nearest_index(&stations, p));
    let last = stations.len().saturating_sub(1);
    let stops_left = nearest.map_or(last, |i| last - i);
    let current_line = RoutePlan::from_stations(stations).map(|plan| plan.line_at(progress).to_string());

    Ok(Json(ProgressResponse {
        progress,
        nearest_index: nearest,
        stops_left,
        current_line,
    }))
}

/// Current session state.
async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let network = state.network.current().await;
    let session = state.session.lock().await;
    Json(session_response(&network, &session))
}

/// Add or remove a favourite station.
async fn toggle_favorite(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<FavoriteResponse>, AppError> {
    let code = parse_code(&code)?;
    let network = state.network.current().await;
    let is_favorite = state.session.lock().await.toggle_favorite(&network, &code)?;

    Ok(Json(FavoriteResponse { code, is_favorite }))
}

/// Choose a destination and plan the session's route.
async fn set_destination(
    State(state): State<AppState>,
    Json(req): Json<DestinationRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let destination = parse_code(&req.destination)?;
    let network = state.network.current().await;
    let mut session = state.session.lock().await;

    session.set_destination(&network, &destination, req.position, &state.tracker)?;
    Ok(Json(session_response(&network, &session)))
}

/// Drop the session's route.
async fn clear_route(State(state): State<AppState>) -> Json<SessionResponse> {
    let network = state.network.current().await;
    let mut session = state.session.lock().await;
    session.clear_route();
    Json(session_response(&network, &session))
}

/// Feed a position to the session's route tracker.
async fn track_position(
    State(state): State<AppState>,
    Json(req): Json<TrackRequest>,
) -> Result<Json<TrackerUpdate>, AppError> {
    let mut session = state.session.lock().await;
    session
        .track(req.position, state.notifier.as_ref())
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: "No route selected".into(),
        })
}

/// Rebuild the network from the configured sources.
async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let network = state.reload().await?;
    Ok(Json(ReloadResponse {
        generation: network.generation(),
        stations: network.catalog().len(),
        lines: network.lines().len(),
    }))
}

fn session_response(network: &Network, session: &Session) -> SessionResponse {
    SessionResponse {
        favorites: session.favorites().cloned().collect(),
        origin: session.origin().cloned(),
        destination: session.destination().cloned(),
        route: session.route().map(|plan| PlanResult::from_plan(network, plan)),
    }
}

fn parse_code(s: &str) -> Result<StationCode, AppError> {
    StationCode::parse_normalized(s).map_err(|_| AppError::BadRequest {
        message: format!("Invalid station code: {s:?}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Route(e) => e.into(),
            SessionError::UnknownStation(_) => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
