//! Routes on the metro network.
//!
//! Everything here works on a route that has already been found: snapping it
//! to line geometry, measuring progress from a live position, and tracking
//! arrival at the destination.

mod config;
mod plan;
mod progress;
mod projector;
mod tracker;

pub use config::TrackerConfig;
pub use plan::{PREVIEW_STOPS, RoutePlan, StopPreview};
pub use progress::{nearest_index, route_progress};
pub use projector::{closest_index, project_route};
pub use tracker::{LogNotifier, Notifier, PositionSource, RouteTracker, TrackerUpdate};

use crate::domain::StationCode;

/// Errors from planning a route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A station code is not in the catalog.
    #[error("unknown station: {0}")]
    UnknownStation(StationCode),

    /// The two stations are not connected.
    #[error("no route from {from} to {to}")]
    NoRoute { from: StationCode, to: StationCode },
}
