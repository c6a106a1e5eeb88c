//! In-memory user session.
//!
//! Holds the user's favourite stations, the chosen origin and destination,
//! and the tracker for the current route. Nothing here is persisted.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::domain::{GeoPoint, StationCode};
use crate::network::Network;
use crate::route::{Notifier, RouteError, RoutePlan, RouteTracker, TrackerConfig, TrackerUpdate};

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// A station code is not in the catalog.
    #[error("unknown station: {0}")]
    UnknownStation(StationCode),

    /// Route planning failed; the selection has been cleared.
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Per-user state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    favorites: BTreeSet<StationCode>,
    origin: Option<StationCode>,
    destination: Option<StationCode>,
    tracker: Option<RouteTracker>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Favourite stations in code order.
    pub fn favorites(&self) -> impl Iterator<Item = &StationCode> {
        self.favorites.iter()
    }

    pub fn is_favorite(&self, code: &StationCode) -> bool {
        self.favorites.contains(code)
    }

    /// Add or remove a favourite. Returns whether it is now a favourite.
    pub fn toggle_favorite(&mut self, network: &Network, code: &StationCode) -> Result<bool, SessionError> {
        if self.favorites.remove(code) {
            return Ok(false);
        }
        if !network.catalog().contains(code) {
            return Err(SessionError::UnknownStation(code.clone()));
        }
        self.favorites.insert(code.clone());
        Ok(true)
    }

    pub fn origin(&self) -> Option<&StationCode> {
        self.origin.as_ref()
    }

    pub fn destination(&self) -> Option<&StationCode> {
        self.destination.as_ref()
    }

    /// The current route, if one is selected.
    pub fn route(&self) -> Option<&RoutePlan> {
        self.tracker.as_ref().map(RouteTracker::plan)
    }

    pub fn tracker(&self) -> Option<&RouteTracker> {
        self.tracker.as_ref()
    }

    /// Choose a destination and plan a route to it.
    ///
    /// The origin is the station nearest to `position`. Without a position
    /// the destination itself is used as origin, which never yields a route.
    /// Any planning failure clears the selection.
    pub fn set_destination(
        &mut self,
        network: &Network,
        destination: &StationCode,
        position: Option<GeoPoint>,
        config: &TrackerConfig,
    ) -> Result<&RoutePlan, SessionError> {
        let catalog = network.catalog();
        if !catalog.contains(destination) {
            return Err(SessionError::UnknownStation(destination.clone()));
        }

        let origin = position
            .and_then(|p| catalog.nearest(p))
            .map_or_else(|| destination.clone(), |s| s.code.clone());

        debug!(%origin, %destination, "Selecting destination");
        self.origin = Some(origin.clone());
        self.destination = Some(destination.clone());
        self.plan(network, &origin, destination, config)
    }

    /// Recompute the route for the current selection.
    ///
    /// Used after a reload. Returns `Ok(None)` when nothing is selected. The
    /// tracker restarts, so a pending arrival can fire again.
    pub fn update_route(&mut self, network: &Network, config: &TrackerConfig) -> Result<Option<&RoutePlan>, SessionError> {
        let (Some(origin), Some(destination)) = (self.origin.clone(), self.destination.clone()) else {
            return Ok(None);
        };
        self.plan(network, &origin, &destination, config).map(Some)
    }

    /// Plan `origin` to `destination` and start tracking it. A failure
    /// clears the selection.
    fn plan(
        &mut self,
        network: &Network,
        origin: &StationCode,
        destination: &StationCode,
        config: &TrackerConfig,
    ) -> Result<&RoutePlan, SessionError> {
        match network.plan_route(origin, destination) {
            Ok(plan) => {
                info!(
                    origin = %plan.origin().code,
                    destination = %plan.destination().code,
                    stops = plan.stop_count(),
                    "Route selected"
                );
                let tracker = self.tracker.insert(RouteTracker::new(plan, config.clone()));
                Ok(tracker.plan())
            }
            Err(e) => {
                info!(error = %e, "No route, clearing selection");
                self.clear_route();
                Err(e.into())
            }
        }
    }

    /// Drop the selection and any tracked route.
    pub fn clear_route(&mut self) {
        self.origin = None;
        self.destination = None;
        self.tracker = None;
    }

    /// Feed a position to the current route's tracker.
    ///
    /// Returns `None` if no route is selected.
    pub fn track(&mut self, position: Option<GeoPoint>, notifier: &dyn Notifier) -> Option<TrackerUpdate> {
        self.tracker
            .as_mut()
            .map(|tracker| tracker.observe(position, notifier))
    }
}
