//! Following a route with live positions.
//!
//! A [`RouteTracker`] owns one [`RoutePlan`] and turns each position fix into
//! a [`TrackerUpdate`]. Arrival at the destination is reported to a
//! [`Notifier`] exactly once per tracker.

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{GeoPoint, StationRecord};

use super::config::TrackerConfig;
use super::plan::RoutePlan;
use super::progress::nearest_index;

/// Something that can report the user's current position.
pub trait PositionSource {
    /// The latest fix, or `None` if no fix is available.
    fn current_position(&self) -> Option<GeoPoint>;
}

impl PositionSource for Option<GeoPoint> {
    fn current_position(&self) -> Option<GeoPoint> {
        *self
    }
}

impl PositionSource for GeoPoint {
    fn current_position(&self) -> Option<GeoPoint> {
        Some(*self)
    }
}

/// Receives arrival events.
pub trait Notifier {
    fn arrived(&self, station: &StationRecord);
}

/// Notifier that writes arrivals to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn arrived(&self, station: &StationRecord) {
        info!(
            station = %station.code,
            name = %station.name.secondary,
            "Arrived at destination"
        );
    }
}

/// State after one position fix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerUpdate {
    pub progress: f64,
    /// Index into the route of the nearest station, if a position was given.
    pub nearest_index: Option<usize>,
    pub stops_left: usize,
    /// Line code at the current progress.
    pub current_line: String,
    /// True only on the fix that triggered the arrival notification.
    pub arrived: bool,
}

/// Tracks progress along one route.
#[derive(Debug, Clone)]
pub struct RouteTracker {
    plan: RoutePlan,
    config: TrackerConfig,
    arrival_sent: bool,
}

impl RouteTracker {
    pub fn new(plan: RoutePlan, config: TrackerConfig) -> Self {
        Self {
            plan,
            config,
            arrival_sent: false,
        }
    }

    pub fn plan(&self) -> &RoutePlan {
        &self.plan
    }

    /// Whether the arrival notification has already fired.
    pub fn has_arrived(&self) -> bool {
        self.arrival_sent
    }

    /// Process one position fix.
    ///
    /// Arrival fires when the position is within the arrival radius of the
    /// destination station.
    pub fn observe(&mut self, position: Option<GeoPoint>, notifier: &dyn Notifier) -> TrackerUpdate {
        let progress = self.plan.progress(position);
        let stations = self.plan.stations();
        let last = stations.len() - 1;

        let nearest = position.and_then(|p| nearest_index(stations, p));
        let stops_left = nearest.map_or(self.plan.remaining_stops(), |i| last - i);

        let mut arrived = false;
        if !self.arrival_sent
            && let Some(p) = position
        {
            let destination = self.plan.destination();
            let distance = p.distance_m(&destination.location);
            if distance <= self.config.arrival_radius_m {
                notifier.arrived(destination);
                self.arrival_sent = true;
                arrived = true;
            } else if nearest == Some(last) {
                debug!(distance_m = distance, "Near destination, outside arrival radius");
            }
        }

        TrackerUpdate {
            progress,
            nearest_index: nearest,
            stops_left,
            current_line: self.plan.line_at(progress).to_string(),
            arrived,
        }
    }

    /// Read a fix from `source` and process it.
    pub fn poll(&mut self, source: &dyn PositionSource, notifier: &dyn Notifier) -> TrackerUpdate {
        self.observe(source.current_position(), notifier)
    }
}
