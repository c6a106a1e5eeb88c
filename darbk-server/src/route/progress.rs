//! Route progress from a live position.

use crate::domain::{GeoPoint, StationRecord};

/// Index of the route station nearest to `position`.
///
/// Ties go to the later station, so co-located interchange platforms read as
/// the one further along. Returns `None` for an empty route.
pub fn nearest_index(route: &[StationRecord], position: GeoPoint) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, station) in route.iter().enumerate() {
        let d = position.distance_m(&station.location);
        if best.is_none_or(|(_, best_d)| d <= best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Fraction of the route covered, in `[0, 1]`.
///
/// This is the index of the nearest route station divided by the number of
/// hops. It is a nearest-station heuristic, not along-track interpolation:
/// with a noisy or off-route position the value can move backwards, and that
/// is passed through unchanged.
///
/// Returns 0 without a position or for routes shorter than two stations.
pub fn route_progress(route: &[StationRecord], position: Option<GeoPoint>) -> f64 {
    let Some(position) = position else {
        return 0.0;
    };
    if route.len() < 2 {
        return 0.0;
    }
    let Some(index) = nearest_index(route, position) else {
        return 0.0;
    };

    let hops = (route.len() - 1).max(1);
    index as f64 / hops as f64
}
