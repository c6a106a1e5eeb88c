//! Snapping a route onto line track geometry.
//!
//! Straight segments between station dots cut corners. The projector finds
//! where the first and last stations of a route fall on the track polyline
//! and returns the stretch of track between them instead.

use crate::domain::{GeoPoint, StationRecord};

/// Index of the polyline vertex nearest to `target`.
///
/// Linear scan by great-circle distance; ties go to the first vertex.
/// Returns `None` for an empty polyline.
pub fn closest_index(polyline: &[GeoPoint], target: GeoPoint) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, point) in polyline.iter().enumerate() {
        let d = target.distance_m(point);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Project a route onto the geometry of its first station's line.
///
/// Returns the polyline slice between the vertices nearest the first and
/// last stations, inclusive, always running from origin towards destination
/// (reversed when the route travels against the polyline's direction).
///
/// Falls back to the stations' own coordinates when the route has fewer than
/// two stations or no usable geometry is given. Routes that change lines are
/// still projected onto the first line only.
pub fn project_route(route: &[StationRecord], geometry: Option<&[GeoPoint]>) -> Vec<GeoPoint> {
    let fallback = || route.iter().map(|s| s.location).collect();

    let (Some(first), Some(last)) = (route.first(), route.last()) else {
        return fallback();
    };
    if route.len() < 2 {
        return fallback();
    }
    let Some(polyline) = geometry else {
        return fallback();
    };
    let (Some(start), Some(end)) = (
        closest_index(polyline, first.location),
        closest_index(polyline, last.location),
    ) else {
        return fallback();
    };

    if start <= end {
        polyline[start..=end].to_vec()
    } else {
        polyline[end..=start].iter().rev().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocalizedName, StationCode};

    fn station(c: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord::new(
            StationCode::parse(c).unwrap(),
            LocalizedName::new(c, c),
            "Line1",
            "Blue Line",
            0,
            GeoPoint::new(lat, lon),
        )
    }

    /// Seven vertices heading east along a curve.
    fn track() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(24.700, 46.600),
            GeoPoint::new(24.702, 46.610),
            GeoPoint::new(24.705, 46.620),
            GeoPoint::new(24.709, 46.630),
            GeoPoint::new(24.705, 46.640),
            GeoPoint::new(24.702, 46.650),
            GeoPoint::new(24.700, 46.660),
        ]
    }

    #[test]
    fn closest_index_basics() {
        let track = track();
        assert_eq!(closest_index(&track, GeoPoint::new(24.700, 46.600)), Some(0));
        assert_eq!(closest_index(&track, GeoPoint::new(24.710, 46.631)), Some(3));
        assert_eq!(closest_index(&track, GeoPoint::new(24.699, 46.700)), Some(6));
        assert_eq!(closest_index(&[], GeoPoint::new(24.7, 46.6)), None);
    }

    #[test]
    fn closest_index_ties_go_first() {
        let p = GeoPoint::new(24.7, 46.6);
        let polyline = vec![GeoPoint::new(24.8, 46.6), p, p];
        assert_eq!(closest_index(&polyline, p), Some(1));
    }

    #[test]
    fn forward_route_preserves_order() {
        let track = track();
        let route = vec![
            station("A", 24.7021, 46.6101),
            station("B", 24.7090, 46.6300),
            station("C", 24.7021, 46.6499),
        ];

        let projected = project_route(&route, Some(&track));
        assert_eq!(projected, track[1..=5].to_vec());
    }

    #[test]
    fn reverse_route_is_reversed_slice() {
        let track = track();
        let route = vec![
            station("C", 24.7021, 46.6499),
            station("B", 24.7090, 46.6300),
            station("A", 24.7021, 46.6101),
        ];

        let projected = project_route(&route, Some(&track));
        let mut expected = track[1..=5].to_vec();
        expected.reverse();
        assert_eq!(projected, expected);
        assert_eq!(projected.first(), Some(&track[5]));
        assert_eq!(projected.last(), Some(&track[1]));
    }

    #[test]
    fn endpoints_on_same_vertex() {
        let track = track();
        let route = vec![station("A", 24.705, 46.620), station("B", 24.7051, 46.6201)];

        assert_eq!(project_route(&route, Some(&track)), vec![track[2]]);
    }

    #[test]
    fn missing_geometry_falls_back_to_stations() {
        let route = vec![station("A", 24.70, 46.60), station("B", 24.71, 46.61)];

        let expected = vec![GeoPoint::new(24.70, 46.60), GeoPoint::new(24.71, 46.61)];
        assert_eq!(project_route(&route, None), expected);
        assert_eq!(project_route(&route, Some(&[])), expected);
    }

    #[test]
    fn short_routes_fall_back() {
        let track = track();
        assert!(project_route(&[], Some(&track)).is_empty());

        let single = vec![station("A", 24.70, 46.60)];
        assert_eq!(
            project_route(&single, Some(&track)),
            vec![GeoPoint::new(24.70, 46.60)]
        );
    }
}
