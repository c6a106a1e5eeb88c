//! Geographic points and regions.

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// Span multiplier applied around a set of points when framing a region.
const REGION_PADDING: f64 = 1.2;

/// A WGS84 coordinate in latitude/longitude order.
///
/// GeoJSON stores `[lon, lat]`; loaders convert at the boundary so everything
/// past it uses this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a point from a GeoJSON `[lon, lat, ...]` position.
    ///
    /// Returns `None` if fewer than two ordinates are present.
    pub fn from_lon_lat(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Some(Self::new(*lat, *lon)),
            _ => None,
        }
    }

    /// Great-circle distance to `other` in metres.
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        self.to_geo().haversine_distance(&other.to_geo())
    }

    fn to_geo(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// A map region: centre plus latitude/longitude extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub center: GeoPoint,
    pub lat_span: f64,
    pub lon_span: f64,
}

impl Region {
    /// Frame a set of points: centroid centre, bounding extent padded by 20%.
    ///
    /// Returns `None` for an empty set.
    pub fn enclosing(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let center = GeoPoint::new(
            points.iter().map(|p| p.lat).sum::<f64>() / n,
            points.iter().map(|p| p.lon).sum::<f64>() / n,
        );

        let (min_lat, max_lat) = extent(points.iter().map(|p| p.lat));
        let (min_lon, max_lon) = extent(points.iter().map(|p| p.lon));

        Some(Self {
            center,
            lat_span: (max_lat - min_lat) * REGION_PADDING,
            lon_span: (max_lon - min_lon) * REGION_PADDING,
        })
    }
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
