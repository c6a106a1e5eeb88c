//! A resolved route and the values derived from it.

use serde::Serialize;

use crate::catalog::StationCatalog;
use crate::domain::{GeoPoint, Region, StationCode, StationRecord};

use super::progress::route_progress;
use super::projector::project_route;

/// Number of stops shown in a route preview.
pub const PREVIEW_STOPS: usize = 6;

/// One stop in a route preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopPreview {
    pub code: StationCode,
    pub name: String,
    pub name_secondary: String,
    pub line_code: String,
    pub is_interchange: bool,
}

/// A route of at least two stations, origin first.
///
/// Consecutive stations are adjacent in the graph the route came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    stations: Vec<StationRecord>,
}

impl RoutePlan {
    /// Resolve a path of codes against the catalog.
    ///
    /// Unknown codes are dropped. Returns `None` if fewer than two stations
    /// remain, since a single station is not a route.
    pub fn from_path(catalog: &StationCatalog, path: &[StationCode]) -> Option<Self> {
        Self::from_stations(catalog.resolve(path))
    }

    /// Wrap already-resolved stations.
    pub fn from_stations(stations: Vec<StationRecord>) -> Option<Self> {
        (stations.len() > 1).then_some(Self { stations })
    }

    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    pub fn codes(&self) -> Vec<StationCode> {
        self.stations.iter().map(|s| s.code.clone()).collect()
    }

    pub fn origin(&self) -> &StationRecord {
        &self.stations[0]
    }

    pub fn destination(&self) -> &StationRecord {
        &self.stations[self.stations.len() - 1]
    }

    /// Number of stations including both ends.
    pub fn stop_count(&self) -> usize {
        self.stations.len()
    }

    /// Hops left to ride from the origin.
    pub fn remaining_stops(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }

    /// The first station after the origin.
    pub fn next_station(&self) -> &StationRecord {
        &self.stations[1]
    }

    /// Progress along this route for a position.
    pub fn progress(&self, position: Option<GeoPoint>) -> f64 {
        route_progress(&self.stations, position)
    }

    /// Line code of the station at a progress fraction.
    ///
    /// The fraction is clamped to `[0, 1]` and mapped to
    /// `floor(p * (len - 1))`. NaN reads as the origin.
    pub fn line_at(&self, progress: f64) -> &str {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let index = (p * (self.stations.len() - 1) as f64).floor() as usize;
        let index = index.min(self.stations.len() - 1);
        &self.stations[index].line_code
    }

    /// The first `max` stops, with interchange flags from the catalog.
    pub fn preview(&self, catalog: &StationCatalog, max: usize) -> Vec<StopPreview> {
        self.stations
            .iter()
            .take(max)
            .map(|s| StopPreview {
                code: s.code.clone(),
                name: s.name.primary.clone(),
                name_secondary: s.name.secondary.clone(),
                line_code: s.line_code.clone(),
                is_interchange: catalog.is_interchange(s),
            })
            .collect()
    }

    /// Map region enclosing every station of the route.
    pub fn region(&self) -> Option<Region> {
        let points: Vec<GeoPoint> = self.stations.iter().map(|s| s.location).collect();
        Region::enclosing(&points)
    }

    /// Route shape snapped to line geometry where available.
    pub fn shape(&self, geometry: Option<&[GeoPoint]>) -> Vec<GeoPoint> {
        project_route(&self.stations, geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LocalizedName;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn station(c: &str, line: &str, seq: u32, ar: &str, lat: f64) -> StationRecord {
        StationRecord::new(
            code(c),
            LocalizedName::new(c, ar),
            line,
            format!("{line} name"),
            seq,
            GeoPoint::new(lat, 46.70),
        )
    }

    fn catalog() -> StationCatalog {
        StationCatalog::new(vec![
            station("A", "Line1", 1, "أ", 24.70),
            station("B", "Line1", 2, "ب", 24.71),
            station("C", "Line1", 3, "ج", 24.72),
            station("D", "Line2", 1, "ب", 24.71),
            station("E", "Line2", 2, "هـ", 24.73),
        ])
    }

    fn plan(codes: &[&str]) -> RoutePlan {
        let path: Vec<_> = codes.iter().map(|c| code(c)).collect();
        RoutePlan::from_path(&catalog(), &path).unwrap()
    }

    #[test]
    fn short_paths_are_not_plans() {
        assert!(RoutePlan::from_path(&catalog(), &[]).is_none());
        assert!(RoutePlan::from_path(&catalog(), &[code("A")]).is_none());
        assert!(RoutePlan::from_path(&catalog(), &[code("A"), code("ZZ")]).is_none());
    }

    #[test]
    fn derived_values() {
        let plan = plan(&["A", "B", "D", "E"]);

        assert_eq!(plan.origin().code, code("A"));
        assert_eq!(plan.destination().code, code("E"));
        assert_eq!(plan.next_station().code, code("B"));
        assert_eq!(plan.stop_count(), 4);
        assert_eq!(plan.remaining_stops(), 3);
        assert_eq!(plan.codes(), vec![code("A"), code("B"), code("D"), code("E")]);
    }

    #[test]
    fn line_at_progress() {
        let plan = plan(&["A", "B", "D", "E"]);

        assert_eq!(plan.line_at(0.0), "Line1");
        assert_eq!(plan.line_at(0.5), "Line1");
        assert_eq!(plan.line_at(0.7), "Line2");
        assert_eq!(plan.line_at(1.0), "Line2");
        assert_eq!(plan.line_at(-3.0), "Line1");
        assert_eq!(plan.line_at(7.0), "Line2");
        assert_eq!(plan.line_at(f64::NAN), "Line1");
    }

    #[test]
    fn preview_flags_interchanges() {
        let preview = plan(&["A", "B", "D", "E"]).preview(&catalog(), PREVIEW_STOPS);

        let flags: Vec<_> = preview.iter().map(|p| p.is_interchange).collect();
        assert_eq!(flags, vec![false, true, true, false]);
        assert_eq!(preview[1].name_secondary, "ب");
    }

    #[test]
    fn preview_is_truncated() {
        let preview = plan(&["A", "B", "D", "E"]).preview(&catalog(), 2);
        assert_eq!(preview.len(), 2);
    }

    #[test]
    fn region_covers_route() {
        let region = plan(&["A", "B", "C"]).region().unwrap();

        assert!((region.center.lat - 24.71).abs() < 1e-9);
        assert!((region.lat_span - 0.02 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn progress_delegates_to_nearest_station() {
        let plan = plan(&["A", "B", "C"]);
        assert_eq!(plan.progress(None), 0.0);
        assert_eq!(plan.progress(Some(GeoPoint::new(24.72, 46.70))), 1.0);
        assert_eq!(plan.progress(Some(GeoPoint::new(24.71, 46.70))), 0.5);
    }
}
