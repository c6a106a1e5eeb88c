//! In-memory station catalog.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::domain::{GeoPoint, StationCode, StationRecord};
use crate::graph::{MetroGraph, build_graph};

/// First display number on every line.
const FIRST_DISPLAY_NUMBER: u32 = 11;

/// Filter for [`StationCatalog::search`].
#[derive(Debug, Clone, Default)]
pub struct StationQuery {
    /// Case-insensitive substring matched against either name script.
    pub text: Option<String>,
    /// Exact line code.
    pub line_code: Option<String>,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

/// Stations indexed by code.
///
/// Records are deduplicated by code on construction: the first occurrence
/// of a code wins and later ones are dropped, even if their other fields
/// differ. The catalog is immutable; a reload builds a new one.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: Vec<StationRecord>,
    by_code: HashMap<StationCode, usize>,
    display_numbers: HashMap<StationCode, u32>,
}

impl StationCatalog {
    /// Build a catalog from records in feed order.
    pub fn new(records: impl IntoIterator<Item = StationRecord>) -> Self {
        let mut stations = Vec::new();
        let mut by_code = HashMap::new();

        for record in records {
            if by_code.contains_key(&record.code) {
                continue;
            }
            by_code.insert(record.code.clone(), stations.len());
            stations.push(record);
        }

        let display_numbers = number_stations(&stations);

        Self {
            stations,
            by_code,
            display_numbers,
        }
    }

    /// All stations in first-occurrence order.
    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    /// Look up a station by code.
    pub fn get(&self, code: &StationCode) -> Option<&StationRecord> {
        self.by_code.get(code).map(|&i| &self.stations[i])
    }

    /// Check whether a code is known.
    pub fn contains(&self, code: &StationCode) -> bool {
        self.by_code.contains_key(code)
    }

    /// Number of distinct stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the catalog has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Build the station graph for this catalog.
    pub fn build_graph(&self) -> MetroGraph {
        build_graph(&self.stations)
    }

    /// Map codes back to records, dropping unknown codes.
    pub fn resolve(&self, codes: &[StationCode]) -> Vec<StationRecord> {
        codes.iter().filter_map(|c| self.get(c)).cloned().collect()
    }

    /// Distinct line codes, sorted.
    pub fn line_codes(&self) -> Vec<&str> {
        self.stations
            .iter()
            .map(|s| s.line_code.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Search stations by name and line.
    ///
    /// Results are ordered by sequence number, then code.
    pub fn search(&self, query: &StationQuery) -> Vec<&StationRecord> {
        let needle = query
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        let mut matches: Vec<&StationRecord> = self
            .stations
            .iter()
            .filter(|s| {
                query
                    .line_code
                    .as_deref()
                    .is_none_or(|line| s.line_code == line)
            })
            .filter(|s| {
                needle.as_deref().is_none_or(|n| {
                    s.name.primary.to_lowercase().contains(n)
                        || s.name.secondary.to_lowercase().contains(n)
                })
            })
            .collect();

        matches.sort_by(|a, b| a.sequence.cmp(&b.sequence).then_with(|| a.code.cmp(&b.code)));

        if let Some(limit) = query.limit {
            matches.truncate(limit);
        }
        matches
    }

    /// Display number of a station: its position along its line, from 11.
    pub fn display_number(&self, code: &StationCode) -> Option<u32> {
        self.display_numbers.get(code).copied()
    }

    /// Nearest station to a point by great-circle distance.
    ///
    /// Ties go to the earlier station. Returns `None` for an empty catalog.
    pub fn nearest(&self, point: GeoPoint) -> Option<&StationRecord> {
        let mut best: Option<(&StationRecord, f64)> = None;
        for station in &self.stations {
            let d = point.distance_m(&station.location);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((station, d));
            }
        }
        best.map(|(s, _)| s)
    }

    /// Line codes served at this station's location.
    ///
    /// Collects the lines of every station sharing its secondary name, sorted.
    pub fn lines_at(&self, station: &StationRecord) -> Vec<&str> {
        self.stations
            .iter()
            .filter(|s| s.name.secondary == station.name.secondary)
            .map(|s| s.line_code.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Check whether more than one line serves this station's location.
    pub fn is_interchange(&self, station: &StationRecord) -> bool {
        let mut lines = HashSet::new();
        self.stations
            .iter()
            .filter(|s| s.name.secondary == station.name.secondary)
            .any(|s| {
                lines.insert(s.line_code.as_str());
                lines.len() > 1
            })
    }
}

/// Number stations along each line by sequence, starting at 11.
fn number_stations(stations: &[StationRecord]) -> HashMap<StationCode, u32> {
    let mut by_line: HashMap<&str, Vec<&StationRecord>> = HashMap::new();
    for station in stations {
        by_line
            .entry(station.line_code.as_str())
            .or_default()
            .push(station);
    }

    let mut numbers = HashMap::new();
    for line in by_line.values_mut() {
        line.sort_by(|a, b| a.sequence.cmp(&b.sequence).then_with(|| a.code.cmp(&b.code)));
        for (station, number) in line.iter().zip(FIRST_DISPLAY_NUMBER..) {
            numbers.insert(station.code.clone(), number);
        }
    }
    numbers
}
