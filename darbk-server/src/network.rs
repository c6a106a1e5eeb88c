//! The loaded network: catalog, graph and line geometry as one snapshot.
//!
//! A [`Network`] is immutable. Reloading builds a complete new snapshot and
//! swaps it into [`SharedNetwork`], so readers never see a catalog paired
//! with a graph from a different load.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::catalog::{CatalogData, StationCatalog};
use crate::domain::{GeoPoint, LineGeometry, StationCode};
use crate::graph::MetroGraph;
use crate::route::{RouteError, RoutePlan};

/// One consistent load of the network.
#[derive(Debug, Clone)]
pub struct Network {
    catalog: StationCatalog,
    graph: MetroGraph,
    lines: Vec<LineGeometry>,
    generation: u64,
    loaded_at: DateTime<Utc>,
}

impl Network {
    /// Build the catalog and graph from loaded data.
    pub fn build(data: CatalogData, generation: u64) -> Self {
        let catalog = StationCatalog::new(data.stations);
        let graph = catalog.build_graph();

        info!(
            generation,
            stations = catalog.len(),
            edges = graph.edge_count(),
            lines = data.lines.len(),
            "Built network"
        );

        Self {
            catalog,
            graph,
            lines: data.lines,
            generation,
            loaded_at: Utc::now(),
        }
    }

    /// A network with no stations, used before the first load.
    pub fn empty() -> Self {
        Self {
            catalog: StationCatalog::default(),
            graph: MetroGraph::new(),
            lines: Vec::new(),
            generation: 0,
            loaded_at: Utc::now(),
        }
    }

    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &MetroGraph {
        &self.graph
    }

    pub fn lines(&self) -> &[LineGeometry] {
        &self.lines
    }

    /// Load counter; increases with every rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Geometry for a line by its display name.
    pub fn line_geometry(&self, line_name: &str) -> Option<&LineGeometry> {
        self.lines.iter().find(|l| l.name == line_name)
    }

    /// Shortest path between two known stations.
    ///
    /// Returns an empty path when they are not connected and `[from]` when
    /// they are the same station.
    pub fn find_path(&self, from: &StationCode, to: &StationCode) -> Result<Vec<StationCode>, RouteError> {
        self.check_known(from)?;
        self.check_known(to)?;
        Ok(self.graph.shortest_path(from, to))
    }

    /// Find and resolve a route between two stations.
    pub fn plan_route(&self, from: &StationCode, to: &StationCode) -> Result<RoutePlan, RouteError> {
        let path = self.find_path(from, to)?;
        self.plan_from_path(from, to, &path)
    }

    /// Resolve an already-found path into a plan.
    pub fn plan_from_path(
        &self,
        from: &StationCode,
        to: &StationCode,
        path: &[StationCode],
    ) -> Result<RoutePlan, RouteError> {
        RoutePlan::from_path(&self.catalog, path).ok_or_else(|| RouteError::NoRoute {
            from: from.clone(),
            to: to.clone(),
        })
    }

    /// Route shape on the geometry of the origin's line.
    pub fn project(&self, plan: &RoutePlan) -> Vec<GeoPoint> {
        let geometry = self
            .line_geometry(&plan.origin().line_name)
            .map(|l| l.points.as_slice());
        plan.shape(geometry)
    }

    fn check_known(&self, code: &StationCode) -> Result<(), RouteError> {
        if self.catalog.contains(code) {
            Ok(())
        } else {
            Err(RouteError::UnknownStation(code.clone()))
        }
    }
}

/// The current network, shared between request handlers and the refresher.
#[derive(Debug, Clone)]
pub struct SharedNetwork {
    current: Arc<RwLock<Arc<Network>>>,
    generations: Arc<AtomicU64>,
}

impl SharedNetwork {
    /// Start from an empty network.
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(Network::empty()))),
            generations: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The current snapshot.
    ///
    /// The snapshot stays valid for as long as the caller holds it, even if a
    /// reload replaces it meanwhile.
    pub async fn current(&self) -> Arc<Network> {
        self.current.read().await.clone()
    }

    /// Build a new snapshot from `data` and make it current.
    pub async fn replace(&self, data: CatalogData) -> Arc<Network> {
        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        let network = Arc::new(Network::build(data, generation));
        *self.current.write().await = network.clone();
        network
    }
}

impl Default for SharedNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocalizedName, StationRecord};

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn station(c: &str, line: &str, line_name: &str, seq: u32, ar: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord::new(
            code(c),
            LocalizedName::new(c, ar),
            line,
            line_name,
            seq,
            GeoPoint::new(lat, lon),
        )
    }

    fn data() -> CatalogData {
        CatalogData {
            stations: vec![
                station("A", "Line1", "Blue Line", 1, "أ", 24.70, 46.60),
                station("B", "Line1", "Blue Line", 2, "ب", 24.70, 46.62),
                station("C", "Line1", "Blue Line", 3, "ج", 24.70, 46.64),
                station("D", "Line2", "Red Line", 1, "ب", 24.70, 46.62),
                station("E", "Line2", "Red Line", 2, "هـ", 24.72, 46.62),
                station("X", "Line3", "Orange Line", 1, "س", 24.80, 46.80),
            ],
            lines: vec![LineGeometry {
                name: "Blue Line".into(),
                name_secondary: "المسار الأزرق".into(),
                color: "#00ade5".into(),
                points: vec![
                    GeoPoint::new(24.700, 46.600),
                    GeoPoint::new(24.701, 46.610),
                    GeoPoint::new(24.700, 46.620),
                    GeoPoint::new(24.699, 46.630),
                    GeoPoint::new(24.700, 46.640),
                ],
            }],
        }
    }

    #[test]
    fn plan_across_interchange() {
        let network = Network::build(data(), 1);
        let plan = network.plan_route(&code("A"), &code("E")).unwrap();

        assert_eq!(plan.codes(), vec![code("A"), code("B"), code("D"), code("E")]);
    }

    #[test]
    fn unknown_and_unreachable() {
        let network = Network::build(data(), 1);

        assert_eq!(
            network.plan_route(&code("A"), &code("ZZ")),
            Err(RouteError::UnknownStation(code("ZZ")))
        );
        assert_eq!(
            network.plan_route(&code("A"), &code("X")),
            Err(RouteError::NoRoute {
                from: code("A"),
                to: code("X")
            })
        );
        assert_eq!(network.find_path(&code("A"), &code("X")), Ok(vec![]));
    }

    #[test]
    fn same_station_is_a_path_but_not_a_plan() {
        let network = Network::build(data(), 1);

        assert_eq!(network.find_path(&code("X"), &code("X")), Ok(vec![code("X")]));
        assert!(matches!(
            network.plan_route(&code("X"), &code("X")),
            Err(RouteError::NoRoute { .. })
        ));
    }

    #[test]
    fn projection_uses_origin_line() {
        let network = Network::build(data(), 1);

        let plan = network.plan_route(&code("A"), &code("C")).unwrap();
        let shape = network.project(&plan);
        assert_eq!(shape.len(), 5);
        assert_eq!(shape[1], GeoPoint::new(24.701, 46.610));

        // Red Line has no geometry; falls back to station coordinates
        let plan = network.plan_route(&code("E"), &code("D")).unwrap();
        assert_eq!(
            network.project(&plan),
            vec![GeoPoint::new(24.72, 46.62), GeoPoint::new(24.70, 46.62)]
        );
    }

    #[tokio::test]
    async fn replace_swaps_snapshot() {
        let shared = SharedNetwork::new();
        let before = shared.current().await;
        assert_eq!(before.generation(), 0);
        assert!(before.catalog().is_empty());

        shared.replace(data()).await;
        let after = shared.current().await;
        assert_eq!(after.generation(), 1);
        assert_eq!(after.catalog().len(), 6);

        // Held snapshots are unaffected
        assert!(before.catalog().is_empty());

        shared.replace(data()).await;
        assert_eq!(shared.current().await.generation(), 2);
    }
}
