//! Graph construction from station records.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::StationRecord;

use super::MetroGraph;

/// Build the adjacency graph for a set of stations.
///
/// Two kinds of edge are added:
///
/// 1. **Line edges**: stations sharing a line code are sorted by sequence
///    number (ties by code) and each consecutive pair is connected.
/// 2. **Interchange edges**: stations sharing a secondary (Arabic) name are
///    connected pairwise, forming a complete subgraph. This treats every
///    same-named platform as walkable from every other, which over-approximates
///    real connectivity.
///
/// The result depends only on the input set, not on its order.
pub fn build_graph(stations: &[StationRecord]) -> MetroGraph {
    let mut graph = MetroGraph::new();

    let mut by_line: BTreeMap<&str, Vec<&StationRecord>> = BTreeMap::new();
    for station in stations {
        by_line
            .entry(station.line_code.as_str())
            .or_default()
            .push(station);
    }

    for line in by_line.values_mut() {
        line.sort_by(|a, b| a.sequence.cmp(&b.sequence).then_with(|| a.code.cmp(&b.code)));
        for pair in line.windows(2) {
            graph.add_edge(&pair[0].code, &pair[1].code);
        }
    }

    let mut by_name: HashMap<&str, Vec<&StationRecord>> = HashMap::new();
    for station in stations {
        by_name
            .entry(station.name.secondary.as_str())
            .or_default()
            .push(station);
    }

    let mut interchanges = 0;
    for group in by_name.values().filter(|g| g.len() > 1) {
        interchanges += 1;
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                graph.add_edge(&a.code, &b.code);
            }
        }
    }

    debug!(
        stations = stations.len(),
        lines = by_line.len(),
        interchanges,
        edges = graph.edge_count(),
        "Built station graph"
    );

    graph
}
