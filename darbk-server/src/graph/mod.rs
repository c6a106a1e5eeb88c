//! Station adjacency graph and shortest-path search.
//!
//! The graph connects consecutive stations along each line and every pair
//! of same-named stations across lines (interchanges). It is unweighted and
//! undirected, and is always rebuilt from a catalog rather than patched.

mod bfs;
mod builder;

#[cfg(test)]
mod bfs_tests;

use std::collections::{HashMap, HashSet};

use crate::domain::StationCode;

pub use bfs::shortest_path;
pub use builder::build_graph;

/// Undirected adjacency between station codes.
///
/// Edges are stored in both directions, so `b ∈ neighbors(a)` exactly when
/// `a ∈ neighbors(b)`. Only stations with at least one edge appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetroGraph {
    adjacency: HashMap<StationCode, HashSet<StationCode>>,
}

impl MetroGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect two stations.
    ///
    /// The edge is stored symmetrically. Self-loops are ignored.
    pub fn add_edge(&mut self, a: &StationCode, b: &StationCode) {
        if a == b {
            return;
        }
        self.adjacency
            .entry(a.clone())
            .or_default()
            .insert(b.clone());
        self.adjacency
            .entry(b.clone())
            .or_default()
            .insert(a.clone());
    }

    /// Stations directly connected to `code`.
    pub fn neighbors(&self, code: &StationCode) -> impl Iterator<Item = &StationCode> {
        self.adjacency.get(code).into_iter().flatten()
    }

    /// Check whether two stations share an edge.
    pub fn are_adjacent(&self, a: &StationCode, b: &StationCode) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(b))
    }

    /// Check whether a station has any edge.
    pub fn contains(&self, code: &StationCode) -> bool {
        self.adjacency.contains_key(code)
    }

    /// All stations with at least one edge.
    pub fn stations(&self) -> impl Iterator<Item = &StationCode> {
        self.adjacency.keys()
    }

    /// Number of stations with at least one edge.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashSet::len).sum::<usize>() / 2
    }

    /// Returns true if the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Every undirected edge once, as `(smaller, larger)` pairs in sorted order.
    pub fn edges(&self) -> Vec<(StationCode, StationCode)> {
        let mut edges: Vec<_> = self
            .adjacency
            .iter()
            .flat_map(|(a, ns)| ns.iter().filter(move |b| a < *b).map(move |b| (a, b)))
            .map(|(a, b)| (a.clone(), b.clone()))
            .collect();
        edges.sort();
        edges
    }

    /// Shortest path between two stations. See [`shortest_path`].
    pub fn shortest_path(&self, start: &StationCode, end: &StationCode) -> Vec<StationCode> {
        shortest_path(self, start, end)
    }
}
