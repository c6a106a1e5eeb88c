//! Unit tests for shortest-path search.

use super::*;
use crate::domain::{GeoPoint, LocalizedName, StationRecord};
use proptest::prelude::*;

fn code(s: &str) -> StationCode {
    StationCode::parse(s).unwrap()
}

fn codes(list: &[&str]) -> Vec<StationCode> {
    list.iter().map(|s| code(s)).collect()
}

fn station(c: &str, line: &str, seq: u32, name: &str) -> StationRecord {
    StationRecord::new(
        code(c),
        LocalizedName::new(name, name),
        line,
        line,
        seq,
        GeoPoint::new(24.7, 46.7),
    )
}

fn graph_from_edges(edges: &[(&str, &str)]) -> MetroGraph {
    let mut graph = MetroGraph::new();
    for (a, b) in edges {
        graph.add_edge(&code(a), &code(b));
    }
    graph
}

/// Check that `path` is a walk in `graph` from `start` to `end` with no repeats.
fn assert_valid_path(graph: &MetroGraph, path: &[StationCode], start: &str, end: &str) {
    assert_eq!(path.first(), Some(&code(start)));
    assert_eq!(path.last(), Some(&code(end)));
    for pair in path.windows(2) {
        assert!(
            graph.are_adjacent(&pair[0], &pair[1]),
            "{} and {} are not adjacent",
            pair[0],
            pair[1]
        );
    }
    let unique: std::collections::HashSet<_> = path.iter().collect();
    assert_eq!(unique.len(), path.len(), "path repeats a station");
}

/// Reference all-pairs hop distances by repeated relaxation.
fn brute_force_distances(
    graph: &MetroGraph,
) -> std::collections::HashMap<(StationCode, StationCode), usize> {
    let nodes: Vec<StationCode> = graph.stations().cloned().collect();
    let mut dist = std::collections::HashMap::new();
    for n in &nodes {
        dist.insert((n.clone(), n.clone()), 0usize);
    }
    for (a, b) in graph.edges() {
        dist.insert((a.clone(), b.clone()), 1);
        dist.insert((b, a), 1);
    }
    // Floyd-Warshall
    for k in &nodes {
        for i in &nodes {
            for j in &nodes {
                let via = match (
                    dist.get(&(i.clone(), k.clone())),
                    dist.get(&(k.clone(), j.clone())),
                ) {
                    (Some(x), Some(y)) => x + y,
                    _ => continue,
                };
                let entry = dist.entry((i.clone(), j.clone())).or_insert(usize::MAX);
                if via < *entry {
                    *entry = via;
                }
            }
        }
    }
    dist
}

#[test]
fn same_station_returns_single_element() {
    let graph = graph_from_edges(&[("A", "B")]);
    assert_eq!(shortest_path(&graph, &code("A"), &code("A")), codes(&["A"]));
}

#[test]
fn same_station_short_circuits_even_when_absent() {
    let graph = MetroGraph::new();
    assert_eq!(shortest_path(&graph, &code("Z"), &code("Z")), codes(&["Z"]));
}

#[test]
fn adjacent_stations() {
    let graph = graph_from_edges(&[("A", "B")]);
    assert_eq!(shortest_path(&graph, &code("A"), &code("B")), codes(&["A", "B"]));
    assert_eq!(shortest_path(&graph, &code("B"), &code("A")), codes(&["B", "A"]));
}

#[test]
fn unknown_endpoints_are_unreachable() {
    let graph = graph_from_edges(&[("A", "B")]);
    assert!(shortest_path(&graph, &code("A"), &code("Q")).is_empty());
    assert!(shortest_path(&graph, &code("Q"), &code("A")).is_empty());
}

#[test]
fn empty_graph_is_unreachable() {
    let graph = MetroGraph::new();
    assert!(shortest_path(&graph, &code("A"), &code("B")).is_empty());
}

#[test]
fn single_line_scenario() {
    // A(line1,0), B(line1,1), C(line1,2), no interchanges
    let stations = vec![
        station("A", "line1", 0, "alpha"),
        station("B", "line1", 1, "bravo"),
        station("C", "line1", 2, "charlie"),
    ];
    let graph = build_graph(&stations);

    assert_eq!(
        graph.edges(),
        vec![(code("A"), code("B")), (code("B"), code("C"))]
    );
    assert_eq!(
        shortest_path(&graph, &code("A"), &code("C")),
        codes(&["A", "B", "C"])
    );
}

#[test]
fn interchange_scenario() {
    // D(line2,0) shares its display name with B
    let stations = vec![
        station("A", "line1", 0, "alpha"),
        station("B", "line1", 1, "bravo"),
        station("C", "line1", 2, "charlie"),
        station("D", "line2", 0, "bravo"),
    ];
    let graph = build_graph(&stations);

    assert!(graph.are_adjacent(&code("B"), &code("D")));
    assert_eq!(
        shortest_path(&graph, &code("A"), &code("D")),
        codes(&["A", "B", "D"])
    );
}

#[test]
fn disjoint_lines_are_unreachable() {
    let stations = vec![
        station("A", "line1", 0, "a"),
        station("B", "line1", 1, "b"),
        station("X", "line2", 0, "x"),
        station("Y", "line2", 1, "y"),
    ];
    let graph = build_graph(&stations);

    assert!(shortest_path(&graph, &code("A"), &code("Y")).is_empty());
    assert!(shortest_path(&graph, &code("X"), &code("B")).is_empty());
}

#[test]
fn prefers_interchange_shortcut() {
    // Line1: A-B-C-D-E. Line2: P-Q. B~P and E~Q by name.
    // A -> Q: via B,P (3 hops) beats via C,D,E (5 hops).
    let stations = vec![
        station("A", "Line1", 1, "a"),
        station("B", "Line1", 2, "hub1"),
        station("C", "Line1", 3, "c"),
        station("D", "Line1", 4, "d"),
        station("E", "Line1", 5, "hub2"),
        station("P", "Line2", 1, "hub1"),
        station("Q", "Line2", 2, "hub2"),
    ];
    let graph = build_graph(&stations);

    let path = shortest_path(&graph, &code("A"), &code("Q"));
    assert_eq!(path, codes(&["A", "B", "P", "Q"]));
}

#[test]
fn tie_returns_some_shortest_path() {
    // Diamond: two equally short routes from S to T
    let graph = graph_from_edges(&[("S", "L"), ("S", "R"), ("L", "T"), ("R", "T")]);

    let path = shortest_path(&graph, &code("S"), &code("T"));
    assert_eq!(path.len(), 3);
    assert_valid_path(&graph, &path, "S", "T");
}

#[test]
fn cycle_is_handled() {
    let graph = graph_from_edges(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);

    let path = shortest_path(&graph, &code("A"), &code("C"));
    assert_eq!(path.len(), 3);
    assert_valid_path(&graph, &path, "A", "C");
}

#[test]
fn graph_method_delegates() {
    let graph = graph_from_edges(&[("A", "B"), ("B", "C")]);
    assert_eq!(
        graph.shortest_path(&code("A"), &code("C")),
        shortest_path(&graph, &code("A"), &code("C"))
    );
}

/// Strategy: random undirected graphs on up to 8 nodes.
fn arb_graph() -> impl Strategy<Value = MetroGraph> {
    prop::collection::vec((0u8..8, 0u8..8), 0..16).prop_map(|edges| {
        let mut graph = MetroGraph::new();
        for (a, b) in edges {
            graph.add_edge(&code(&format!("N{a}")), &code(&format!("N{b}")));
        }
        graph
    })
}

proptest! {
    /// BFS hop count matches the brute-force distance; unreachable pairs give [].
    #[test]
    fn matches_brute_force(graph in arb_graph()) {
        let dist = brute_force_distances(&graph);
        let nodes: Vec<StationCode> = graph.stations().cloned().collect();

        for a in &nodes {
            for b in &nodes {
                let path = shortest_path(&graph, a, b);
                match dist.get(&(a.clone(), b.clone())) {
                    Some(&d) if d != usize::MAX => {
                        prop_assert_eq!(path.len(), d + 1);
                        assert_valid_path(&graph, &path, a.as_str(), b.as_str());
                    }
                    _ => prop_assert!(path.is_empty()),
                }
            }
        }
    }

    /// Reversing endpoints gives a path of the same length.
    #[test]
    fn distance_is_symmetric(graph in arb_graph(), a in 0u8..8, b in 0u8..8) {
        let a = code(&format!("N{a}"));
        let b = code(&format!("N{b}"));
        prop_assert_eq!(
            shortest_path(&graph, &a, &b).len(),
            shortest_path(&graph, &b, &a).len()
        );
    }
}
