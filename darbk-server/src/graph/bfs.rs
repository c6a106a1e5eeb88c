//! Breadth-first shortest path over the station graph.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::trace;

use crate::domain::StationCode;

use super::MetroGraph;

/// Find a shortest path from `start` to `end`.
///
/// Returns the station codes from `start` to `end` inclusive, or an empty
/// vector when `end` is unreachable (including when either code is absent
/// from the graph). When `start == end` the result is `[start]` without
/// searching.
///
/// The graph is unweighted, so the first time BFS reaches `end` the path has
/// the minimum number of hops. Neighbour iteration order is unspecified:
/// when several shortest paths exist, any one of them may be returned.
pub fn shortest_path(graph: &MetroGraph, start: &StationCode, end: &StationCode) -> Vec<StationCode> {
    if start == end {
        return vec![start.clone()];
    }

    let mut visited: HashSet<&StationCode> = HashSet::from([start]);
    let mut parent: HashMap<&StationCode, &StationCode> = HashMap::new();
    let mut frontier: VecDeque<&StationCode> = VecDeque::from([start]);

    while let Some(current) = frontier.pop_front() {
        for next in graph.neighbors(current) {
            if !visited.insert(next) {
                continue;
            }
            parent.insert(next, current);

            if next == end {
                let path = reconstruct(&parent, start, next);
                trace!(
                    from = %start,
                    to = %end,
                    hops = path.len() - 1,
                    explored = visited.len(),
                    "Found path"
                );
                return path;
            }

            frontier.push_back(next);
        }
    }

    trace!(from = %start, to = %end, explored = visited.len(), "No path");
    Vec::new()
}

/// Walk parent pointers back from `end` and return the path in forward order.
fn reconstruct(
    parent: &HashMap<&StationCode, &StationCode>,
    start: &StationCode,
    end: &StationCode,
) -> Vec<StationCode> {
    let mut path = vec![end.clone()];
    let mut node = end;
    while node != start {
        match parent.get(node) {
            Some(&p) => {
                path.push(p.clone());
                node = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
