//! Bipartiteness and matching: two-coloring for the bipartite check, and
//! Hopcroft-Karp built directly on top of the max-flow driver rather than
//! a bespoke augmenting-path search.

use std::collections::VecDeque;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::flow::{edmonds_karp, ford_fulkerson, ArcMap};
use crate::graph::{Graph, Undirected, Weightedness};

/// Two-color `g` via BFS; returns the coloring if `g` is bipartite, or
/// `Error::InvariantViolated` on the first odd cycle found.
pub fn two_coloring<V, W>(g: &Graph<V, Undirected, W>) -> Result<Vec<bool>>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let n = g.order();
    let mut color: Vec<Option<bool>> = vec![None; n];
    for root in 0..n {
        if color[root].is_some() {
            continue;
        }
        color[root] = Some(true);
        let mut queue = VecDeque::new();
        queue.push_back(root);
        while let Some(v) = queue.pop_front() {
            let cv = color[v].expect("queued vertex is colored");
            for (w, _) in g.neighbors(v) {
                match color[w] {
                    None => {
                        color[w] = Some(!cv);
                        queue.push_back(w);
                    }
                    Some(cw) if cw == cv => {
                        return Err(Error::InvariantViolated("graph is not bipartite".into()));
                    }
                    Some(_) => {}
                }
            }
        }
    }
    Ok(color.into_iter().map(|c| c.unwrap_or(true)).collect())
}

/// Maximum-cardinality bipartite matching, computed literally as max-flow
/// on a unit-capacity network: a super-source arcs into every `left`
/// vertex, every `right` vertex arcs into a super-sink, and every
/// bipartite edge carries capacity 1. The saturated left->right arcs in
/// the resulting flow are the matching.
pub fn hopcroft_karp<V, W>(
    g: &Graph<V, Undirected, W>,
    left: &[usize],
    right: &[usize],
) -> Result<Vec<(usize, usize)>>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let n = g.order();
    let super_source = n;
    let super_sink = n + 1;
    let mut network: ArcMap = ArcMap::new(n + 2);
    for &l in left {
        network.add_to_arc(super_source, l, 1.0);
    }
    for &r in right {
        network.add_to_arc(r, super_sink, 1.0);
    }
    let right_set: std::collections::HashSet<usize> = right.iter().copied().collect();
    for &l in left {
        for (w, _) in g.neighbors(l) {
            if right_set.contains(&w) {
                network.add_to_arc(l, w, 1.0);
            }
        }
    }
    let result = ford_fulkerson(&mut network.clone(), super_source, super_sink, edmonds_karp)?;
    let mut matching = Vec::new();
    for &l in left {
        for &r in right {
            if result.flow.capacity(l, r) > crate::flow::EPSILON {
                matching.push((l, r));
            }
        }
    }
    Ok(matching)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StorageKind;

    #[test]
    fn two_coloring_detects_bipartite_graph() {
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..4 {
            g.add_vertex(v).unwrap();
        }
        g.set_edge(&0, &1, 1.0).unwrap();
        g.set_edge(&1, &2, 1.0).unwrap();
        g.set_edge(&2, &3, 1.0).unwrap();
        g.set_edge(&3, &0, 1.0).unwrap();
        let colors = two_coloring(&g).unwrap();
        assert_ne!(colors[0], colors[1]);
        assert_eq!(colors[0], colors[2]);
    }

    #[test]
    fn two_coloring_rejects_odd_cycle() {
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..3 {
            g.add_vertex(v).unwrap();
        }
        g.set_edge(&0, &1, 1.0).unwrap();
        g.set_edge(&1, &2, 1.0).unwrap();
        g.set_edge(&2, &0, 1.0).unwrap();
        assert!(two_coloring(&g).is_err());
    }

    #[test]
    fn hopcroft_karp_finds_perfect_matching() {
        // left {0,1,2}, right {3,4,5}, edges form a perfect matching.
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..6 {
            g.add_vertex(v).unwrap();
        }
        for &(u, v) in &[(0, 3), (0, 4), (1, 4), (1, 5), (2, 3), (2, 5)] {
            g.set_edge(&u, &v, 1.0).unwrap();
        }
        let matching = hopcroft_karp(&g, &[0, 1, 2], &[3, 4, 5]).unwrap();
        assert_eq!(matching.len(), 3);
        let matched_left: std::collections::HashSet<usize> = matching.iter().map(|&(l, _)| l).collect();
        assert_eq!(matched_left.len(), 3);
    }
}
