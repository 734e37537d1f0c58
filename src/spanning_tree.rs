//! Minimum spanning tree/forest: Borůvka, Prim, and Kruskal. All three
//! operate on undirected graphs and return the same total weight on any
//! given input, spanning within each connected component.

use std::cmp::Ordering;
use std::hash::Hash;

use crate::graph::{EdgeType, Graph, Undirected, Weightedness};
use crate::heap::AddressableBinaryHeap;
use crate::unionfind::UnionFind;

/// An edge of the spanning forest, by vertex index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEdge {
    pub u: usize,
    pub v: usize,
    pub weight: f64,
}

/// Total weight of a spanning forest's edges.
pub fn total_weight(edges: &[TreeEdge]) -> f64 {
    edges.iter().map(|e| e.weight).sum()
}

fn all_edges<V, Ty, W>(g: &Graph<V, Ty, W>) -> Vec<(usize, usize, f64)>
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let mut edges = Vec::new();
    for u in g.indices() {
        for (v, w) in g.neighbors(u) {
            if u < v {
                edges.push((u, v, w));
            }
        }
    }
    edges
}

/// Borůvka's algorithm: each phase, every live component picks its
/// cheapest outgoing edge; union all picks; repeat until the component
/// count stops shrinking (one component per connected component of the
/// input).
pub fn boruvka<V, W>(g: &Graph<V, Undirected, W>) -> Vec<TreeEdge>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let n = g.order();
    let mut uf = UnionFind::new(n);
    let edges = all_edges(g);
    let mut forest = Vec::new();
    loop {
        let mut best: Vec<Option<usize>> = vec![None; n];
        for (i, &(u, v, w)) in edges.iter().enumerate() {
            let ru = uf.find(u);
            let rv = uf.find(v);
            if ru == rv {
                continue;
            }
            for r in [ru, rv] {
                let improves = match best[r] {
                    None => true,
                    Some(j) => w < edges[j].2,
                };
                if improves {
                    best[r] = Some(i);
                }
            }
        }
        let mut progressed = false;
        let mut seen_this_phase = std::collections::HashSet::new();
        for cand in best.into_iter().flatten() {
            let (u, v, w) = edges[cand];
            if uf.same_set(u, v) {
                continue;
            }
            if !seen_this_phase.insert(cand) {
                continue;
            }
            uf.union(u, v);
            forest.push(TreeEdge { u, v, weight: w });
            progressed = true;
        }
        if !progressed {
            break;
        }
    }
    forest
}

/// Prim's algorithm, run from every unvisited vertex so disconnected
/// inputs yield a spanning forest. Uses an addressable binary heap keyed
/// by tentative connection cost.
pub fn prim<V, W>(g: &Graph<V, Undirected, W>) -> Vec<TreeEdge>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let n = g.order();
    let mut in_tree = vec![false; n];
    let mut forest = Vec::new();

    for root in g.indices() {
        if in_tree[root] {
            continue;
        }
        let cmp = |a: &(f64, usize, usize), b: &(f64, usize, usize)| {
            a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)
        };
        let mut heap = AddressableBinaryHeap::new(cmp);
        let mut handles = vec![None; n];
        let mut best_cost = vec![f64::INFINITY; n];
        best_cost[root] = 0.0;
        handles[root] = Some(heap.push((0.0, root, root)));

        while let Some((cost, from, v)) = heap.pop() {
            if in_tree[v] {
                continue;
            }
            in_tree[v] = true;
            if v != from {
                forest.push(TreeEdge { u: from, v, weight: cost });
            }
            for (n_idx, w) in g.neighbors(v) {
                if in_tree[n_idx] {
                    continue;
                }
                if w < best_cost[n_idx] {
                    best_cost[n_idx] = w;
                    match handles[n_idx] {
                        Some(h) => {
                            let _ = heap.decrease_key(h, (w, v, n_idx));
                        }
                        None => handles[n_idx] = Some(heap.push((w, v, n_idx))),
                    }
                }
            }
        }
    }
    forest
}

/// Kruskal's algorithm: sort all edges by weight, add a cross-component
/// edge via union-find, stop when the forest spans every component.
pub fn kruskal<V, W>(g: &Graph<V, Undirected, W>) -> Vec<TreeEdge>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let n = g.order();
    let mut uf = UnionFind::new(n);
    let mut edges = all_edges(g);
    edges.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal));
    let mut forest = Vec::new();
    for (u, v, w) in edges {
        if uf.union(u, v) {
            forest.push(TreeEdge { u, v, weight: w });
            if forest.len() == n.saturating_sub(1) {
                break;
            }
        }
    }
    forest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StorageKind;

    fn sample() -> Graph<i32, Undirected> {
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..5 {
            g.add_vertex(v).unwrap();
        }
        for &(u, v, w) in &[
            (0, 1, 2.0),
            (0, 2, 3.0),
            (1, 2, 1.0),
            (1, 3, 4.0),
            (2, 4, 5.0),
            (3, 4, 1.0),
        ] {
            g.set_edge(&u, &v, w).unwrap();
        }
        g
    }

    /// Property 9: all three MST algorithms produce trees of equal total
    /// weight.
    #[test]
    fn all_three_agree_on_total_weight() {
        let g = sample();
        let b = total_weight(&boruvka(&g));
        let p = total_weight(&prim(&g));
        let k = total_weight(&kruskal(&g));
        assert!((b - p).abs() < 1e-9);
        assert!((p - k).abs() < 1e-9);
    }

    #[test]
    fn forest_spans_each_component() {
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..4 {
            g.add_vertex(v).unwrap();
        }
        g.set_edge(&0, &1, 1.0).unwrap();
        g.set_edge(&2, &3, 2.0).unwrap();
        assert_eq!(kruskal(&g).len(), 2);
        assert_eq!(prim(&g).len(), 2);
        assert_eq!(boruvka(&g).len(), 2);
    }
}
