//! Shortest-path algorithms: unweighted BFS-hop, linear-time DAG
//! relaxation, Dijkstra (Fibonacci-heap backed), Bellman-Ford, Johnson's
//! all-pairs reweighting, and Floyd-Warshall.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::graph::{Directed, EdgeType, Graph, Weightedness};
use crate::heap::FibonacciHeap;
use crate::search::topological_sort;

/// The outcome of a single-source shortest-path run: a distance (or
/// `f64::INFINITY` if unreachable) and predecessor per vertex.
#[derive(Debug, Clone)]
pub struct Distances {
    pub dist: Vec<f64>,
    pub predecessor: Vec<Option<usize>>,
}

impl Distances {
    /// Reconstruct the path to `target`, or `None` if unreachable.
    pub fn path_to(&self, source: usize, target: usize) -> Option<Vec<usize>> {
        if self.dist[target].is_infinite() {
            return None;
        }
        let mut path = vec![target];
        let mut cur = target;
        while cur != source {
            cur = self.predecessor[cur]?;
            path.push(cur);
        }
        path.reverse();
        Some(path)
    }
}

fn empty_distances(n: usize, source: usize) -> Distances {
    let mut dist = vec![f64::INFINITY; n];
    dist[source] = 0.0;
    Distances {
        dist,
        predecessor: vec![None; n],
    }
}

/// Unweighted shortest paths (hop count), by BFS.
pub fn bfs_hop<V, Ty, W>(g: &Graph<V, Ty, W>, source: usize) -> Distances
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let n = g.order();
    let mut out = empty_distances(n, source);
    let mut queue = VecDeque::new();
    queue.push_back(source);
    let mut visited = vec![false; n];
    visited[source] = true;
    while let Some(v) = queue.pop_front() {
        for (w, _) in g.neighbors(v) {
            if !visited[w] {
                visited[w] = true;
                out.dist[w] = out.dist[v] + 1.0;
                out.predecessor[w] = Some(v);
                queue.push_back(w);
            }
        }
    }
    out
}

/// Linear-time single-source shortest paths on a DAG: relax every edge
/// exactly once, in topological order. Correct even with negative weights.
pub fn dag_relax<V, W>(g: &Graph<V, Directed, W>, source: usize) -> Result<Distances>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let order = topological_sort(g)?;
    let n = g.order();
    let mut out = empty_distances(n, source);
    let start_pos = order.iter().position(|&v| v == source).unwrap_or(order.len());
    for &v in order.iter().skip(start_pos) {
        if out.dist[v].is_infinite() {
            continue;
        }
        for (w, weight) in g.neighbors(v) {
            let cand = out.dist[v] + weight;
            if cand < out.dist[w] {
                out.dist[w] = cand;
                out.predecessor[w] = Some(v);
            }
        }
    }
    Ok(out)
}

/// Dijkstra's algorithm, backed by a Fibonacci heap. Fails with
/// `Error::InvalidInput` if any edge has a negative weight.
pub fn dijkstra<V, Ty, W>(g: &Graph<V, Ty, W>, source: usize) -> Result<Distances>
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let n = g.order();
    for v in g.indices() {
        for (_, w) in g.neighbors(v) {
            if w < 0.0 {
                return Err(Error::InvalidInput("dijkstra requires non-negative weights".into()));
            }
        }
    }
    let mut out = empty_distances(n, source);
    let cmp = |a: &(f64, usize), b: &(f64, usize)| {
        a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)
    };
    let mut heap = FibonacciHeap::new(cmp);
    let mut handles = Vec::with_capacity(n);
    for v in g.indices() {
        let d = if v == source { 0.0 } else { f64::INFINITY };
        handles.push(heap.push((d, v)));
    }
    let mut settled = vec![false; n];
    while let Some((d, v)) = heap.pop() {
        if settled[v] || d.is_infinite() {
            continue;
        }
        settled[v] = true;
        for (w, weight) in g.neighbors(v) {
            if settled[w] {
                continue;
            }
            let cand = d + weight;
            if cand < out.dist[w] {
                out.dist[w] = cand;
                out.predecessor[w] = Some(v);
                heap.decrease_key(handles[w], (cand, w))?;
            }
        }
    }
    Ok(out)
}

/// Bellman-Ford: V-1 relaxation sweeps with early exit, a V-th sweep
/// detecting a reachable negative cycle.
pub fn bellman_ford<V, Ty, W>(g: &Graph<V, Ty, W>, source: usize) -> Result<Distances>
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let n = g.order();
    let mut out = empty_distances(n, source);
    let edges: Vec<(usize, usize, f64)> = g
        .indices()
        .flat_map(|u| g.neighbors(u).into_iter().map(move |(v, w)| (u, v, w)))
        .collect();
    for sweep in 0..n.saturating_sub(1) {
        let mut changed = false;
        for &(u, v, w) in &edges {
            if out.dist[u].is_infinite() {
                continue;
            }
            let cand = out.dist[u] + w;
            if cand < out.dist[v] {
                out.dist[v] = cand;
                out.predecessor[v] = Some(u);
                changed = true;
            }
        }
        tracing::trace!(sweep, changed, "bellman-ford relaxation sweep");
        if !changed {
            break;
        }
    }
    for &(u, v, w) in &edges {
        if !out.dist[u].is_infinite() && out.dist[u] + w < out.dist[v] {
            return Err(Error::InvariantViolated("negative cycle detected".into()));
        }
    }
    Ok(out)
}

/// All-pairs shortest paths via Floyd-Warshall. Returns `dist[u][v]`, or
/// `Error::InvariantViolated` if a negative cycle is detected (some
/// `dist[v][v] < 0`).
pub fn floyd_warshall<V, Ty, W>(g: &Graph<V, Ty, W>) -> Result<Vec<Vec<f64>>>
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let n = g.order();
    let mut dist = vec![vec![f64::INFINITY; n]; n];
    for v in 0..n {
        dist[v][v] = 0.0;
    }
    for u in g.indices() {
        for (v, w) in g.neighbors(u) {
            if w < dist[u][v] {
                dist[u][v] = w;
            }
        }
    }
    for k in 0..n {
        for i in 0..n {
            if dist[i][k].is_infinite() {
                continue;
            }
            for j in 0..n {
                if dist[k][j].is_infinite() {
                    continue;
                }
                let cand = dist[i][k] + dist[k][j];
                if cand < dist[i][j] {
                    dist[i][j] = cand;
                }
            }
        }
    }
    for v in 0..n {
        if dist[v][v] < 0.0 {
            return Err(Error::InvariantViolated("negative cycle detected".into()));
        }
    }
    Ok(dist)
}

/// All-pairs shortest paths via Johnson's algorithm: a Bellman-Ford run
/// from a synthetic super-source reweights every edge non-negative, then
/// Dijkstra runs from each original vertex and results are un-reweighted.
/// Returns `Error::InvariantViolated` if the graph has a negative cycle.
pub fn johnson<V, Ty, W>(g: &Graph<V, Ty, W>) -> Result<Vec<Vec<f64>>>
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let n = g.order();
    // h[v]: shortest distance from the synthetic source (zero-weight arcs
    // to every vertex) to v, via Bellman-Ford on the real edges plus those
    // synthetic arcs (which can never themselves create a negative cycle).
    let edges: Vec<(usize, usize, f64)> = g
        .indices()
        .flat_map(|u| g.neighbors(u).into_iter().map(move |(v, w)| (u, v, w)))
        .collect();
    let mut h = vec![0.0f64; n];
    for _ in 0..n {
        let mut changed = false;
        for &(u, v, w) in &edges {
            let cand = h[u] + w;
            if cand < h[v] {
                h[v] = cand;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    for &(u, v, w) in &edges {
        if h[u] + w < h[v] {
            return Err(Error::InvariantViolated("negative cycle detected".into()));
        }
    }
    let mut reweighted = g.convert(g.storage_kind());
    for u in g.indices() {
        let uname = reweighted.name(u).clone();
        for (v, w) in g.neighbors(u) {
            let vname = reweighted.name(v).clone();
            reweighted.set_edge(&uname, &vname, w + h[u] - h[v])?;
        }
    }
    let mut result = vec![vec![f64::INFINITY; n]; n];
    for s in g.indices() {
        let d = dijkstra(&reweighted, s)?;
        for t in g.indices() {
            if !d.dist[t].is_infinite() {
                result[s][t] = d.dist[t] - h[s] + h[t];
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StorageKind;

    /// S2: distances {0,1,3,4,7}; predecessor chain to 4 is 0->1->2->3->4.
    #[test]
    fn s2_dijkstra_scenario() {
        let mut g: Graph<usize, Directed> = Graph::new(StorageKind::AdjList);
        for v in 0..5 {
            g.add_vertex(v).unwrap();
        }
        for &(u, v, w) in &[
            (0, 1, 1.0),
            (0, 2, 4.0),
            (1, 2, 2.0),
            (1, 3, 5.0),
            (2, 3, 1.0),
            (3, 4, 3.0),
        ] {
            g.set_edge(&u, &v, w).unwrap();
        }
        let d = dijkstra(&g, 0).unwrap();
        assert_eq!(d.dist, vec![0.0, 1.0, 3.0, 4.0, 7.0]);
        assert_eq!(d.path_to(0, 4).unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn dijkstra_rejects_negative_weights() {
        let mut g: Graph<usize, Directed> = Graph::new(StorageKind::AdjList);
        g.add_vertex(0).unwrap();
        g.add_vertex(1).unwrap();
        g.set_edge(&0, &1, -1.0).unwrap();
        assert!(dijkstra(&g, 0).is_err());
    }

    #[test]
    fn bellman_ford_matches_dijkstra_on_nonnegative_graph() {
        let mut g: Graph<usize, Directed> = Graph::new(StorageKind::AdjList);
        for v in 0..4 {
            g.add_vertex(v).unwrap();
        }
        for &(u, v, w) in &[(0, 1, 2.0), (1, 2, 2.0), (0, 2, 5.0), (2, 3, 1.0)] {
            g.set_edge(&u, &v, w).unwrap();
        }
        let a = dijkstra(&g, 0).unwrap();
        let b = bellman_ford(&g, 0).unwrap();
        assert_eq!(a.dist, b.dist);
    }

    #[test]
    fn bellman_ford_detects_negative_cycle() {
        let mut g: Graph<usize, Directed> = Graph::new(StorageKind::AdjList);
        for v in 0..3 {
            g.add_vertex(v).unwrap();
        }
        g.set_edge(&0, &1, 1.0).unwrap();
        g.set_edge(&1, &2, -3.0).unwrap();
        g.set_edge(&2, &0, 1.0).unwrap();
        assert!(bellman_ford(&g, 0).is_err());
    }

    #[test]
    fn floyd_warshall_matches_dijkstra() {
        let mut g: Graph<usize, Directed> = Graph::new(StorageKind::AdjList);
        for v in 0..4 {
            g.add_vertex(v).unwrap();
        }
        for &(u, v, w) in &[(0, 1, 2.0), (1, 2, 2.0), (0, 2, 5.0), (2, 3, 1.0)] {
            g.set_edge(&u, &v, w).unwrap();
        }
        let all = floyd_warshall(&g).unwrap();
        let single = dijkstra(&g, 0).unwrap();
        assert_eq!(all[0], single.dist);
    }

    #[test]
    fn dag_relax_handles_negative_weights() {
        let mut g: Graph<usize, Directed> = Graph::new(StorageKind::AdjList);
        for v in 0..3 {
            g.add_vertex(v).unwrap();
        }
        g.set_edge(&0, &1, -5.0).unwrap();
        g.set_edge(&1, &2, 2.0).unwrap();
        let d = dag_relax(&g, 0).unwrap();
        assert_eq!(d.dist, vec![0.0, -5.0, -3.0]);
    }
}
