//! Augmenting-path strategies pluggable into the Ford-Fulkerson driver:
//! Edmonds-Karp (shortest augmenting path by hop count), Dinic (blocking
//! flow over a BFS layer graph), and Karzanov (preflow-push restricted to
//! one layer graph per phase).

use std::collections::{HashMap, VecDeque};

use super::residual::{ArcMap, EPSILON};
use super::AugmentResult;

fn bfs_levels(residual: &ArcMap, s: usize) -> Vec<Option<usize>> {
    let n = residual.len();
    let mut level = vec![None; n];
    level[s] = Some(0);
    let mut queue = VecDeque::new();
    queue.push_back(s);
    while let Some(u) = queue.pop_front() {
        let lu = level[u].expect("queued vertex has a level");
        for (v, cap) in residual.neighbors(u) {
            if cap > EPSILON && level[v].is_none() {
                level[v] = Some(lu + 1);
                queue.push_back(v);
            }
        }
    }
    level
}

/// BFS from `s` in the residual graph; if `t` is reached, return that
/// single shortest (by hop count) path with its bottleneck capacity.
pub fn edmonds_karp(residual: &ArcMap, s: usize, t: usize) -> AugmentResult {
    let n = residual.len();
    let mut pred = vec![None; n];
    let mut visited = vec![false; n];
    visited[s] = true;
    let mut queue = VecDeque::new();
    queue.push_back(s);
    while let Some(u) = queue.pop_front() {
        if u == t {
            break;
        }
        for (v, cap) in residual.neighbors(u) {
            if cap > EPSILON && !visited[v] {
                visited[v] = true;
                pred[v] = Some(u);
                queue.push_back(v);
            }
        }
    }
    if !visited[t] {
        return Err(());
    }
    let mut path = Vec::new();
    let mut bottleneck = f64::INFINITY;
    let mut v = t;
    while let Some(u) = pred[v] {
        bottleneck = bottleneck.min(residual.capacity(u, v));
        path.push((u, v));
        v = u;
    }
    path.reverse();
    Ok(path.into_iter().map(|(u, v)| (u, v, bottleneck)).collect())
}

fn dfs_path(
    scratch: &ArcMap,
    u: usize,
    t: usize,
    level: &[Option<usize>],
    ptr: &mut [usize],
    path: &mut Vec<(usize, usize)>,
) -> bool {
    if u == t {
        return true;
    }
    while ptr[u] < scratch.out_degree(u) {
        if let Some((v, cap)) = scratch.arc_at(u, ptr[u]) {
            let on_layer = level[v] == level[u].map(|l| l + 1);
            if cap > EPSILON && on_layer {
                path.push((u, v));
                if dfs_path(scratch, v, t, level, ptr, path) {
                    return true;
                }
                path.pop();
            }
        }
        ptr[u] += 1;
    }
    false
}

/// One blocking-flow phase over the BFS layer graph: repeatedly DFS for a
/// path using per-vertex current-pointers (dead edges are never revisited
/// within a phase), saturating as it goes, until no path remains. Returns
/// the aggregated per-edge steps for the whole phase.
pub fn dinic(residual: &ArcMap, s: usize, t: usize) -> AugmentResult {
    let level = bfs_levels(residual, s);
    if level[t].is_none() {
        return Err(());
    }
    let n = residual.len();
    let mut scratch = residual.clone();
    let mut ptr = vec![0usize; n];
    let mut steps: HashMap<(usize, usize), f64> = HashMap::new();

    loop {
        let mut path = Vec::new();
        if !dfs_path(&scratch, s, t, &level, &mut ptr, &mut path) {
            break;
        }
        let bottleneck = path
            .iter()
            .map(|&(u, v)| scratch.capacity(u, v))
            .fold(f64::INFINITY, f64::min);
        for &(u, v) in &path {
            let remaining = scratch.capacity(u, v) - bottleneck;
            scratch.set_arc(u, v, remaining.max(0.0));
            *steps.entry((u, v)).or_insert(0.0) += bottleneck;
        }
    }

    if steps.is_empty() {
        Err(())
    } else {
        Ok(steps.into_iter().map(|((u, v), d)| (u, v, d)).collect())
    }
}

/// One preflow-push phase restricted to the BFS layer graph: saturate
/// every layer edge out of `s`, then a forward sweep in BFS order pushes
/// each overflowed vertex's excess along its current-pointer layer edges
/// (partial pushes allowed), and a reverse sweep in reverse BFS order
/// returns any excess still stuck at a non-sink vertex back along the
/// arcs that put it there, freezing that vertex.
pub fn karzanov(residual: &ArcMap, s: usize, t: usize) -> AugmentResult {
    let level = bfs_levels(residual, s);
    if level[t].is_none() {
        return Err(());
    }
    let n = residual.len();
    let mut order: Vec<usize> = (0..n).filter(|&v| level[v].is_some() && v != s).collect();
    order.sort_by_key(|&v| level[v].unwrap());

    let mut scratch = residual.clone();
    let mut excess = vec![0.0f64; n];
    let mut ptr = vec![0usize; n];
    // Chronological log of pushes `(from, to, amount)`, plus an index of
    // log positions keyed by `to` so give-back can walk a vertex's
    // incoming pushes in reverse order.
    let mut log: Vec<(usize, usize, f64)> = Vec::new();
    let mut by_head: HashMap<usize, Vec<usize>> = HashMap::new();

    let on_layer = |level: &[Option<usize>], u: usize, v: usize| level[v] == level[u].map(|l| l + 1);

    // Saturate every layer edge leaving s.
    let s_edges: Vec<(usize, f64)> = scratch
        .neighbors(s)
        .filter(|&(v, cap)| cap > EPSILON && on_layer(&level, s, v))
        .collect();
    for (v, cap) in s_edges {
        scratch.set_arc(s, v, 0.0);
        excess[v] += cap;
        by_head.entry(v).or_default().push(log.len());
        log.push((s, v, cap));
    }

    for &v in &order {
        if v == t {
            continue;
        }
        while excess[v] > EPSILON && ptr[v] < scratch.out_degree(v) {
            if let Some((w, cap)) = scratch.arc_at(v, ptr[v]) {
                if cap > EPSILON && on_layer(&level, v, w) {
                    let pushed = excess[v].min(cap);
                    scratch.set_arc(v, w, cap - pushed);
                    excess[v] -= pushed;
                    excess[w] += pushed;
                    by_head.entry(w).or_default().push(log.len());
                    log.push((v, w, pushed));
                    if (cap - pushed).abs() < EPSILON {
                        ptr[v] += 1;
                    }
                    continue;
                }
            }
            ptr[v] += 1;
        }
    }

    // Reverse sweep: give back any excess still stuck at a non-sink
    // vertex, most recent push first, then freeze it.
    for &v in order.iter().rev() {
        if v == t {
            continue;
        }
        while excess[v] > EPSILON {
            let Some(&idx) = by_head.get(&v).and_then(|entries| entries.last()) else {
                break;
            };
            by_head.get_mut(&v).unwrap().pop();
            let (from, _, amount) = log[idx];
            let give_back = excess[v].min(amount);
            log[idx].2 -= give_back;
            excess[v] -= give_back;
            if from != s {
                excess[from] += give_back;
            }
        }
    }

    let mut steps: HashMap<(usize, usize), f64> = HashMap::new();
    for (u, v, amount) in log {
        if amount > EPSILON {
            *steps.entry((u, v)).or_insert(0.0) += amount;
        }
    }
    if steps.is_empty() {
        Err(())
    } else {
        Ok(steps.into_iter().map(|((u, v), d)| (u, v, d)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{build_residual, ford_fulkerson};
    use crate::graph::{Directed, Graph, StorageKind};

    fn diamond() -> (Graph<&'static str, Directed>, usize, usize) {
        let mut g: Graph<&str, Directed> = Graph::new(StorageKind::AdjList);
        for name in ["s", "a", "b", "t"] {
            g.add_vertex(name).unwrap();
        }
        for &(u, v, w) in &[("s", "a", 3.0), ("s", "b", 2.0), ("a", "b", 1.0), ("a", "t", 2.0), ("b", "t", 3.0)] {
            g.set_edge(&u, &v, w).unwrap();
        }
        let s = g.index_of(&"s").unwrap();
        let t = g.index_of(&"t").unwrap();
        (g, s, t)
    }

    #[test]
    fn edmonds_karp_finds_max_flow() {
        let (g, s, t) = diamond();
        let mut residual = build_residual(&g);
        let result = ford_fulkerson(&mut residual, s, t, edmonds_karp).unwrap();
        assert!((result.value - 5.0).abs() < 1e-6);
    }

    #[test]
    fn dinic_finds_max_flow() {
        let (g, s, t) = diamond();
        let mut residual = build_residual(&g);
        let result = ford_fulkerson(&mut residual, s, t, dinic).unwrap();
        assert!((result.value - 5.0).abs() < 1e-6);
    }

    #[test]
    fn karzanov_finds_max_flow() {
        let (g, s, t) = diamond();
        let mut residual = build_residual(&g);
        let result = ford_fulkerson(&mut residual, s, t, karzanov).unwrap();
        assert!((result.value - 5.0).abs() < 1e-6);
    }
}
