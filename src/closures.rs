//! Closure operators: k-core extraction, transitive closure, and the
//! Chvátal-Bondy Hamiltonicity-sufficient closure.

use std::hash::Hash;

use crate::graph::{Directed, EdgeType, Graph, Undirected, Weightedness};

/// Repeatedly strip vertices of degree < `k` (tracked with a bucket queue
/// keyed by current degree) until none remain or the graph is empty.
/// Returns the induced subgraph of survivors.
pub fn k_core<V, W>(g: &Graph<V, Undirected, W>, k: usize) -> Graph<V, Undirected, W>
where
    V: Eq + Hash + Clone + std::fmt::Debug,
    W: Weightedness,
{
    let n = g.order();
    let mut degree: Vec<usize> = (0..n).map(|v| g.neighbors(v).len()).collect();
    let mut removed = vec![false; n];

    // Bucket queue keyed by "already below the k threshold": a vertex is
    // enqueued the moment its degree first drops under k, and processed
    // in FIFO order — a degenerate two-bucket queue (>=k / <k) since only
    // the threshold crossing, not the exact degree, ever needs checking.
    let mut queue: std::collections::VecDeque<usize> = (0..n).filter(|&v| degree[v] < k).collect();
    let mut in_queue = vec![false; n];
    for &v in &queue {
        in_queue[v] = true;
    }

    while let Some(v) = queue.pop_front() {
        if removed[v] {
            continue;
        }
        removed[v] = true;
        for (w, _) in g.neighbors(v) {
            if !removed[w] {
                degree[w] = degree[w].saturating_sub(1);
                if degree[w] < k && !in_queue[w] {
                    in_queue[w] = true;
                    queue.push_back(w);
                }
            }
        }
    }
    let survivors: Vec<usize> = (0..n).filter(|&v| !removed[v]).collect();
    g.induced_subgraph(&survivors).0
}

/// Transitive closure (boolean reachability) via the Floyd-Warshall
/// recurrence: `closure[i][j]` is true iff some directed path from `i` to
/// `j` exists (including the trivial `i == j` path).
pub fn transitive_closure<V, W>(g: &Graph<V, Directed, W>) -> Vec<Vec<bool>>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let n = g.order();
    let mut reach = vec![vec![false; n]; n];
    for v in 0..n {
        reach[v][v] = true;
    }
    for u in g.indices() {
        for (v, _) in g.neighbors(u) {
            reach[u][v] = true;
        }
    }
    for k in 0..n {
        for i in 0..n {
            if reach[i][k] {
                for j in 0..n {
                    if reach[k][j] {
                        reach[i][j] = true;
                    }
                }
            }
        }
    }
    reach
}

/// The Chvátal-Bondy closure: repeatedly add edge `(u, v)` whenever
/// `deg(u) + deg(v) >= n` and the edge is absent, until no such pair
/// remains. If the closure is the complete graph, the original graph is
/// Hamiltonian (the classical sufficient condition); this function
/// returns the closure itself so callers can make that check.
pub fn chvatal_bondy_closure<V, W>(g: &Graph<V, Undirected, W>) -> Graph<V, Undirected, W>
where
    V: Eq + Hash + Clone + std::fmt::Debug,
    W: Weightedness,
{
    let mut closure = g.convert(g.storage_kind());
    let n = closure.order();
    loop {
        let degree: Vec<usize> = (0..n).map(|v| closure.neighbors(v).len()).collect();
        let mut added = false;
        'pairs: for u in 0..n {
            for v in (u + 1)..n {
                if degree[u] + degree[v] >= n && !closure.has_edge(closure.name(u), closure.name(v)) {
                    let un = closure.name(u).clone();
                    let vn = closure.name(v).clone();
                    closure.set_edge(&un, &vn, 1.0).expect("u != v by construction");
                    added = true;
                    break 'pairs;
                }
            }
        }
        if !added {
            break;
        }
    }
    closure
}

/// Whether `closure`'s underlying graph is complete (every pair of
/// distinct vertices adjacent) — the Chvátal-Bondy Hamiltonicity test.
pub fn is_complete<V, Ty, W>(g: &Graph<V, Ty, W>) -> bool
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let n = g.order();
    (0..n).all(|v| g.neighbors(v).len() == n - 1)
}
