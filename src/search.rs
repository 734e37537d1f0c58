//! Traversal primitives: DFS (with enter/backtrack callbacks and a forest
//! variant), BFS, Kahn's topological sort, and lexicographic BFS via
//! partition refinement.

use std::collections::VecDeque;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::graph::{EdgeType, Graph, Weightedness};

/// Depth-first traversal from `start`. `on_visit(v)` fires the first time
/// `v` is reached; returning `true` stops the whole traversal early.
/// `on_backtrack(parent, child)` fires as the recursion unwinds back over
/// edge `(parent, child)`.
pub fn dfs<V, Ty, W>(
    g: &Graph<V, Ty, W>,
    start: usize,
    mut on_visit: impl FnMut(usize) -> bool,
    mut on_backtrack: impl FnMut(usize, usize),
) -> Vec<bool>
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let mut visited = vec![false; g.order()];
    dfs_from(g, start, &mut visited, &mut on_visit, &mut on_backtrack);
    visited
}

fn dfs_from<V, Ty, W>(
    g: &Graph<V, Ty, W>,
    v: usize,
    visited: &mut Vec<bool>,
    on_visit: &mut impl FnMut(usize) -> bool,
    on_backtrack: &mut impl FnMut(usize, usize),
) -> bool
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    visited[v] = true;
    if on_visit(v) {
        return true;
    }
    for (n, _) in g.neighbors(v) {
        if !visited[n] {
            if dfs_from(g, n, visited, on_visit, on_backtrack) {
                return true;
            }
            on_backtrack(v, n);
        }
    }
    false
}

/// Run DFS from every unvisited vertex in index order, producing a forest.
/// `on_finish_root(root)` fires after a root's whole tree has been
/// explored (whether or not the traversal in that tree was stopped early
/// by `on_visit`).
pub fn depth_first_forest<V, Ty, W>(
    g: &Graph<V, Ty, W>,
    mut on_visit: impl FnMut(usize) -> bool,
    mut on_backtrack: impl FnMut(usize, usize),
    mut on_finish_root: impl FnMut(usize),
) -> Vec<bool>
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let mut visited = vec![false; g.order()];
    for root in g.indices() {
        if !visited[root] {
            dfs_from(g, root, &mut visited, &mut on_visit, &mut on_backtrack);
            on_finish_root(root);
        }
    }
    visited
}

/// Breadth-first traversal from `start`. `on_visit(v)` fires when `v` is
/// dequeued; returning `true` stops the traversal early. Vertices within a
/// layer are visited in `neighbors(v)` order.
pub fn bfs<V, Ty, W>(g: &Graph<V, Ty, W>, start: usize, mut on_visit: impl FnMut(usize) -> bool) -> Vec<bool>
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let mut visited = vec![false; g.order()];
    let mut queue = VecDeque::new();
    visited[start] = true;
    queue.push_back(start);
    while let Some(v) = queue.pop_front() {
        if on_visit(v) {
            break;
        }
        for (n, _) in g.neighbors(v) {
            if !visited[n] {
                visited[n] = true;
                queue.push_back(n);
            }
        }
    }
    visited
}

/// Kahn's algorithm. Returns a topological order of all vertices, or
/// `Error::InvariantViolated` if the graph is not a DAG.
pub fn topological_sort<V, Ty, W>(g: &Graph<V, Ty, W>) -> Result<Vec<usize>>
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let n = g.order();
    let mut indegree = vec![0usize; n];
    for v in g.indices() {
        for (n, _) in g.neighbors(v) {
            indegree[n] += 1;
        }
    }
    let mut queue: VecDeque<usize> = (0..n).filter(|&v| indegree[v] == 0).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(v) = queue.pop_front() {
        order.push(v);
        for (n, _) in g.neighbors(v) {
            indegree[n] -= 1;
            if indegree[n] == 0 {
                queue.push_back(n);
            }
        }
    }
    if order.len() < n {
        return Err(Error::InvariantViolated("graph is not a DAG".into()));
    }
    Ok(order)
}

/// Lexicographic BFS via partition refinement. Returns a vertex ordering
/// in which, for any two vertices, the one visited earlier is
/// "lexicographically larger" with respect to the set of already-visited
/// neighbors — the classical LexBFS order used by chordal-graph
/// recognition and similar algorithms.
pub fn lex_bfs<V, Ty, W>(g: &Graph<V, Ty, W>) -> Vec<usize>
where
    V: Eq + Hash + Clone,
    Ty: EdgeType,
    W: Weightedness,
{
    let n = g.order();
    if n == 0 {
        return Vec::new();
    }
    // Partition: ordered list of non-empty sets of vertices. `set_of[v]`
    // names the partition-list index currently containing v.
    let mut partition: Vec<Vec<usize>> = vec![(0..n).collect()];
    let mut set_of = vec![0usize; n];
    let mut order = Vec::with_capacity(n);

    for _ in 0..n {
        let front = partition.first().expect("non-empty while vertices remain");
        let pivot = *front.last().expect("partition sets are never empty");
        order.push(pivot);

        // Remove the pivot from its set.
        let pivot_set = set_of[pivot];
        partition[pivot_set].pop();

        let neighbors: std::collections::HashSet<usize> =
            g.neighbors(pivot).into_iter().map(|(n, _)| n).collect();

        let mut new_partition: Vec<Vec<usize>> = Vec::with_capacity(partition.len() * 2);
        for set in partition.into_iter() {
            if set.is_empty() {
                continue;
            }
            let (in_n, out_n): (Vec<usize>, Vec<usize>) =
                set.into_iter().partition(|v| neighbors.contains(v));
            if !in_n.is_empty() {
                new_partition.push(in_n);
            }
            if !out_n.is_empty() {
                new_partition.push(out_n);
            }
        }
        partition = new_partition;
        for (idx, set) in partition.iter().enumerate() {
            for &v in set {
                set_of[v] = idx;
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Directed, StorageKind, Undirected};

    fn line_graph() -> Graph<i32, Directed> {
        let mut g: Graph<i32, Directed> = Graph::new(StorageKind::AdjList);
        for v in 0..5 {
            g.add_vertex(v).unwrap();
        }
        for &(u, v) in &[(0, 1), (1, 2), (2, 3), (3, 4)] {
            g.set_edge(&u, &v, 1.0).unwrap();
        }
        g
    }

    #[test]
    fn dfs_visits_all_reachable() {
        let g = line_graph();
        let visited = dfs(&g, 0, |_| false, |_, _| {});
        assert!(visited.iter().all(|&b| b));
    }

    #[test]
    fn dfs_early_termination_stops() {
        let g = line_graph();
        let mut seen = Vec::new();
        dfs(
            &g,
            0,
            |v| {
                seen.push(v);
                v == 2
            },
            |_, _| {},
        );
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn bfs_visits_in_layer_order() {
        let g = line_graph();
        let mut order = Vec::new();
        bfs(&g, 0, |v| {
            order.push(v);
            false
        });
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn depth_first_forest_covers_disconnected_graph() {
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..4 {
            g.add_vertex(v).unwrap();
        }
        g.set_edge(&0, &1, 1.0).unwrap();
        let mut roots = Vec::new();
        let visited = depth_first_forest(&g, |_| false, |_, _| {}, |r| roots.push(r));
        assert!(visited.iter().all(|&b| b));
        assert_eq!(roots, vec![0, 2, 3]);
    }

    /// S3: a, b, c, d, e with (a->b),(a->c),(b->d),(c->d),(d->e); adding
    /// e->a must fail with "not a DAG."
    #[test]
    fn s3_topological_sort_scenario() {
        let mut g: Graph<&str, Directed> = Graph::new(StorageKind::AdjList);
        for name in ["a", "b", "c", "d", "e"] {
            g.add_vertex(name).unwrap();
        }
        for &(u, v) in &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "e")] {
            g.set_edge(&u, &v, 1.0).unwrap();
        }
        let order = topological_sort(&g).unwrap();
        let pos: std::collections::HashMap<usize, usize> =
            order.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        for &(u, v) in &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("d", "e")] {
            let ui = g.index_of(&u).unwrap();
            let vi = g.index_of(&v).unwrap();
            assert!(pos[&ui] < pos[&vi]);
        }
        g.set_edge(&"e", &"a", 1.0).unwrap();
        assert!(topological_sort(&g).is_err());
    }

    #[test]
    fn lex_bfs_visits_every_vertex_once() {
        let g = line_graph();
        let order = lex_bfs(&g);
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }
}
