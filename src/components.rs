//! Connectivity: connected-component labeling (union-find and BFS-forest
//! variants), Tarjan's strongly-connected-components algorithm, and
//! articulation points via DFS discovery time/lowpoint.

use std::hash::Hash;

use fixedbitset::FixedBitSet;

use crate::graph::{Directed, EdgeType, Graph, Undirected, Weightedness};
use crate::unionfind::UnionFind;

/// Connected-component id per vertex (0-based, arbitrary numbering), via
/// union-find over all edges.
pub fn connected_components<V, W>(g: &Graph<V, Undirected, W>) -> Vec<usize>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let n = g.order();
    let mut uf = UnionFind::new(n);
    for u in g.indices() {
        for (v, _) in g.neighbors(u) {
            uf.union(u, v);
        }
    }
    let mut label = vec![usize::MAX; n];
    let mut next_label = 0;
    let mut out = vec![0; n];
    for v in 0..n {
        let root = uf.find(v);
        let id = *label.get(root).unwrap_or(&usize::MAX);
        let id = if id == usize::MAX {
            let assigned = next_label;
            label[root] = assigned;
            next_label += 1;
            assigned
        } else {
            id
        };
        out[v] = id;
    }
    out
}

/// Connected components as explicit vertex sets, via a BFS forest.
pub fn connected_component_sets<V, W>(g: &Graph<V, Undirected, W>) -> Vec<Vec<usize>>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let n = g.order();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut out = Vec::new();
    for root in 0..n {
        if visited.contains(root) {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(root);
        visited.insert(root);
        while let Some(v) = queue.pop_front() {
            component.push(v);
            for (n_idx, _) in g.neighbors(v) {
                if !visited.contains(n_idx) {
                    visited.insert(n_idx);
                    queue.push_back(n_idx);
                }
            }
        }
        out.push(component);
    }
    out
}

struct Tarjan {
    index_counter: usize,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: FixedBitSet,
    stack: Vec<usize>,
    components: Vec<Vec<usize>>,
}

/// Tarjan's single-pass strongly-connected-components algorithm.
/// Components are returned in reverse topological order of the
/// condensation (the order Tarjan's stack-popping naturally produces).
pub fn strongly_connected_components<V, W>(g: &Graph<V, Directed, W>) -> Vec<Vec<usize>>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let n = g.order();
    let mut st = Tarjan {
        index_counter: 0,
        index: vec![None; n],
        lowlink: vec![0; n],
        on_stack: FixedBitSet::with_capacity(n),
        stack: Vec::new(),
        components: Vec::new(),
    };
    for v in 0..n {
        if st.index[v].is_none() {
            tarjan_strongconnect(g, v, &mut st);
        }
    }
    st.components
}

fn tarjan_strongconnect<V, W>(g: &Graph<V, Directed, W>, v: usize, st: &mut Tarjan)
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    st.index[v] = Some(st.index_counter);
    st.lowlink[v] = st.index_counter;
    st.index_counter += 1;
    st.stack.push(v);
    st.on_stack.insert(v);

    for (w, _) in g.neighbors(v) {
        if st.index[w].is_none() {
            tarjan_strongconnect(g, w, st);
            st.lowlink[v] = st.lowlink[v].min(st.lowlink[w]);
        } else if st.on_stack.contains(w) {
            st.lowlink[v] = st.lowlink[v].min(st.index[w].expect("on stack implies indexed"));
        }
    }

    if st.lowlink[v] == st.index[v].expect("v was indexed above") {
        let mut component = Vec::new();
        loop {
            let w = st.stack.pop().expect("component root is on the stack");
            st.on_stack.set(w, false);
            component.push(w);
            if w == v {
                break;
            }
        }
        st.components.push(component);
    }
}

struct ArticulationState {
    disc: Vec<Option<usize>>,
    low: Vec<usize>,
    timer: usize,
    is_articulation: Vec<bool>,
}

/// Articulation points of an undirected graph, via DFS discovery
/// time/lowpoint. A non-root vertex is an articulation point if it has a
/// child whose subtree cannot reach back above it; the root is one iff it
/// has more than one DFS-tree child.
pub fn articulation_points<V, W>(g: &Graph<V, Undirected, W>) -> Vec<usize>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let n = g.order();
    let mut st = ArticulationState {
        disc: vec![None; n],
        low: vec![0; n],
        timer: 0,
        is_articulation: vec![false; n],
    };
    for root in 0..n {
        if st.disc[root].is_none() {
            let mut root_children = 0;
            articulation_dfs(g, root, None, &mut st, &mut root_children);
            st.is_articulation[root] = root_children > 1;
        }
    }
    (0..n).filter(|&v| st.is_articulation[v]).collect()
}

fn articulation_dfs<V, W>(
    g: &Graph<V, Undirected, W>,
    v: usize,
    parent: Option<usize>,
    st: &mut ArticulationState,
    root_children: &mut usize,
) where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    st.disc[v] = Some(st.timer);
    st.low[v] = st.timer;
    st.timer += 1;
    let is_root = parent.is_none();

    for (w, _) in g.neighbors(v) {
        if Some(w) == parent {
            continue;
        }
        if let Some(w_disc) = st.disc[w] {
            st.low[v] = st.low[v].min(w_disc);
        } else {
            if is_root {
                *root_children += 1;
            }
            let mut dummy = 0;
            articulation_dfs(g, w, Some(v), st, if is_root { root_children } else { &mut dummy });
            st.low[v] = st.low[v].min(st.low[w]);
            if !is_root && st.low[w] >= st.disc[v].expect("v is discovered") {
                st.is_articulation[v] = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StorageKind;

    #[test]
    fn connected_components_label_disconnected_graph() {
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..5 {
            g.add_vertex(v).unwrap();
        }
        g.set_edge(&0, &1, 1.0).unwrap();
        g.set_edge(&2, &3, 1.0).unwrap();
        let labels = connected_components(&g);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
        assert_ne!(labels[0], labels[4]);
    }

    #[test]
    fn component_sets_partition_all_vertices() {
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..4 {
            g.add_vertex(v).unwrap();
        }
        g.set_edge(&0, &1, 1.0).unwrap();
        let sets = connected_component_sets(&g);
        let total: usize = sets.iter().map(|s| s.len()).sum();
        assert_eq!(total, 4);
        assert_eq!(sets.len(), 3);
    }

    #[test]
    fn tarjan_finds_cycle_as_one_component() {
        let mut g: Graph<i32, Directed> = Graph::new(StorageKind::AdjList);
        for v in 0..4 {
            g.add_vertex(v).unwrap();
        }
        g.set_edge(&0, &1, 1.0).unwrap();
        g.set_edge(&1, &2, 1.0).unwrap();
        g.set_edge(&2, &0, 1.0).unwrap();
        g.set_edge(&2, &3, 1.0).unwrap();
        let sccs = strongly_connected_components(&g);
        let sizes: Vec<usize> = sccs.iter().map(|c| c.len()).collect();
        assert!(sizes.contains(&3));
        assert!(sizes.contains(&1));
    }

    #[test]
    fn articulation_point_in_bridge_graph() {
        // 0-1-2 chain plus a triangle 2-3-4-2: vertex 2 is the cut vertex.
        let mut g: Graph<i32, Undirected> = Graph::new(StorageKind::AdjList);
        for v in 0..5 {
            g.add_vertex(v).unwrap();
        }
        g.set_edge(&0, &1, 1.0).unwrap();
        g.set_edge(&1, &2, 1.0).unwrap();
        g.set_edge(&2, &3, 1.0).unwrap();
        g.set_edge(&3, &4, 1.0).unwrap();
        g.set_edge(&4, &2, 1.0).unwrap();
        let points = articulation_points(&g);
        assert!(points.contains(&1));
        assert!(points.contains(&2));
        assert!(!points.contains(&3));
    }
}
