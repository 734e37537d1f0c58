//! Flow core: residual-graph representation, the Ford-Fulkerson driver,
//! pluggable augmenting-path strategies (Edmonds-Karp, Dinic, Karzanov),
//! and min-cut extraction.

mod residual;
mod strategies;

pub use residual::{ArcMap, EPSILON};
pub use strategies::{dinic, edmonds_karp, karzanov};

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::graph::{Directed, EdgeType, Graph, Weightedness};
use crate::search::bfs;

/// One augmenting step: increase flow on arc `(u, v)` by `delta`.
pub type Step = (usize, usize, f64);

/// A strategy signals "no augmenting path remains" with `Err(())`; this
/// is the internal control-flow sentinel of 4.L.2, never surfaced to
/// callers of [`max_flow`].
pub type AugmentResult = std::result::Result<Vec<Step>, ()>;

/// The result of running a max-flow computation: the achieved value and
/// the net flow on each original arc.
#[derive(Debug, Clone)]
pub struct MaxFlowResult {
    pub value: f64,
    pub flow: ArcMap,
}

/// Build the initial residual graph from `g`'s arcs (their weights are
/// capacities).
pub fn build_residual<V, W>(g: &Graph<V, Directed, W>) -> ArcMap
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let mut residual = ArcMap::new(g.order());
    for u in g.indices() {
        for (v, cap) in g.neighbors(u) {
            residual.add_to_arc(u, v, cap);
        }
    }
    residual
}

/// Flow conservation must hold at every vertex in `steps` other than `s`
/// and `t`: what flows in must flow out.
fn verify_conservation(steps: &[Step], s: usize, t: usize) -> Result<()> {
    let mut net: HashMap<usize, f64> = HashMap::new();
    for &(u, v, delta) in steps {
        *net.entry(u).or_insert(0.0) -= delta;
        *net.entry(v).or_insert(0.0) += delta;
    }
    for (&v, &amount) in &net {
        if v == s || v == t {
            continue;
        }
        if amount.abs() > 1e-6 {
            return Err(Error::InvariantViolated(format!(
                "flow conservation violated at vertex {v}: net {amount}"
            )));
        }
    }
    Ok(())
}

/// The Ford-Fulkerson driver: repeatedly call `augment` to obtain a batch
/// of augmenting steps, verify conservation, fold them into `residual`
/// and the running flow ledger, until `augment` reports no path left.
pub fn ford_fulkerson(
    residual: &mut ArcMap,
    s: usize,
    t: usize,
    mut augment: impl FnMut(&ArcMap, usize, usize) -> AugmentResult,
) -> Result<MaxFlowResult> {
    let n = residual.len();
    let mut flow = ArcMap::new(n);
    let mut value = 0.0;
    let mut iteration = 0usize;
    loop {
        let steps = match augment(residual, s, t) {
            Err(()) => break,
            Ok(steps) => steps,
        };
        if steps.is_empty() {
            break;
        }
        iteration += 1;
        tracing::trace!(iteration, steps = steps.len(), "ford-fulkerson augmenting batch");
        verify_conservation(&steps, s, t)?;
        for (u, v, delta) in steps {
            if delta <= EPSILON {
                continue;
            }
            let reverse_flow = flow.capacity(v, u);
            let cancel = delta.min(reverse_flow);
            if cancel > EPSILON {
                flow.decrease_arc(v, u, cancel);
            }
            let remainder = delta - cancel;
            if remainder > EPSILON {
                flow.add_to_arc(u, v, remainder);
            }
            residual.add_to_arc(v, u, delta);
            residual.decrease_arc(u, v, delta);
            if u == s {
                value += delta;
            }
            if v == s {
                value -= delta;
            }
        }
    }
    tracing::debug!(iterations = iteration, value, "ford-fulkerson converged");
    Ok(MaxFlowResult { value, flow })
}

/// Compute max-flow and, from the saturated flow, the min-cut: classify
/// edges saturated by the flow as cut-candidates, build a partition graph
/// that omits them but adds a back-arc from head to tail (so BFS cannot
/// cross the cut the wrong way), then the cut is every candidate whose
/// tail is reachable from `s` in that partition graph and whose head is
/// not.
pub fn min_cut<V, W>(
    g: &Graph<V, Directed, W>,
    s: usize,
    t: usize,
    strategy: impl FnMut(&ArcMap, usize, usize) -> AugmentResult,
) -> Result<(f64, Vec<(usize, usize)>)>
where
    V: Eq + Hash + Clone,
    W: Weightedness,
{
    let mut residual = build_residual(g);
    let original = residual.clone();
    let result = ford_fulkerson(&mut residual, s, t, strategy)?;

    let n = g.order();
    let mut candidates = Vec::new();
    for u in 0..n {
        for (v, cap) in original.neighbors(u) {
            if cap > EPSILON && cap - result.flow.capacity(u, v) < EPSILON {
                candidates.push((u, v));
            }
        }
    }

    let mut partition = ArcMap::new(n);
    for u in 0..n {
        for (v, cap) in original.neighbors(u) {
            if cap > EPSILON && !candidates.contains(&(u, v)) {
                partition.add_to_arc(u, v, 1.0);
            }
        }
    }
    for &(u, v) in &candidates {
        partition.add_to_arc(v, u, 1.0);
    }

    let reach = bfs(&arc_map_as_graph(&partition), s, |_| false);
    let cut: Vec<(usize, usize)> = candidates
        .into_iter()
        .filter(|&(u, v)| reach[u] && !reach[v])
        .collect();
    debug_assert!(!reach[t], "sink must be unreachable across a correct min-cut");
    Ok((result.value, cut))
}

/// A throwaway adapter so the BFS primitive (which expects a `Graph`) can
/// walk a partition `ArcMap` directly, without materializing vertex names.
fn arc_map_as_graph(m: &ArcMap) -> Graph<usize, Directed> {
    let mut g: Graph<usize, Directed> = Graph::new(crate::graph::StorageKind::AdjList);
    for v in 0..m.len() {
        g.add_vertex(v).expect("fresh graph has no name collisions");
    }
    for u in 0..m.len() {
        for (v, w) in m.neighbors(u) {
            let _ = g.set_edge(&u, &v, w);
        }
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StorageKind;

    /// S1: s->a:3, s->b:2, a->b:1, a->t:2, b->t:3. Max-flow value 5, all
    /// three strategies agree, min-cut = {a->t, b->t}.
    fn s1_graph() -> (Graph<&'static str, Directed>, usize, usize) {
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
    fn s1_max_flow_scenario_all_strategies_agree() {
        let (g, s, t) = s1_graph();
        for strategy_name in ["edmonds_karp", "dinic", "karzanov"] {
            let mut residual = build_residual(&g);
            let result = match strategy_name {
                "edmonds_karp" => ford_fulkerson(&mut residual, s, t, edmonds_karp).unwrap(),
                "dinic" => ford_fulkerson(&mut residual, s, t, dinic).unwrap(),
                _ => ford_fulkerson(&mut residual, s, t, karzanov).unwrap(),
            };
            assert!((result.value - 5.0).abs() < 1e-6, "{strategy_name} gave {}", result.value);
        }
    }

    #[test]
    fn s1_min_cut_matches_a_t_and_b_t() {
        let (g, s, t) = s1_graph();
        let (value, cut) = min_cut(&g, s, t, edmonds_karp).unwrap();
        assert!((value - 5.0).abs() < 1e-6);
        let a = g.index_of(&"a").unwrap();
        let b = g.index_of(&"b").unwrap();
        let mut cut_set: Vec<(usize, usize)> = cut;
        cut_set.sort();
        let mut expected = vec![(a, t), (b, t)];
        expected.sort();
        assert_eq!(cut_set, expected);
    }

    /// Property 7 (partial): output is a valid flow under capacity, and
    /// its value equals the min-cut weight.
    #[test]
    fn max_flow_value_equals_min_cut_weight() {
        let (g, s, t) = s1_graph();
        let (value, cut) = min_cut(&g, s, t, dinic).unwrap();
        let cut_weight: f64 = cut.iter().map(|&(u, v)| g.edge_cost(g.name(u), g.name(v)).unwrap()).sum();
        assert!((value - cut_weight).abs() < 1e-6);
    }
}
