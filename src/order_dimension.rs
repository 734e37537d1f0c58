//! Order dimension: 2-D partial-order generation (intersection of two
//! random total orders) and transitive reduction of a DAG's reachability
//! relation ("3-D" in the sense of needing at least that many total
//! orders to realize, once reduced).

use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::closures::transitive_closure;
use crate::graph::{Directed, Graph, StorageKind, Weightedness};

/// Generate a random 2-dimensional partial order on `n` elements: draw two
/// independent random permutations (total orders) of `0..n`, and let
/// `x < y` iff `x` precedes `y` in *both*. Returns the strict order as a
/// directed graph of immediate relations (not yet reduced).
pub fn random_2d_order(n: usize, rng: &mut impl RngCore) -> Graph<usize, Directed> {
    let mut perm_a: Vec<usize> = (0..n).collect();
    let mut perm_b: Vec<usize> = (0..n).collect();
    perm_a.shuffle(rng);
    perm_b.shuffle(rng);
    let pos_a: Vec<usize> = {
        let mut pos = vec![0; n];
        for (i, &v) in perm_a.iter().enumerate() {
            pos[v] = i;
        }
        pos
    };
    let pos_b: Vec<usize> = {
        let mut pos = vec![0; n];
        for (i, &v) in perm_b.iter().enumerate() {
            pos[v] = i;
        }
        pos
    };

    let mut g: Graph<usize, Directed> = Graph::new(StorageKind::AdjList);
    for v in 0..n {
        g.add_vertex(v).expect("fresh graph has no name collisions");
    }
    for x in 0..n {
        for y in 0..n {
            if x != y && pos_a[x] < pos_a[y] && pos_b[x] < pos_b[y] {
                g.set_edge(&x, &y, 1.0).expect("x != y");
            }
        }
    }
    g
}

/// Transitive reduction: remove every edge `(u, v)` for which an alternate
/// directed path of length >= 2 already exists, computed from the
/// transitive closure minus the edge itself. Assumes `g` is a DAG (a
/// partial order's comparability graph).
pub fn transitive_reduction<V, W>(g: &Graph<V, Directed, W>) -> Graph<V, Directed, W>
where
    V: Eq + Hash + Clone + std::fmt::Debug,
    W: Weightedness,
{
    let reach = transitive_closure(g);
    let mut reduced = g.convert(g.storage_kind());
    for u in g.indices() {
        for (v, _) in g.neighbors(u) {
            let has_alternate = g.indices().any(|w| w != u && w != v && reach[u][w] && reach[w][v]);
            if has_alternate {
                let un = reduced.name(u).clone();
                let vn = reduced.name(v).clone();
                let _ = reduced.remove_edge(&un, &vn);
            }
        }
    }
    reduced
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_2d_order_is_acyclic_and_transitive_respecting() {
        let mut rng = StdRng::seed_from_u64(42);
        let g = random_2d_order(8, &mut rng);
        // No vertex can be below itself, and if x<y and y<z then x<z must
        // hold since both underlying total orders are themselves transitive.
        for x in g.indices() {
            for y in g.indices() {
                if g.has_edge(&x, &y) {
                    for z in g.indices() {
                        if g.has_edge(&y, &z) {
                            assert!(g.has_edge(&x, &z));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn transitive_reduction_drops_redundant_shortcut() {
        let mut g: Graph<i32, Directed> = Graph::new(StorageKind::AdjList);
        for v in 0..3 {
            g.add_vertex(v).unwrap();
        }
        g.set_edge(&0, &1, 1.0).unwrap();
        g.set_edge(&1, &2, 1.0).unwrap();
        g.set_edge(&0, &2, 1.0).unwrap();
        let reduced = transitive_reduction(&g);
        assert!(!reduced.has_edge(&0, &2));
        assert!(reduced.has_edge(&0, &1));
        assert!(reduced.has_edge(&1, &2));
    }
}
