//! 2-SAT: a robust polynomial-time solver built on strongly-connected
//! components of the implication graph, with typed unsatisfiability
//! rather than a panic.
//!
//! A literal is a variable index plus a polarity. Clause `(a v b)`
//! contributes two implications to the graph: `not a -> b` and
//! `not b -> a`. The instance is satisfiable iff no variable's two
//! literals land in the same SCC; when satisfiable, each variable takes
//! the truth value of whichever of its two literals' SCC is
//! topologically later in the condensation (Tarjan already returns
//! components in exactly that order, last-finished first).

use crate::components::strongly_connected_components;
use crate::error::{Error, Result};
use crate::graph::{Directed, Graph, StorageKind};

/// A literal: variable `var` (0-indexed), `polarity` true for `x`, false
/// for `not x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub var: usize,
    pub polarity: bool,
}

impl Literal {
    pub fn new(var: usize, polarity: bool) -> Self {
        Literal { var, polarity }
    }

    fn negate(self) -> Literal {
        Literal {
            var: self.var,
            polarity: !self.polarity,
        }
    }

    /// This literal's vertex index in the `2 * num_vars`-vertex implication
    /// graph: `2*var` for the positive literal, `2*var + 1` for the negated.
    fn node(self) -> usize {
        2 * self.var + usize::from(!self.polarity)
    }
}

/// A 2-SAT instance: `num_vars` boolean variables and a list of two-literal
/// clauses, each a disjunction of its pair.
pub struct TwoSat {
    num_vars: usize,
    clauses: Vec<(Literal, Literal)>,
}

impl TwoSat {
    pub fn new(num_vars: usize) -> Self {
        TwoSat {
            num_vars,
            clauses: Vec::new(),
        }
    }

    /// Add clause `(a v b)`.
    pub fn add_clause(&mut self, a: Literal, b: Literal) {
        self.clauses.push((a, b));
    }

    fn implication_graph(&self) -> Graph<usize, Directed> {
        let mut g: Graph<usize, Directed> = Graph::new(StorageKind::AdjList);
        for node in 0..2 * self.num_vars {
            g.add_vertex(node).expect("fresh graph has no name collisions");
        }
        for &(a, b) in &self.clauses {
            let _ = g.set_edge(&a.negate().node(), &b.node(), 1.0);
            let _ = g.set_edge(&b.negate().node(), &a.node(), 1.0);
        }
        g
    }

    /// Solve the instance. Returns a satisfying assignment (indexed by
    /// variable) if one exists, or `Error::InvariantViolated` if the
    /// instance is unsatisfiable (some variable's two literals share a
    /// strongly-connected component of the implication graph).
    pub fn solve(&self) -> Result<Vec<bool>> {
        let g = self.implication_graph();
        let sccs = strongly_connected_components(&g);
        // `scc_order[v]` is the index of v's component in Tarjan's output
        // order, which is already reverse-topological over the
        // condensation (component 0 finished, hence is topologically
        // last among everything already on the stack when it closed).
        let mut scc_order = vec![0usize; 2 * self.num_vars];
        for (order, component) in sccs.iter().enumerate() {
            for &v in component {
                scc_order[v] = order;
            }
        }
        let mut assignment = vec![false; self.num_vars];
        for var in 0..self.num_vars {
            let pos = Literal::new(var, true).node();
            let neg = Literal::new(var, false).node();
            if scc_order[pos] == scc_order[neg] {
                return Err(Error::InvariantViolated(format!(
                    "2-SAT instance is unsatisfiable: variable {var} forces both polarities"
                )));
            }
            // Tarjan emits components in reverse topological order, so the
            // smaller `scc_order` is the topologically *later* component.
            assignment[var] = scc_order[pos] < scc_order[neg];
        }
        Ok(assignment)
    }

    /// Verify that `assignment` satisfies every clause.
    pub fn verify(&self, assignment: &[bool]) -> bool {
        self.clauses.iter().all(|&(a, b)| {
            let holds = |lit: Literal| assignment[lit.var] == lit.polarity;
            holds(a) || holds(b)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// S6: clauses (x v y)(not x v z)(not y v z)(not z). Unsatisfiable.
    #[test]
    fn s6_unsat_scenario() {
        let x = Literal::new(0, true);
        let not_x = Literal::new(0, false);
        let y = Literal::new(1, true);
        let not_y = Literal::new(1, false);
        let z = Literal::new(2, true);
        let not_z = Literal::new(2, false);

        let mut sat = TwoSat::new(3);
        sat.add_clause(x, y);
        sat.add_clause(not_x, z);
        sat.add_clause(not_y, z);
        sat.add_clause(not_z, not_z);
        assert!(sat.solve().is_err());
    }

    /// S6 continued: removing the last clause, any satisfying assignment
    /// with z=true is acceptable.
    #[test]
    fn s6_sat_after_removing_last_clause() {
        let x = Literal::new(0, true);
        let not_x = Literal::new(0, false);
        let y = Literal::new(1, true);
        let not_y = Literal::new(1, false);
        let z = Literal::new(2, true);

        let mut sat = TwoSat::new(3);
        sat.add_clause(x, y);
        sat.add_clause(not_x, z);
        sat.add_clause(not_y, z);
        let assignment = sat.solve().unwrap();
        assert!(sat.verify(&assignment));
        assert!(assignment[2]);
    }

    #[test]
    fn trivially_satisfiable_single_variable() {
        let mut sat = TwoSat::new(1);
        let x = Literal::new(0, true);
        sat.add_clause(x, x);
        let assignment = sat.solve().unwrap();
        assert!(assignment[0]);
        assert!(sat.verify(&assignment));
    }
}
