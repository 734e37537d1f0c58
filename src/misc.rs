//! Miscellaneous utilities that don't belong to any one subsystem: Floyd's
//! tortoise-and-hare cycle detection over an implicit function graph, and
//! the CNF DIMACS file reader used by the 2-SAT and NPC test suites.

use std::io::BufRead;

use crate::error::{Error, Result};
use crate::twosat::Literal;

/// Floyd's cycle-finding algorithm over the implicit functional graph
/// `x -> f(x)` starting at `x0`: detects a cycle in O(1) auxiliary space
/// (no visited-set) by racing a tortoise (one step) against a hare (two
/// steps). Returns `(mu, lambda)`: the index of the first repeated value
/// and the cycle length, following Floyd's original two-phase
/// construction (find a meeting point, then find the entrance and the
/// period from it).
pub fn floyd_cycle_detect<T: PartialEq + Clone>(x0: T, mut f: impl FnMut(&T) -> T) -> (usize, usize) {
    let mut tortoise = f(&x0);
    let mut hare = f(&tortoise);
    while tortoise != hare {
        tortoise = f(&tortoise);
        hare = f(&f(&hare));
    }

    let mut mu = 0;
    let mut tortoise = x0;
    while tortoise != hare {
        tortoise = f(&tortoise);
        hare = f(&hare);
        mu += 1;
    }

    let mut lambda = 1;
    let mut hare = f(&tortoise);
    while tortoise != hare {
        hare = f(&hare);
        lambda += 1;
    }

    (mu, lambda)
}

/// A CNF instance parsed from DIMACS format: `num_vars` variables and a
/// list of clauses, each a list of literals.
#[derive(Debug, Clone, Default)]
pub struct Cnf {
    pub num_vars: usize,
    pub num_clauses: usize,
    pub clauses: Vec<Vec<Literal>>,
}

/// Parse a DIMACS CNF file. Everything before the first `p` line is
/// skipped; the `p` line is `p cnf <num_vars> <num_clauses>` (only the
/// fourth token is read here, per the external-interface contract: the
/// clause count). Subsequent integers are literals (negative = negated,
/// positive = positive), terminated per-clause by a `0`.
pub fn read_dimacs_cnf(reader: impl BufRead) -> Result<Cnf> {
    let mut lines = reader.lines();
    let mut num_vars = 0usize;
    let mut num_clauses = 0usize;
    let mut found_header = false;
    for line in &mut lines {
        let line = line.map_err(|e| Error::InvalidInput(format!("I/O error reading CNF: {e}")))?;
        let trimmed = line.trim();
        if trimmed.starts_with('p') {
            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            if tokens.len() != 4 {
                return Err(Error::InvalidInput("malformed DIMACS 'p' line".into()));
            }
            num_vars = tokens[2]
                .parse()
                .map_err(|_| Error::InvalidInput("malformed variable count in 'p' line".into()))?;
            num_clauses = tokens[3]
                .parse()
                .map_err(|_| Error::InvalidInput("malformed clause count in 'p' line".into()))?;
            found_header = true;
            break;
        }
    }
    if !found_header {
        return Err(Error::InvalidInput("no 'p' line found in DIMACS input".into()));
    }

    let mut clauses = Vec::with_capacity(num_clauses);
    let mut current = Vec::new();
    let mut remaining = num_clauses;
    for line in lines {
        let line = line.map_err(|e| Error::InvalidInput(format!("I/O error reading CNF: {e}")))?;
        for tok in line.split_whitespace() {
            let lit: i64 = tok
                .parse()
                .map_err(|_| Error::InvalidInput(format!("malformed literal token '{tok}'")))?;
            if lit == 0 {
                clauses.push(std::mem::take(&mut current));
                remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    break;
                }
            } else if lit < 0 {
                current.push(Literal::new((-lit) as usize - 1, false));
            } else {
                current.push(Literal::new(lit as usize - 1, true));
            }
        }
        if remaining == 0 {
            break;
        }
    }

    Ok(Cnf {
        num_vars,
        num_clauses,
        clauses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn floyd_detects_known_cycle() {
        // x -> (x + 1) mod 5, started at 2: immediately enters a 5-cycle
        // at mu=0.
        let (mu, lambda) = floyd_cycle_detect(2usize, |x| (x + 1) % 5);
        assert_eq!(mu, 0);
        assert_eq!(lambda, 5);
    }

    #[test]
    fn floyd_detects_rho_shaped_sequence() {
        // Tail 0,1,2 then a 3-cycle 3,4,5,3,4,5,...
        let f = |x: &usize| match x {
            0 => 1,
            1 => 2,
            2 => 3,
            3 => 4,
            4 => 5,
            _ => 3,
        };
        let (mu, lambda) = floyd_cycle_detect(0usize, f);
        assert_eq!(mu, 3);
        assert_eq!(lambda, 3);
    }

    #[test]
    fn reads_simple_cnf() {
        let text = "c a comment line\np cnf 3 2\n1 -2 0\n-1 3 0\n";
        let cnf = read_dimacs_cnf(Cursor::new(text.as_bytes())).unwrap();
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf.num_clauses, 2);
        assert_eq!(cnf.clauses.len(), 2);
        assert_eq!(cnf.clauses[0], vec![Literal::new(0, true), Literal::new(1, false)]);
        assert_eq!(cnf.clauses[1], vec![Literal::new(0, false), Literal::new(2, true)]);
    }

    #[test]
    fn missing_p_line_is_an_error() {
        let text = "1 2 0\n";
        assert!(read_dimacs_cnf(Cursor::new(text.as_bytes())).is_err());
    }
}
