//! Crate-wide error type.
//!
//! Mirrors the five abstract error kinds of the design: a precondition
//! violation fails at the call site, a lookup miss is `NotFound`, flow's "no
//! augmenting path" is caught internally and never surfaces here, a broken
//! invariant (non-DAG, negative cycle, non-conservation) is fatal, and an
//! operation on an empty container underflows.

use std::fmt;

/// Everything in this crate that can fail returns this error type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A precondition on an argument was violated (self-loop, duplicate
    /// vertex, negative weight where one is disallowed, ...).
    InvalidInput(String),
    /// A lookup target (vertex, handle, key) was absent.
    NotFound(String),
    /// No augmenting path / no route exists. User-facing only; the flow
    /// driver itself treats this as a local control-flow signal.
    NoPath,
    /// A structural invariant was broken: a non-DAG was handed to
    /// topological sort, a negative cycle was found, a 2-SAT instance
    /// proved unsatisfiable, or flow conservation failed.
    InvariantViolated(String),
    /// An operation (pop, decrease-key, ...) was attempted on an empty
    /// container or a handle whose node is gone.
    Underflow(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::NotFound(msg) => write!(f, "not found: {msg}"),
            Error::NoPath => write!(f, "no path"),
            Error::InvariantViolated(msg) => write!(f, "invariant violated: {msg}"),
            Error::Underflow(msg) => write!(f, "underflow: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
