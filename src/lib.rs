//! **graphalg** is a library of fundamental algorithms and data structures
//! built around one unified graph abstraction.
//!
//! The core is three tightly coupled subsystems: the [`graph`] container
//! (adjacency-matrix and adjacency-list storage behind directed/undirected,
//! weighted/unweighted compile-time flags), the [`heap`] family (a plain
//! priority queue plus three node-addressable heaps sharing decrease-key
//! and merge), and [`flow`] (Ford-Fulkerson with pluggable augmenting-path
//! strategies and min-cut). Everything else — shortest paths, spanning
//! trees, components, matching, closures, order dimension, approximation,
//! NP-complete reductions, sorting, 2-SAT — is built on top of those three.
//!
//! This is a correctness-oriented reference implementation: the value is
//! in the algorithms' invariants, numerical care, and asymptotic bounds,
//! not in any framework around them. It is single-threaded and
//! non-suspending (see `DESIGN.md` §5): no operation blocks, no callback
//! runs concurrently, nothing here imposes an executor on its caller.

pub mod approximation;
pub mod closures;
pub mod components;
pub mod error;
pub mod flow;
pub mod graph;
pub mod heap;
pub mod matching;
pub mod matrix;
pub mod misc;
pub mod npc;
pub mod order_dimension;
pub mod order_map;
pub mod search;
pub mod shortest_paths;
pub mod sorting;
pub mod spanning_tree;
pub mod twosat;
pub mod unionfind;

pub use error::{Error, Result};
pub use graph::{Directed, Graph, StorageKind, Undirected, Unweighted, Weighted};
