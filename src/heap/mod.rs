//! The mergeable/addressable heap family: a plain array binary heap with no
//! handles, plus three node-addressable heaps (binary, binomial,
//! Fibonacci) that each expose a stable `Handle` supporting `decrease_key`
//! and `merge`.
//!
//! Handles for the binomial and Fibonacci heaps are realized as globally
//! unique ids (a process-wide atomic counter, never reused) indirected
//! through a small lookup table (`HandleTable`) rather than literal
//! `(slot, generation)` arena indices. Global uniqueness is what lets
//! `merge` combine two independently built heaps' tables by simple union
//! without renumbering — and thus without invalidating handles the caller
//! already holds — while still failing loudly on use-after-free. The
//! addressable binary heap, whose `merge` contract explicitly *does*
//! invalidate the merged-in side's handles, instead packs a literal
//! `(slot, generation)` pair directly into the handle (no shared table
//! needed).

mod array_heap;
mod addressable_binary;
mod binomial;
mod fibonacci;

pub use array_heap::ArrayHeap;
pub use addressable_binary::AddressableBinaryHeap;
pub use binomial::BinomialHeap;
pub use fibonacci::FibonacciHeap;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(0);

/// An opaque, stable reference to a value previously pushed into an
/// addressable heap. Valid until that value is popped from the heap;
/// using it afterward returns `Error::NotFound`/`Error::Underflow`
/// rather than touching invalid memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(u64);

impl Handle {
    /// Pack a `(slot, generation)` arena reference into a handle. Used by
    /// the addressable binary heap, which never needs the `HandleTable`
    /// indirection since its slab slots stay put across `decrease_key`.
    pub(crate) fn from_slot_generation(slot: u32, generation: u32) -> Self {
        Handle(((slot as u64) << 32) | generation as u64)
    }

    pub(crate) fn slot(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub(crate) fn generation(self) -> u32 {
        self.0 as u32
    }

    /// The raw id backing this handle. Only meaningful for handles issued
    /// by a `HandleTable` (binomial/Fibonacci heaps); used as the node-side
    /// `handle_id` tag so a slot can report which handle currently points
    /// at it after a `decrease_key` payload swap.
    pub(crate) fn raw(self) -> u64 {
        self.0
    }
}

/// Maps external `Handle` ids (globally unique, never reused) to their
/// current backing-storage slot. Shared bookkeeping used by the binomial
/// and Fibonacci heaps, whose `decrease_key` swaps values between slots
/// rather than relinking nodes, and whose `merge` must keep handles issued
/// by either side valid.
#[derive(Debug, Default)]
pub(crate) struct HandleTable {
    location: HashMap<u64, usize>,
}

impl HandleTable {
    pub fn new() -> Self {
        HandleTable {
            location: HashMap::new(),
        }
    }

    pub fn alloc(&mut self, slot: usize) -> Handle {
        let id = NEXT_HANDLE_ID.fetch_add(1, AtomicOrdering::Relaxed);
        self.location.insert(id, slot);
        Handle(id)
    }

    pub fn slot_of(&self, handle: Handle) -> Option<usize> {
        self.location.get(&handle.0).copied()
    }

    pub fn set_slot(&mut self, handle: Handle, slot: usize) {
        self.location.insert(handle.0, slot);
    }

    pub fn retire(&mut self, handle: Handle) {
        self.location.remove(&handle.0);
    }

    /// Absorb another table's entries, shifting every slot reference by
    /// `offset` (the merged-in heap's slab has been appended at `offset`).
    /// Ids are globally unique, so this is a plain union — no renumbering,
    /// so handles issued by either heap keep working after the merge.
    pub fn absorb(&mut self, other: HandleTable, offset: usize) {
        for (id, slot) in other.location {
            self.location.insert(id, slot + offset);
        }
    }
}
