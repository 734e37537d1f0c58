//! Dense 2-D storage with O(1) construction via the classic
//! space-initialization trick: a cell reads as the default fill value
//! unless it has actually been written, without zeroing the backing array
//! up front.
//!
//! This is what lets the adjacency-matrix graph storage (`graph::adjacency_matrix`)
//! build an `n x n` table in O(n) rather than O(n^2).

/// A `rows x cols` table of `T`, lazily initialized to `default`.
///
/// Reading an unset cell returns a clone of `default`; writing a cell marks
/// it live. Internally this is Briggs & Torczon's trick: a flat `Vec<T>` of
/// slots (never read until validated), a `stamp` per slot, and a `used`
/// stack of slot indices. Slot `i` is live iff `stamp[i] < used.len()` and
/// `used[stamp[i]] == i`.
#[derive(Debug, Clone)]
pub struct DynMatrix<T> {
    rows: usize,
    cols: usize,
    default: T,
    slots: Vec<T>,
    stamp: Vec<usize>,
    used: Vec<usize>,
}

impl<T: Clone> DynMatrix<T> {
    /// Construct a `rows x cols` matrix where every cell reads as `default`.
    /// O(1): no per-cell initialization happens here.
    pub fn new(rows: usize, cols: usize, default: T) -> Self {
        let n = rows.saturating_mul(cols);
        DynMatrix {
            rows,
            cols,
            default,
            slots: Vec::new(),
            stamp: vec![0; n],
            used: Vec::new(),
        }
    }

    #[inline]
    fn index(&self, r: usize, c: usize) -> usize {
        debug_assert!(r < self.rows && c < self.cols, "matrix index out of bounds");
        r * self.cols + c
    }

    fn is_live(&self, idx: usize) -> bool {
        let s = self.stamp[idx];
        s < self.used.len() && self.used[s] == idx
    }

    /// Read the value at `(r, c)`, or `default` if never written.
    pub fn get(&self, r: usize, c: usize) -> T {
        let idx = self.index(r, c);
        if self.is_live(idx) {
            self.slots[self.stamp[idx]].clone()
        } else {
            self.default.clone()
        }
    }

    /// Write `value` at `(r, c)`.
    pub fn set(&mut self, r: usize, c: usize, value: T) {
        let idx = self.index(r, c);
        if self.is_live(idx) {
            self.slots[self.stamp[idx]] = value;
        } else {
            let slot = self.used.len();
            self.stamp[idx] = slot;
            self.used.push(idx);
            self.slots.push(value);
        }
    }

    /// Reset a cell back to `default` without shrinking backing storage.
    /// O(1): it swap-removes the cell's slot from `used`, possibly moving
    /// another live cell's slot index, which is patched in O(1).
    pub fn unset(&mut self, r: usize, c: usize) {
        let idx = self.index(r, c);
        if !self.is_live(idx) {
            return;
        }
        let slot = self.stamp[idx];
        let last = self.used.len() - 1;
        if slot != last {
            self.used.swap(slot, last);
            self.slots.swap(slot, last);
            let moved_idx = self.used[slot];
            self.stamp[moved_idx] = slot;
        }
        self.used.pop();
        self.slots.pop();
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Reset every cell back to `default`. O(number of live cells), not
    /// O(rows*cols).
    pub fn clear(&mut self) {
        self.used.clear();
        self.slots.clear();
    }

    /// Grow the matrix to `new_rows x new_cols`, preserving existing live
    /// cells whose coordinates stay in bounds. This is the one documented
    /// basic-safety (not strong-safety) operation in the matrix: on an
    /// allocation failure mid-resize the matrix may be left at a row/column
    /// count between the old and new sizes, though never with dangling
    /// indices.
    pub fn resize(&mut self, new_rows: usize, new_cols: usize, default: T) {
        let mut fresh = DynMatrix::new(new_rows, new_cols, default);
        for slot in 0..self.used.len() {
            let idx = self.used[slot];
            let r = idx / self.cols;
            let c = idx % self.cols;
            if r < new_rows && c < new_cols {
                fresh.set(r, c, self.slots[slot].clone());
            }
        }
        *self = fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_cells_read_default() {
        let m: DynMatrix<f64> = DynMatrix::new(1000, 1000, f64::NAN);
        assert!(m.get(500, 999).is_nan());
    }

    #[test]
    fn write_then_read() {
        let mut m = DynMatrix::new(4, 4, 0i32);
        m.set(1, 2, 42);
        assert_eq!(m.get(1, 2), 42);
        assert_eq!(m.get(0, 0), 0);
    }

    #[test]
    fn unset_restores_default_and_reuses_slot() {
        let mut m = DynMatrix::new(3, 3, -1i32);
        m.set(0, 0, 7);
        m.set(1, 1, 8);
        m.unset(0, 0);
        assert_eq!(m.get(0, 0), -1);
        assert_eq!(m.get(1, 1), 8);
        m.set(2, 2, 9);
        assert_eq!(m.get(2, 2), 9);
    }

    #[test]
    fn resize_preserves_in_bounds_cells() {
        let mut m = DynMatrix::new(2, 2, 0i32);
        m.set(1, 1, 5);
        m.resize(3, 3, 0);
        assert_eq!(m.get(1, 1), 5);
        assert_eq!(m.get(2, 2), 0);
    }
}
