//! Sorting and selection: stable merge sort, in-place randomized
//! quicksort, allocation-free heapsort (riding on [`crate::heap::ArrayHeap`]),
//! LSD radix sort over fixed-width unsigned keys, and median-of-medians
//! deterministic linear-time selection.
//!
//! The randomized routines (`quicksort`, `median_of_medians`'s pivot
//! fallback is deterministic but `quicksort`'s is not) take an explicit
//! `&mut impl rand::Rng` rather than reaching for a process-wide
//! generator: correctness never depends on which draws come out, only on
//! their independence, so tests can hand in a seeded `StdRng` and get
//! reproducible runs.

use rand::Rng;

use crate::heap::ArrayHeap;

/// Stable merge sort: O(n log n), one auxiliary buffer of the input's size.
pub fn merge_sort<T: Clone + Ord>(data: &mut [T]) {
    let n = data.len();
    if n < 2 {
        return;
    }
    let mut buf = data.to_vec();
    merge_sort_rec(data, &mut buf);
}

fn merge_sort_rec<T: Clone + Ord>(data: &mut [T], buf: &mut [T]) {
    let n = data.len();
    if n < 2 {
        return;
    }
    let mid = n / 2;
    merge_sort_rec(&mut data[..mid], &mut buf[..mid]);
    merge_sort_rec(&mut data[mid..], &mut buf[mid..]);
    buf.clone_from_slice(data);
    let (left, right) = buf.split_at(mid);
    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            data[k] = left[i].clone();
            i += 1;
        } else {
            data[k] = right[j].clone();
            j += 1;
        }
        k += 1;
    }
    if i < left.len() {
        data[k..].clone_from_slice(&left[i..]);
    }
    if j < right.len() {
        data[k..].clone_from_slice(&right[j..]);
    }
}

/// In-place quicksort with Lomuto partitioning and a randomized pivot
/// choice, expected O(n log n).
pub fn quicksort<T: Ord>(data: &mut [T], rng: &mut impl Rng) {
    if data.len() < 2 {
        return;
    }
    quicksort_rec(data, rng);
}

fn quicksort_rec<T: Ord>(data: &mut [T], rng: &mut impl Rng) {
    let n = data.len();
    if n < 2 {
        return;
    }
    let pivot_idx = rng.gen_range(0..n);
    data.swap(pivot_idx, n - 1);
    let mut store = 0;
    for i in 0..n - 1 {
        if data[i] <= data[n - 1] {
            data.swap(i, store);
            store += 1;
        }
    }
    data.swap(store, n - 1);
    let (left, right) = data.split_at_mut(store);
    quicksort_rec(left, rng);
    quicksort_rec(&mut right[1..], rng);
}

/// Heapsort via [`ArrayHeap`]'s sift operations: push every element then
/// drain in priority order. No auxiliary allocation beyond the heap's own
/// backing array (which the input is moved into, not copied).
pub fn heap_sort<T: Ord>(data: Vec<T>) -> Vec<T> {
    let mut heap = ArrayHeap::with_capacity(data.len(), |a: &T, b: &T| a.cmp(b));
    for v in data {
        heap.insert(v);
    }
    heap.into_sorted_vec()
}

/// LSD radix sort, base 256, for fixed-width unsigned keys. Stable: ties
/// keep their relative input order, which is what makes repeated passes
/// over successively more significant bytes correct.
pub fn radix_sort_u32(data: &mut Vec<u32>) {
    let mut buf = vec![0u32; data.len()];
    for byte in 0..4 {
        let shift = byte * 8;
        let mut count = [0usize; 257];
        for &v in data.iter() {
            let b = ((v >> shift) & 0xff) as usize;
            count[b + 1] += 1;
        }
        for i in 0..256 {
            count[i + 1] += count[i];
        }
        for &v in data.iter() {
            let b = ((v >> shift) & 0xff) as usize;
            buf[count[b]] = v;
            count[b] += 1;
        }
        std::mem::swap(data, &mut buf);
    }
}

/// Deterministic linear-time selection (median-of-medians, groups of 5):
/// the `k`-th smallest element (0-indexed) without quickselect's
/// randomized expected bound. Reorders `data` as a side effect (Lomuto
/// partitioning around the chosen pivot), like `slice::select_nth_unstable`.
pub fn median_of_medians_select<T: Ord + Clone>(data: &mut [T], k: usize) -> T {
    assert!(k < data.len(), "selection rank out of bounds");
    select_rec(data, k)
}

fn select_rec<T: Ord + Clone>(data: &mut [T], k: usize) -> T {
    let n = data.len();
    if n <= 5 {
        data.sort();
        return data[k].clone();
    }
    let pivot = median_of_medians_pivot(data);
    let pivot_idx = data.iter().position(|x| *x == pivot).expect("pivot is drawn from data");
    data.swap(pivot_idx, n - 1);
    let mut store = 0;
    for i in 0..n - 1 {
        if data[i] <= data[n - 1] {
            data.swap(i, store);
            store += 1;
        }
    }
    data.swap(store, n - 1);
    match k.cmp(&store) {
        std::cmp::Ordering::Equal => data[store].clone(),
        std::cmp::Ordering::Less => select_rec(&mut data[..store], k),
        std::cmp::Ordering::Greater => select_rec(&mut data[store + 1..], k - store - 1),
    }
}

/// The median-of-medians pivot: split into groups of 5, sort each small
/// group (cheap, fixed-size), take each group's median, then recurse on
/// that (much smaller) set of medians to find *their* median.
fn median_of_medians_pivot<T: Ord + Clone>(data: &[T]) -> T {
    let mut medians: Vec<T> = data
        .chunks(5)
        .map(|chunk| {
            let mut chunk = chunk.to_vec();
            chunk.sort();
            chunk[chunk.len() / 2].clone()
        })
        .collect();
    let mid = medians.len() / 2;
    select_rec(&mut medians, mid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rand::SeedableRng;

    #[quickcheck]
    fn merge_sort_matches_std_sort(mut data: Vec<i32>) -> bool {
        let mut expected = data.clone();
        expected.sort();
        merge_sort(&mut data);
        data == expected
    }

    #[quickcheck]
    fn radix_sort_matches_std_sort(mut data: Vec<u32>) -> bool {
        let mut expected = data.clone();
        expected.sort();
        radix_sort_u32(&mut data);
        data == expected
    }

    #[test]
    fn merge_sort_orders_and_is_stable() {
        let mut data = vec![5, 3, 8, 1, 9, 2];
        merge_sort(&mut data);
        assert_eq!(data, vec![1, 2, 3, 5, 8, 9]);
    }

    #[test]
    fn quicksort_orders_with_seeded_rng() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut data = vec![5, 3, 8, 1, 9, 2, 7, 4, 6, 0];
        quicksort(&mut data, &mut rng);
        assert_eq!(data, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn heap_sort_orders() {
        let data = vec![5, 3, 8, 1, 9, 2];
        assert_eq!(heap_sort(data), vec![1, 2, 3, 5, 8, 9]);
    }

    #[test]
    fn radix_sort_orders_u32() {
        let mut data: Vec<u32> = vec![170, 45, 75, 90, 802, 24, 2, 66];
        let mut expected = data.clone();
        expected.sort();
        radix_sort_u32(&mut data);
        assert_eq!(data, expected);
    }

    #[test]
    fn median_of_medians_finds_exact_rank() {
        let mut data = vec![9, 3, 7, 1, 8, 2, 6, 4, 5, 0];
        let mut sorted = data.clone();
        sorted.sort();
        for k in 0..data.len() {
            let mut copy = data.clone();
            assert_eq!(median_of_medians_select(&mut copy, k), sorted[k]);
        }
    }
}
