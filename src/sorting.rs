//! Comparison sorts over mutable slices.
//!
//! Each sort comes in two flavours: one for `Ord` types and a `_by` variant
//! taking a [`Comparator`]. Insertion sort and merge sort are stable;
//! quicksort is not.

use std::{cmp::Ordering, mem};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::compare::{Comparator, NaturalOrder};

/// Slices at or below this length are insertion sorted by merge sort.
pub const INSERTION_CUTOFF: usize = 10;

/// How quicksort picks the element it partitions around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotStrategy {
    /// The median of the first, middle and last elements.
    #[default]
    MedianOfThree,
    /// The last element.
    Last,
    /// A uniformly random element, drawn from a generator seeded once per sort.
    Random(u64),
}

pub fn insertion_sort<T: Ord>(slice: &mut [T]) {
    insertion_sort_by(slice, NaturalOrder);
}

pub fn insertion_sort_by<T, C: Comparator<T>>(slice: &mut [T], cmp: C) {
    insertion_sort_with(slice, &cmp);
}

fn insertion_sort_with<T, C: Comparator<T>>(slice: &mut [T], cmp: &C) {
    for i in 1..slice.len() {
        let mut j = i;
        while j > 0 && cmp.compare(&slice[j], &slice[j - 1]) == Ordering::Less {
            slice.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Sorts by recursively halving the slice, insertion sorting the short
/// pieces and merging the halves through a buffer of clones.
pub fn merge_sort<T: Ord + Clone>(slice: &mut [T]) {
    merge_sort_by(slice, NaturalOrder);
}

pub fn merge_sort_by<T: Clone, C: Comparator<T>>(slice: &mut [T], cmp: C) {
    let mut buffer = slice.to_vec();
    merge_sort_with(slice, &mut buffer, &cmp);
}

fn merge_sort_with<T: Clone, C: Comparator<T>>(slice: &mut [T], buffer: &mut [T], cmp: &C) {
    if slice.len() <= INSERTION_CUTOFF {
        insertion_sort_with(slice, cmp);
        return;
    }

    let middle = slice.len() / 2;
    {
        let (left, right) = slice.split_at_mut(middle);
        let (left_buffer, right_buffer) = buffer.split_at_mut(middle);
        merge_sort_with(left, left_buffer, cmp);
        merge_sort_with(right, right_buffer, cmp);
    }

    buffer.clone_from_slice(slice);
    merge(&buffer[..middle], &buffer[middle..], slice, cmp);
}

fn merge<T: Clone, C: Comparator<T>>(left: &[T], right: &[T], out: &mut [T], cmp: &C) {
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // Ties take from the left half to keep the sort stable.
        let take_left = j == right.len()
            || (i < left.len() && cmp.compare(&left[i], &right[j]) != Ordering::Greater);
        if take_left {
            slot.clone_from(&left[i]);
            i += 1;
        } else {
            slot.clone_from(&right[j]);
            j += 1;
        }
    }
}

/// Quicksort with a median-of-three pivot.
pub fn quicksort<T: Ord>(slice: &mut [T]) {
    quicksort_by(slice, NaturalOrder);
}

pub fn quicksort_by<T, C: Comparator<T>>(slice: &mut [T], cmp: C) {
    quicksort_with_by(slice, PivotStrategy::MedianOfThree, cmp);
}

pub fn quicksort_with<T: Ord>(slice: &mut [T], strategy: PivotStrategy) {
    quicksort_with_by(slice, strategy, NaturalOrder);
}

pub fn quicksort_with_by<T, C: Comparator<T>>(slice: &mut [T], strategy: PivotStrategy, cmp: C) {
    let mut rng = match strategy {
        PivotStrategy::Random(seed) => Some(StdRng::seed_from_u64(seed)),
        _ => None,
    };
    quicksort_range(slice, strategy, &mut rng, &cmp);
}

fn quicksort_range<T, C: Comparator<T>>(
    slice: &mut [T],
    strategy: PivotStrategy,
    rng: &mut Option<StdRng>,
    cmp: &C,
) {
    // Recurse into the smaller side and loop on the larger one, so the
    // recursion stays logarithmic even when every pivot is a poor choice.
    let mut rest = slice;
    while rest.len() > 1 {
        let pivot = choose_pivot(rest, strategy, rng.as_mut(), cmp);
        let last = rest.len() - 1;
        rest.swap(pivot, last);
        let split = partition(rest, cmp);

        let (left, right) = mem::take(&mut rest).split_at_mut(split);
        let right = &mut right[1..];
        if left.len() < right.len() {
            quicksort_range(left, strategy, rng, cmp);
            rest = right;
        } else {
            quicksort_range(right, strategy, rng, cmp);
            rest = left;
        }
    }
}

fn choose_pivot<T, C: Comparator<T>>(
    slice: &[T],
    strategy: PivotStrategy,
    rng: Option<&mut StdRng>,
    cmp: &C,
) -> usize {
    let last = slice.len() - 1;
    match (strategy, rng) {
        (PivotStrategy::Random(_), Some(rng)) => rng.gen_range(0..slice.len()),
        (PivotStrategy::Last, _) | (PivotStrategy::Random(_), None) => last,
        (PivotStrategy::MedianOfThree, _) => median_of_three(slice, 0, last / 2, last, cmp),
    }
}

fn median_of_three<T, C: Comparator<T>>(slice: &[T], a: usize, b: usize, c: usize, cmp: &C) -> usize {
    let less = |x: usize, y: usize| cmp.compare(&slice[x], &slice[y]) == Ordering::Less;
    if less(a, b) {
        if less(b, c) {
            b
        } else if less(a, c) {
            c
        } else {
            a
        }
    } else if less(a, c) {
        a
    } else if less(b, c) {
        c
    } else {
        b
    }
}

// Moves everything smaller than the pivot (held in the last slot) to the
// front, then puts the pivot right after them and returns its index.
fn partition<T, C: Comparator<T>>(slice: &mut [T], cmp: &C) -> usize {
    let last = slice.len() - 1;
    let mut store = 0;
    for i in 0..last {
        if cmp.compare(&slice[i], &slice[last]) == Ordering::Less {
            slice.swap(i, store);
            store += 1;
        }
    }
    slice.swap(store, last);
    store
}

/// `1, 2, ..., n`.
pub fn generate_ascending(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

/// `n, n - 1, ..., 1`.
pub fn generate_descending(n: usize) -> Vec<usize> {
    (1..=n).rev().collect()
}

/// `1..=n` shuffled by a generator seeded with `seed`.
pub fn generate_permuted(n: usize, seed: u64) -> Vec<usize> {
    let mut values = generate_ascending(n);
    values.shuffle(&mut StdRng::seed_from_u64(seed));
    values
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::compare::Reverse;

    const STRATEGIES: [PivotStrategy; 3] = [
        PivotStrategy::MedianOfThree,
        PivotStrategy::Last,
        PivotStrategy::Random(20),
    ];

    #[test]
    fn generators() {
        assert_eq!(generate_ascending(4), vec![1, 2, 3, 4]);
        assert_eq!(generate_descending(4), vec![4, 3, 2, 1]);
        assert_eq!(generate_ascending(0), Vec::<usize>::new());

        let mut permuted = generate_permuted(100, 20);
        assert_eq!(permuted, generate_permuted(100, 20));
        assert_ne!(permuted, generate_ascending(100));
        permuted.sort_unstable();
        assert_eq!(permuted, generate_ascending(100));
    }

    #[test]
    fn sorts_generated_inputs() {
        let expected = generate_ascending(1_000);
        for input in [
            generate_ascending(1_000),
            generate_descending(1_000),
            generate_permuted(1_000, 3),
        ] {
            let mut v = input.clone();
            insertion_sort(&mut v);
            assert_eq!(v, expected);

            let mut v = input.clone();
            merge_sort(&mut v);
            assert_eq!(v, expected);

            for strategy in STRATEGIES {
                let mut v = input.clone();
                quicksort_with(&mut v, strategy);
                assert_eq!(v, expected, "{:?}", strategy);
            }
        }
    }

    #[test]
    fn trivial_slices() {
        let mut empty: [i32; 0] = [];
        quicksort(&mut empty);
        merge_sort(&mut empty);
        insertion_sort(&mut empty);

        let mut one = [7];
        quicksort(&mut one);
        merge_sort(&mut one);
        assert_eq!(one, [7]);
    }

    #[test]
    fn duplicates() {
        let mut v = vec![3, 1, 3, 3, 2, 1, 3, 2, 2, 1, 3, 3, 1, 2];
        let mut expected = v.clone();
        expected.sort();
        quicksort(&mut v);
        assert_eq!(v, expected);
    }

    #[test]
    fn descending_comparator() {
        let mut v = generate_permuted(50, 1);
        merge_sort_by(&mut v, Reverse(NaturalOrder));
        assert_eq!(v, generate_descending(50));

        let mut words = vec!["pear", "fig", "banana", "kiwi"];
        quicksort_by(&mut words, |a: &&str, b: &&str| a.len().cmp(&b.len()).then(a.cmp(b)));
        assert_eq!(words, vec!["fig", "kiwi", "pear", "banana"]);
    }

    #[test]
    fn median_of_three_picks_middle_value() {
        let cmp = NaturalOrder;
        assert_eq!(median_of_three(&[1, 2, 3], 0, 1, 2, &cmp), 1);
        assert_eq!(median_of_three(&[3, 1, 2], 0, 1, 2, &cmp), 2);
        assert_eq!(median_of_three(&[2, 3, 1], 0, 1, 2, &cmp), 0);
        assert_eq!(median_of_three(&[5, 5, 5], 0, 1, 2, &cmp), 1);
    }

    fn by_key(a: &(u8, usize), b: &(u8, usize)) -> Ordering {
        a.0.cmp(&b.0)
    }

    proptest! {
        #[test]
        fn matches_std_sort(input in prop::collection::vec(any::<i32>(), 0..300)) {
            let mut expected = input.clone();
            expected.sort();

            let mut v = input.clone();
            insertion_sort(&mut v);
            prop_assert_eq!(&v, &expected);

            let mut v = input.clone();
            merge_sort(&mut v);
            prop_assert_eq!(&v, &expected);

            for strategy in STRATEGIES {
                let mut v = input.clone();
                quicksort_with(&mut v, strategy);
                prop_assert_eq!(&v, &expected);
            }
        }

        #[test]
        fn stable_sorts_keep_equal_keys_in_order(keys in prop::collection::vec(0..5u8, 0..200)) {
            let input: Vec<(u8, usize)> = keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect();
            let mut expected = input.clone();
            expected.sort_by(by_key);

            let mut v = input.clone();
            merge_sort_by(&mut v, by_key);
            prop_assert_eq!(&v, &expected);

            let mut v = input;
            insertion_sort_by(&mut v, by_key);
            prop_assert_eq!(&v, &expected);
        }
    }
}
