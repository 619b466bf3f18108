use crate::{
    compare::{Comparator, NaturalOrder},
    error::CollectionError,
};

use super::BinaryMaxHeap;

/// Returns the `k` largest items in descending order, by building a max-heap
/// and extracting `k` times.
pub fn find_k_largest_heap<T: Ord + Clone>(items: &[T], k: usize) -> Result<Vec<T>, CollectionError> {
    find_k_largest_heap_with(items, k, NaturalOrder)
}

pub fn find_k_largest_heap_with<T: Clone, C: Comparator<T>>(
    items: &[T],
    k: usize,
    cmp: C,
) -> Result<Vec<T>, CollectionError> {
    check_k(items.len(), k)?;

    let mut heap = BinaryMaxHeap::from_vec_with_comparator(items.to_vec(), cmp);
    (0..k).map(|_| heap.extract_max()).collect()
}

/// Returns the `k` largest items in descending order, by sorting a copy of the input.
pub fn find_k_largest_sort<T: Ord + Clone>(items: &[T], k: usize) -> Result<Vec<T>, CollectionError> {
    find_k_largest_sort_with(items, k, NaturalOrder)
}

pub fn find_k_largest_sort_with<T: Clone, C: Comparator<T>>(
    items: &[T],
    k: usize,
    cmp: C,
) -> Result<Vec<T>, CollectionError> {
    check_k(items.len(), k)?;

    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| cmp.compare(b, a));
    sorted.truncate(k);
    Ok(sorted)
}

fn check_k(len: usize, k: usize) -> Result<(), CollectionError> {
    if k > len {
        Err(CollectionError::InvalidArgument(format!(
            "cannot take the {k} largest of {len} items"
        )))
    } else {
        Ok(())
    }
}
