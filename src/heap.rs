//! An array-backed binary max-heap.
//!
//! The element at index `i` has its children at `2i + 1` and `2i + 2`, and
//! every parent compares greater than or equal to both of its children.

mod k_largest;

pub use k_largest::{
    find_k_largest_heap, find_k_largest_heap_with, find_k_largest_sort,
    find_k_largest_sort_with,
};

use std::cmp::Ordering;

use log::debug;

use crate::{
    compare::{Comparator, NaturalOrder},
    error::CollectionError,
};

const INITIAL_CAPACITY: usize = 15;

#[derive(Debug, Clone)]
pub struct BinaryMaxHeap<T, C = NaturalOrder> {
    items: Vec<T>,
    capacity: usize,
    cmp: C,
}

impl<T: Ord> BinaryMaxHeap<T> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Builds a heap out of `items` in linear time.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_vec_with_comparator(items, NaturalOrder)
    }
}

impl<T: Ord> Default for BinaryMaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for BinaryMaxHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T, C: Comparator<T>> BinaryMaxHeap<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            items: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            cmp,
        }
    }

    pub fn from_vec_with_comparator(items: Vec<T>, cmp: C) -> Self {
        let mut capacity = INITIAL_CAPACITY;
        while capacity < items.len() {
            capacity = grown(capacity);
        }

        let mut heap = Self {
            items,
            capacity,
            cmp,
        };
        for index in (0..heap.items.len() / 2).rev() {
            heap.percolate_down(index);
        }
        heap
    }

    pub fn add(&mut self, item: T) {
        if self.items.len() == self.capacity {
            let capacity = grown(self.capacity);
            debug!("growing heap from {} to {} slots", self.capacity, capacity);
            self.items.reserve_exact(capacity - self.items.len());
            self.capacity = capacity;
        }
        self.items.push(item);
        self.percolate_up(self.items.len() - 1);
    }

    /// Returns the maximum item without removing it.
    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.items.first().ok_or(CollectionError::empty("heap"))
    }

    /// Removes and returns the maximum item.
    pub fn extract_max(&mut self) -> Result<T, CollectionError> {
        if self.items.is_empty() {
            return Err(CollectionError::empty("heap"));
        }

        let max = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.percolate_down(0);
        }
        Ok(max)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The items in backing-array order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.items.len());
        while let Ok(item) = self.extract_max() {
            sorted.push(item);
        }
        sorted.reverse();
        sorted
    }

    fn percolate_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.greater(child, parent) {
                self.items.swap(child, parent);
                child = parent;
            } else {
                break;
            }
        }
    }

    fn percolate_down(&mut self, mut parent: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * parent + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            let larger = if right < len && self.greater(right, left) {
                right
            } else {
                left
            };

            if self.greater(larger, parent) {
                self.items.swap(larger, parent);
                parent = larger;
            } else {
                break;
            }
        }
    }

    fn greater(&self, a: usize, b: usize) -> bool {
        self.cmp.compare(&self.items[a], &self.items[b]) == Ordering::Greater
    }
}

fn grown(capacity: usize) -> usize {
    capacity * 2 + 1
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn assert_heap_order<T: Ord + std::fmt::Debug>(items: &[T]) {
        for child in 1..items.len() {
            let parent = (child - 1) / 2;
            assert!(
                items[parent] >= items[child],
                "{:?} at {} is below its child {:?} at {}",
                items[parent],
                parent,
                items[child],
                child
            );
        }
    }

    #[test]
    fn empty_heap() {
        let mut heap = BinaryMaxHeap::<i32>::new();
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), Err(CollectionError::Empty { container: "heap" }));
        assert!(heap.extract_max().is_err());
    }

    #[test]
    fn add_keeps_max_on_top() {
        let mut heap = BinaryMaxHeap::new();
        for n in [3, 10, 1, 8, 7, 12, 2] {
            heap.add(n);
            assert_heap_order(heap.as_slice());
        }
        assert_eq!(heap.peek(), Ok(&12));
        assert_eq!(heap.len(), 7);
    }

    #[test]
    fn backing_array_after_adds() {
        let mut heap = BinaryMaxHeap::new();
        for n in [1, 2, 3, 4, 5] {
            heap.add(n);
        }
        assert_eq!(heap.to_vec(), vec![5, 4, 2, 1, 3]);
    }

    #[test]
    fn extract_max_in_descending_order() {
        let mut heap = BinaryMaxHeap::from_vec(vec![4, 9, 1, 7, 3, 8, 8]);
        let mut out = vec![];
        while let Ok(max) = heap.extract_max() {
            assert_heap_order(heap.as_slice());
            out.push(max);
        }
        assert_eq!(out, vec![9, 8, 8, 7, 4, 3, 1]);
    }

    #[test]
    fn build_heap_from_list() {
        let heap = BinaryMaxHeap::from_vec((0..100).collect());
        assert_heap_order(heap.as_slice());
        assert_eq!(heap.peek(), Ok(&99));
    }

    #[test]
    fn capacity_grows_to_two_n_plus_one() {
        let mut heap = BinaryMaxHeap::new();
        assert_eq!(heap.capacity(), 15);
        for n in 0..16 {
            heap.add(n);
        }
        assert_eq!(heap.capacity(), 31);

        let built = BinaryMaxHeap::from_vec((0..40).collect());
        assert_eq!(built.capacity(), 63);
    }

    #[test]
    fn custom_comparator_makes_min_heap() {
        let mut heap = BinaryMaxHeap::with_comparator(crate::compare::Reverse(NaturalOrder));
        for n in [5, 2, 8, 1] {
            heap.add(n);
        }
        assert_eq!(heap.extract_max(), Ok(1));
        assert_eq!(heap.extract_max(), Ok(2));
    }

    #[test]
    fn clear_empties_heap() {
        let mut heap: BinaryMaxHeap<_> = [1, 2, 3].into_iter().collect();
        heap.clear();
        assert!(heap.is_empty());
        assert!(heap.peek().is_err());
    }

    #[test]
    fn into_sorted_vec_is_ascending() {
        let heap: BinaryMaxHeap<_> = [3, 1, 2].into_iter().collect();
        assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3]);
    }

    fn drain<T: Ord + std::fmt::Debug>(mut heap: BinaryMaxHeap<T>) -> Vec<T> {
        let mut out = Vec::with_capacity(heap.len());
        while let Ok(max) = heap.extract_max() {
            assert_heap_order(heap.as_slice());
            out.push(max);
        }
        out
    }

    proptest! {
        #[test]
        fn add_and_build_agree_with_sorting(items in prop::collection::vec(any::<i32>(), 0..300)) {
            let mut expected = items.clone();
            expected.sort_by(|a, b| b.cmp(a));

            let mut added = BinaryMaxHeap::new();
            for &item in &items {
                added.add(item);
            }
            assert_heap_order(added.as_slice());
            prop_assert_eq!(drain(added), expected.clone());

            let built = BinaryMaxHeap::from_vec(items);
            assert_heap_order(built.as_slice());
            prop_assert_eq!(drain(built), expected);
        }
    }
}
