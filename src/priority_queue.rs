//! A priority queue backed by a sorted array.
//!
//! Items are kept in ascending order, so the maximum is always the last
//! element: `find_max` and `delete_max` are O(1) while `insert` pays for a
//! binary search plus a shift of the tail.

use std::cmp::Ordering;

use log::debug;

use crate::{
    compare::{Comparator, NaturalOrder},
    error::CollectionError,
};

const INITIAL_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct SimplePriorityQueue<T, C = NaturalOrder> {
    items: Vec<T>,
    capacity: usize,
    cmp: C,
}

impl<T: Ord> SimplePriorityQueue<T> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Ord> Default for SimplePriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> SimplePriorityQueue<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            items: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            cmp,
        }
    }

    /// Returns the highest priority item without removing it.
    pub fn find_max(&self) -> Result<&T, CollectionError> {
        self.items
            .last()
            .ok_or(CollectionError::empty("priority queue"))
    }

    /// Removes and returns the highest priority item.
    pub fn delete_max(&mut self) -> Result<T, CollectionError> {
        self.items
            .pop()
            .ok_or(CollectionError::empty("priority queue"))
    }

    pub fn insert(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.grow();
        }
        let index = self.insertion_point(&item);
        self.items.insert(index, item);
    }

    pub fn insert_all(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.insert(item);
        }
    }

    /// Tells whether an item comparing equal to `item` is in the queue.
    pub fn contains(&self, item: &T) -> bool {
        let index = self
            .items
            .partition_point(|x| self.cmp.compare(x, item) == Ordering::Less);

        self.items
            .get(index)
            .map_or(false, |x| self.cmp.compare(x, item) == Ordering::Equal)
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

    /// The number of items the backing array holds before it has to grow.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from the lowest to the highest priority.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    // Equal items are placed after the existing ones, so insertion is stable.
    fn insertion_point(&self, item: &T) -> usize {
        self.items
            .partition_point(|x| self.cmp.compare(x, item) != Ordering::Greater)
    }

    fn grow(&mut self) {
        let capacity = self.capacity * 2;
        debug!(
            "growing priority queue from {} to {} slots",
            self.capacity, capacity
        );
        self.items.reserve_exact(capacity - self.items.len());
        self.capacity = capacity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue_has_no_max() {
        let mut queue = SimplePriorityQueue::<i32>::new();
        assert!(queue.is_empty());
        assert_eq!(
            queue.find_max(),
            Err(CollectionError::Empty {
                container: "priority queue"
            })
        );
        assert!(queue.delete_max().is_err());
    }

    #[test]
    fn delete_max_returns_descending_order() {
        let mut queue = SimplePriorityQueue::new();
        queue.insert_all([5, 1, 9, 3, 7]);

        let drained: Vec<_> = std::iter::from_fn(|| queue.delete_max().ok()).collect();
        assert_eq!(drained, vec![9, 7, 5, 3, 1]);
    }

    #[test]
    fn find_max_does_not_remove() {
        let mut queue = SimplePriorityQueue::new();
        queue.insert("b");
        queue.insert("c");
        queue.insert("a");
        assert_eq!(queue.find_max(), Ok(&"c"));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn contains_uses_binary_search() {
        let mut queue = SimplePriorityQueue::new();
        queue.insert_all(0..100);
        assert!(queue.contains(&0));
        assert!(queue.contains(&57));
        assert!(queue.contains(&99));
        assert!(!queue.contains(&100));
        assert!(!queue.contains(&-1));
    }

    #[test]
    fn contains_on_empty_queue() {
        let queue = SimplePriorityQueue::<u8>::new();
        assert!(!queue.contains(&1));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut queue = SimplePriorityQueue::new();
        queue.insert_all([2, 2, 2]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.delete_max(), Ok(2));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn capacity_doubles() {
        let mut queue = SimplePriorityQueue::new();
        assert_eq!(queue.capacity(), 10);
        queue.insert_all(0..11);
        assert_eq!(queue.capacity(), 20);
        queue.insert_all(11..21);
        assert_eq!(queue.capacity(), 40);
    }

    #[test]
    fn custom_comparator_orders_by_length() {
        let mut queue =
            SimplePriorityQueue::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
        queue.insert_all(["ccc", "a", "bb", "dddd"]);
        assert_eq!(queue.delete_max(), Ok("dddd"));
        assert_eq!(queue.delete_max(), Ok("ccc"));
        assert!(queue.contains(&"xx"));
    }

    #[test]
    fn clear_empties_queue() {
        let mut queue = SimplePriorityQueue::new();
        queue.insert_all([1, 2, 3]);
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.find_max().is_err());
    }
}
