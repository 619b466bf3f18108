//! A singly linked list of owned nodes.

mod cursor;

pub use cursor::Cursor;

use std::fmt::Debug;

use crate::error::CollectionError;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

pub struct SinglyLinkedList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> SinglyLinkedList<T> {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn insert_first(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    /// Inserts `value` so that it ends up at position `index`.
    /// `index == len()` appends to the end of the list.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        if index > self.len {
            return Err(CollectionError::out_of_bounds(index, self.len));
        }

        let link = self.link_at(index);
        let next = link.take();
        *link = Some(Box::new(Node { value, next }));
        self.len += 1;
        Ok(())
    }

    pub fn first(&self) -> Result<&T, CollectionError> {
        self.head
            .as_ref()
            .map(|node| &node.value)
            .ok_or(CollectionError::empty("list"))
    }

    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        self.iter()
            .nth(index)
            .ok_or(CollectionError::out_of_bounds(index, self.len))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, CollectionError> {
        let len = self.len;
        self.iter_mut()
            .nth(index)
            .ok_or(CollectionError::out_of_bounds(index, len))
    }

    pub fn delete_first(&mut self) -> Result<T, CollectionError> {
        let node = self.head.take().ok_or(CollectionError::empty("list"))?;
        self.head = node.next;
        self.len -= 1;
        Ok(node.value)
    }

    pub fn delete(&mut self, index: usize) -> Result<T, CollectionError> {
        if index >= self.len {
            return Err(CollectionError::out_of_bounds(index, self.len));
        }

        let len = self.len;
        let link = self.link_at(index);
        let node = link
            .take()
            .ok_or(CollectionError::out_of_bounds(index, len))?;
        *link = node.next;
        self.len -= 1;
        Ok(node.value)
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|x| x == value)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.drop_nodes();
        self.len = 0;
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
        }
    }

    /// Returns a cursor positioned before the first element, which can
    /// remove the element it last returned.
    pub fn cursor(&mut self) -> Cursor<'_, T> {
        Cursor::new(&mut self.head, &mut self.len)
    }

    // The caller guarantees `index <= len`.
    fn link_at(&mut self, index: usize) -> &mut Link<T> {
        let mut link = &mut self.head;
        for _ in 0..index {
            link = &mut link.as_mut().expect("index is within the list").next;
        }
        link
    }

    fn drop_nodes(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        self.drop_nodes();
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SinglyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Debug> Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for SinglyLinkedList<T> {
    /// Appends to the end of the list.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut link = self.link_at(self.len);
        let mut added = 0;
        for value in iter {
            let node = link.insert(Box::new(Node { value, next: None }));
            link = &mut node.next;
            added += 1;
        }
        self.len += added;
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            &mut node.value
        })
    }
}

pub struct IntoIter<T>(SinglyLinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.delete_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> IntoIterator for SinglyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[i32]) -> SinglyLinkedList<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn empty() {
        let mut list = SinglyLinkedList::<i32>::new();
        assert!(list.is_empty());
        assert_eq!(list.first(), Err(CollectionError::Empty { container: "list" }));
        assert!(list.delete_first().is_err());
        assert_eq!(
            list.get(0),
            Err(CollectionError::IndexOutOfBounds { index: 0, len: 0 })
        );
    }

    #[test]
    fn insert_first_prepends() {
        let mut list = SinglyLinkedList::new();
        list.insert_first(3);
        list.insert_first(2);
        list.insert_first(1);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert_eq!(list.first(), Ok(&1));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn insert_at_index() {
        let mut list = list_of(&[1, 3]);
        assert_eq!(list.insert(1, 2), Ok(()));
        assert_eq!(list.insert(3, 4), Ok(()));
        assert_eq!(list.insert(0, 0), Ok(()));
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn insert_past_end_fails() {
        let mut list = list_of(&[1]);
        assert_eq!(
            list.insert(2, 5),
            Err(CollectionError::IndexOutOfBounds { index: 2, len: 1 })
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn get_and_get_mut() {
        let mut list = list_of(&[10, 20, 30]);
        assert_eq!(list.get(2), Ok(&30));
        *list.get_mut(1).unwrap() = 21;
        assert_eq!(list.to_vec(), vec![10, 21, 30]);
        assert!(list.get(3).is_err());
    }

    #[test]
    fn delete_by_index() {
        let mut list = list_of(&[1, 2, 3, 4]);
        assert_eq!(list.delete(2), Ok(3));
        assert_eq!(list.delete(0), Ok(1));
        assert_eq!(list.delete(1), Ok(4));
        assert_eq!(list.to_vec(), vec![2]);
        assert_eq!(
            list.delete(1),
            Err(CollectionError::IndexOutOfBounds { index: 1, len: 1 })
        );
    }

    #[test]
    fn index_of_finds_first_match() {
        let list = list_of(&[5, 6, 5]);
        assert_eq!(list.index_of(&5), Some(0));
        assert_eq!(list.index_of(&6), Some(1));
        assert_eq!(list.index_of(&7), None);
    }

    #[test]
    fn clear_resets_len() {
        let mut list = list_of(&[1, 2, 3]);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn extend_appends() {
        let mut list = list_of(&[1]);
        list.extend([2, 3]);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn into_iter_consumes_in_order() {
        let list = list_of(&[1, 2, 3]);
        assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn long_list_drops_without_overflow() {
        let list: SinglyLinkedList<u32> = (0..200_000).collect();
        assert_eq!(list.len(), 200_000);
        drop(list);
    }
}
