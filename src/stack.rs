use crate::{error::CollectionError, linked_list::SinglyLinkedList};

/// A LIFO stack whose top is the head of a singly linked list.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedListStack<T> {
    list: SinglyLinkedList<T>,
}

impl<T> LinkedListStack<T> {
    pub fn new() -> Self {
        Self {
            list: SinglyLinkedList::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.list.insert_first(value);
    }

    pub fn pop(&mut self) -> Result<T, CollectionError> {
        self.list
            .delete_first()
            .map_err(|_| CollectionError::empty("stack"))
    }

    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.list.first().map_err(|_| CollectionError::empty("stack"))
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Iterates from the top of the stack down.
    pub fn iter(&self) -> crate::linked_list::Iter<'_, T> {
        self.list.iter()
    }
}

impl<T> Default for LinkedListStack<T> {
    fn default() -> Self {
        Self::new()
    }
}
