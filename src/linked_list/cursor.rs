use crate::error::CollectionError;

use super::Link;

/// Walks a [`SinglyLinkedList`](super::SinglyLinkedList) front to back and
/// can unlink the element most recently returned by [`Cursor::next`].
pub struct Cursor<'a, T> {
    // Holds the element last returned by `next` when `returned` is set,
    // otherwise the next element to visit.
    link: Option<&'a mut Link<T>>,
    len: &'a mut usize,
    returned: bool,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(head: &'a mut Link<T>, len: &'a mut usize) -> Self {
        Self {
            link: Some(head),
            len,
            returned: false,
        }
    }

    pub fn has_next(&self) -> bool {
        match self.link.as_deref() {
            Some(Some(node)) if self.returned => node.next.is_some(),
            Some(link) => !self.returned && link.is_some(),
            None => false,
        }
    }

    /// Advances the cursor and returns the element it moved over.
    ///
    /// At the end of the list the cursor stays on the element last
    /// returned, so it can still be removed.
    pub fn next(&mut self) -> Option<&mut T> {
        if self.returned {
            if !self.has_next() {
                return None;
            }
            if let Some(Some(node)) = self.link.take() {
                self.link = Some(&mut node.next);
            }
        }

        let node = self.link.as_mut()?.as_mut()?;
        self.returned = true;
        Some(&mut node.value)
    }

    /// Unlinks and returns the element last returned by `next`.
    ///
    /// Fails if `next` has not been called yet, or if the element was
    /// already removed.
    pub fn remove(&mut self) -> Result<T, CollectionError> {
        if !self.returned {
            return Err(CollectionError::IllegalState(
                "remove must follow a call to next",
            ));
        }

        let link = self
            .link
            .as_mut()
            .ok_or(CollectionError::IllegalState("cursor is exhausted"))?;
        let node = link
            .take()
            .ok_or(CollectionError::IllegalState("cursor is exhausted"))?;
        **link = node.next;
        *self.len -= 1;
        self.returned = false;
        Ok(node.value)
    }
}
