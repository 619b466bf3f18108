//! An unbalanced binary search tree with set semantics.
//!
//! Every node owns its children, so the parent/child relation is encoded in
//! the ownership itself and there are no back-pointers to keep consistent.
//! All operations walk the tree iteratively; a degenerate tree built from
//! sorted input is as deep as it is long.

mod iter;

pub use iter::Iter;

use std::{cmp::Ordering, collections::VecDeque, fmt::Debug};

use crate::error::CollectionError;

type Tree<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    left: Tree<T>,
    right: Tree<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

pub struct BinarySearchTree<T> {
    root: Tree<T>,
    len: usize,
}

impl<T: Ord> BinarySearchTree<T> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts `value`, returning `false` if an equal value is already present.
    pub fn add(&mut self, value: T) -> bool {
        let link = Self::find_link(&mut self.root, &value);
        if link.is_some() {
            return false;
        }
        *link = Some(Box::new(Node::leaf(value)));
        self.len += 1;
        true
    }

    /// Inserts every value, returning `true` if at least one was new.
    pub fn add_all(&mut self, values: impl IntoIterator<Item = T>) -> bool {
        values
            .into_iter()
            .fold(false, |changed, value| self.add(value) || changed)
    }

    pub fn contains(&self, value: &T) -> bool {
        let mut tree = self.root.as_deref();
        while let Some(node) = tree {
            tree = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    pub fn contains_all<'a>(&self, values: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Removes `value`, returning `false` if it was not present.
    ///
    /// A node with two children takes the value of its in-order successor,
    /// which is then unlinked from the right subtree.
    pub fn remove(&mut self, value: &T) -> bool {
        let link = Self::find_link(&mut self.root, value);
        let Some(node) = link.take() else {
            return false;
        };
        *link = Self::unlink(node);
        self.len -= 1;
        true
    }

    /// Removes every value, returning `true` if at least one was present.
    pub fn remove_all<'a>(&mut self, values: impl IntoIterator<Item = &'a T>) -> bool
    where
        T: 'a,
    {
        values
            .into_iter()
            .fold(false, |changed, value| self.remove(value) || changed)
    }

    // Returns the link holding a value equal to `value`, or the empty link
    // where it would be inserted.
    fn find_link<'a>(mut link: &'a mut Tree<T>, value: &T) -> &'a mut Tree<T> {
        loop {
            match link.as_deref().map(|node| value.cmp(&node.value)) {
                None | Some(Ordering::Equal) => return link,
                Some(Ordering::Less) => {
                    link = &mut link.as_mut().expect("link is occupied").left;
                }
                Some(Ordering::Greater) => {
                    link = &mut link.as_mut().expect("link is occupied").right;
                }
            }
        }
    }

    // Returns the subtree that replaces `node` once it is removed.
    fn unlink(mut node: Box<Node<T>>) -> Tree<T> {
        match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                let (successor, right) = Self::take_min(right);
                node.value = successor;
                node.left = Some(left);
                node.right = right;
                Some(node)
            }
        }
    }

    // Splits the minimum value off the subtree rooted at `root`.
    fn take_min(mut root: Box<Node<T>>) -> (T, Tree<T>) {
        if root.left.is_none() {
            let Node { value, right, .. } = *root;
            return (value, right);
        }

        let mut parent = &mut root;
        while parent.left.as_ref().map_or(false, |left| left.left.is_some()) {
            parent = parent.left.as_mut().expect("left child exists");
        }

        let min = parent.left.take().expect("left child exists");
        let Node { value, right, .. } = *min;
        parent.left = right;
        (value, Some(root))
    }
}

impl<T> BinarySearchTree<T> {
    /// The smallest value.
    pub fn first(&self) -> Result<&T, CollectionError> {
        let mut node = self.root.as_deref().ok_or(CollectionError::empty("tree"))?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.value)
    }

    /// The largest value.
    pub fn last(&self) -> Result<&T, CollectionError> {
        let mut node = self.root.as_deref().ok_or(CollectionError::empty("tree"))?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.value)
    }

    pub fn root(&self) -> Option<&T> {
        self.root.as_deref().map(|node| &node.value)
    }

    /// Number of edges on the longest root-to-leaf path; `None` for an empty tree.
    pub fn height(&self) -> Option<usize> {
        let root = self.root.as_deref()?;

        let mut queue = VecDeque::from([(root, 0)]);
        let mut height = 0;
        while let Some((node, depth)) = queue.pop_front() {
            height = height.max(depth);
            queue.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            queue.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }
        Some(height)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        let mut pending: Vec<_> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Iterates in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref())
    }

    /// The values in ascending order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Drop for BinarySearchTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Ord> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.add_all(iter);
        tree
    }
}

impl<T: Debug> Debug for BinarySearchTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a BinarySearchTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //        50
    //      /    \
    //    30      70
    //   /  \    /  \
    //  20  40  60  80
    fn sample() -> BinarySearchTree<i32> {
        [50, 30, 70, 20, 40, 60, 80].into_iter().collect()
    }

    #[test]
    fn empty_tree() {
        let tree = BinarySearchTree::<i32>::new();
        assert!(tree.is_empty());
        assert_eq!(tree.first(), Err(CollectionError::Empty { container: "tree" }));
        assert_eq!(tree.last(), Err(CollectionError::Empty { container: "tree" }));
        assert_eq!(tree.root(), None);
        assert_eq!(tree.height(), None);
        assert!(!tree.contains(&1));
    }

    #[test]
    fn add_rejects_duplicates() {
        let mut tree = BinarySearchTree::new();
        assert!(tree.add(5));
        assert!(!tree.add(5));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn add_all_reports_change() {
        let mut tree = sample();
        assert!(!tree.add_all([20, 50]));
        assert!(tree.add_all([20, 55]));
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn in_order_traversal() {
        assert_eq!(sample().to_vec(), vec![20, 30, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn first_last_root_height() {
        let tree = sample();
        assert_eq!(tree.first(), Ok(&20));
        assert_eq!(tree.last(), Ok(&80));
        assert_eq!(tree.root(), Some(&50));
        assert_eq!(tree.height(), Some(2));
    }

    #[test]
    fn contains_all() {
        let tree = sample();
        assert!(tree.contains_all(&[20, 80, 50]));
        assert!(!tree.contains_all(&[20, 81]));
    }

    #[test]
    fn remove_leaf() {
        let mut tree = sample();
        assert!(tree.remove(&20));
        assert!(!tree.contains(&20));
        assert_eq!(tree.to_vec(), vec![30, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn remove_node_with_one_child() {
        let mut tree = sample();
        tree.remove(&20);
        assert!(tree.remove(&30));
        assert_eq!(tree.to_vec(), vec![40, 50, 60, 70, 80]);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn remove_node_with_two_children() {
        let mut tree = sample();
        assert!(tree.remove(&70));
        assert_eq!(tree.to_vec(), vec![20, 30, 40, 50, 60, 80]);
    }

    #[test]
    fn remove_root_uses_successor() {
        let mut tree = sample();
        assert!(tree.remove(&50));
        assert_eq!(tree.root(), Some(&60));
        assert_eq!(tree.to_vec(), vec![20, 30, 40, 60, 70, 80]);
    }

    #[test]
    fn remove_successor_with_right_child() {
        let mut tree: BinarySearchTree<_> = [10, 5, 20, 15, 30, 17].into_iter().collect();
        assert!(tree.remove(&10));
        assert_eq!(tree.root(), Some(&15));
        assert_eq!(tree.to_vec(), vec![5, 15, 17, 20, 30]);
    }

    #[test]
    fn remove_missing() {
        let mut tree = sample();
        assert!(!tree.remove(&45));
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn remove_all_reports_change() {
        let mut tree = sample();
        assert!(tree.remove_all(&[20, 99]));
        assert!(!tree.remove_all(&[99]));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn remove_everything() {
        let mut tree = sample();
        for n in [50, 20, 80, 30, 70, 40, 60] {
            assert!(tree.remove(&n));
        }
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn degenerate_tree_does_not_overflow() {
        let tree: BinarySearchTree<u32> = (0..10_000).collect();
        assert_eq!(tree.height(), Some(9_999));
        assert_eq!(tree.last(), Ok(&9_999));
        drop(tree);
    }

    #[test]
    fn clear_resets() {
        let mut tree = sample();
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.add(1));
    }
}
