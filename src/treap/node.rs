use crate::treap::tree::Tree;
use std::mem;

/// A struct representing an internal node of a treap.
pub struct Node<T> {
    pub key: T,
    pub priority: u32,
    pub left: Tree<T>,
    pub right: Tree<T>,
}

impl<T> Node<T> {
    pub fn new(key: T, priority: u32) -> Self {
        Node {
            key,
            priority,
            left: None,
            right: None,
        }
    }

    /// Returns `true` if `child` has a higher priority than this node.
    pub fn is_heap_property_violated(&self, child: &Tree<T>) -> bool {
        match child {
            Some(child) => child.priority > self.priority,
            None => false,
        }
    }

    /// Promotes the right child into this node's place. The contents of the boxes are swapped so
    /// that whoever owns this node ends up owning the promoted child.
    pub fn rotate_left(&mut self) {
        let mut child = self.right.take().expect("Expected right child node to be `Some`.");
        self.right = child.left.take();
        mem::swap(&mut *child, self);
        self.left = Some(child);
    }

    /// Promotes the left child into this node's place.
    pub fn rotate_right(&mut self) {
        let mut child = self.left.take().expect("Expected left child node to be `Some`.");
        self.left = child.right.take();
        mem::swap(&mut *child, self);
        self.right = Some(child);
    }
}
