use crate::arena::{Handle, NodeArena};
use crate::splay_tree::node::Node;
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// A bottom-up splay tree whose nodes live in a `NodeArena`.
pub struct Tree<T> {
    pub arena: NodeArena<Node<T>>,
    pub root: Option<Handle>,
}

impl<T> Tree<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            arena: NodeArena::with_capacity(capacity),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn key(&self, handle: Handle) -> &T {
        &self.arena[handle].key
    }

    /// Promotes `x` above its parent. The subtree of `x` lying between the two keys moves over to
    /// the parent, and `x` takes the parent's place under the grandparent.
    fn rotate(&mut self, x: Handle) {
        let p = self.arena[x].parent.expect("Expected rotated node to have a parent.");
        let g = self.arena[p].parent;

        if self.arena[p].is_left_child(x) {
            let middle = self.arena[x].right;
            self.arena[p].left = middle;
            if let Some(middle) = middle {
                self.arena[middle].parent = Some(p);
            }
            self.arena[x].right = Some(p);
        } else {
            let middle = self.arena[x].left;
            self.arena[p].right = middle;
            if let Some(middle) = middle {
                self.arena[middle].parent = Some(p);
            }
            self.arena[x].left = Some(p);
        }

        self.arena[p].parent = Some(x);
        self.arena[x].parent = g;
        if let Some(g) = g {
            if self.arena[g].is_left_child(p) {
                self.arena[g].left = Some(x);
            } else {
                self.arena[g].right = Some(x);
            }
        }
    }

    /// Moves `x` to the root using zig, zig-zig and zig-zag steps.
    pub fn splay(&mut self, x: Handle) {
        let mut rotations = 0;
        while let Some(p) = self.arena[x].parent {
            match self.arena[p].parent {
                None => {
                    self.rotate(x);
                    rotations += 1;
                },
                Some(g) => {
                    let same_side = self.arena[g].is_left_child(p) == self.arena[p].is_left_child(x);
                    if same_side {
                        self.rotate(p);
                    } else {
                        self.rotate(x);
                    }
                    self.rotate(x);
                    rotations += 2;
                },
            }
        }
        trace!("splayed node to root in {} rotations", rotations);
        self.root = Some(x);
    }

    /// Descends towards `key` and splays either the matching node or the last node visited. Returns
    /// `true` if `key` was found, in which case it is now at the root.
    pub fn find_or_last<V>(&mut self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut last = None;
        while let Some(handle) = curr {
            last = Some(handle);
            let node = &self.arena[handle];
            match key.cmp(node.key.borrow()) {
                Ordering::Less => curr = node.left,
                Ordering::Greater => curr = node.right,
                Ordering::Equal => {
                    self.splay(handle);
                    return true;
                },
            }
        }
        if let Some(handle) = last {
            self.splay(handle);
        }
        false
    }

    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        let mut curr = self.root;
        let mut parent = None;
        while let Some(handle) = curr {
            parent = Some(handle);
            let node = &self.arena[handle];
            match key.cmp(&node.key) {
                Ordering::Less => curr = node.left,
                Ordering::Greater => curr = node.right,
                Ordering::Equal => {
                    self.splay(handle);
                    return false;
                },
            }
        }

        let is_left = match parent {
            Some(parent) => key < self.arena[parent].key,
            None => false,
        };
        let new_node = self.arena.allocate(Node::new(key, parent));
        if let Some(parent) = parent {
            if is_left {
                self.arena[parent].left = Some(new_node);
            } else {
                self.arena[parent].right = Some(new_node);
            }
        }
        self.splay(new_node);
        true
    }

    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        if !self.find_or_last(key) {
            return None;
        }
        let root = self.root.take()?;
        let Node { key, left, right, .. } = self.arena.free(root);
        if let Some(left) = left {
            self.arena[left].parent = None;
        }
        if let Some(right) = right {
            self.arena[right].parent = None;
        }

        match left {
            None => self.root = right,
            Some(left) => {
                let max = self.max_of(left);
                self.splay(max);
                self.arena[max].right = right;
                if let Some(right) = right {
                    self.arena[right].parent = Some(max);
                }
                trace!("joined subtrees of removed root under its predecessor");
            },
        }
        Some(key)
    }

    pub fn min_of(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.arena[handle].left {
            handle = left;
        }
        handle
    }

    pub fn max_of(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.arena[handle].right {
            handle = right;
        }
        handle
    }

    pub fn predecessor<V>(&mut self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.find_or_last(key);
        let tree: &Self = self;
        let root = tree.root?;
        let root_key: &V = tree.key(root).borrow();
        if root_key < key {
            return Some(tree.key(root));
        }
        tree.arena[root]
            .left
            .map(|left| tree.key(tree.max_of(left)))
    }

    pub fn successor<V>(&mut self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.find_or_last(key);
        let tree: &Self = self;
        let root = tree.root?;
        let root_key: &V = tree.key(root).borrow();
        if root_key > key {
            return Some(tree.key(root));
        }
        tree.arena[root]
            .right
            .map(|right| tree.key(tree.min_of(right)))
    }

    /// Appends the keys of the subtree rooted at `curr` that lie in `[lo, hi]` to `out`, skipping
    /// subtrees that cannot contain any of them. The walk keeps its own stack since a splay tree
    /// can degenerate into a path.
    pub fn collect_range<'a, V>(&'a self, mut curr: Option<Handle>, lo: &V, hi: &V, out: &mut Vec<&'a T>)
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut stack = Vec::new();
        loop {
            while let Some(handle) = curr {
                let node = &self.arena[handle];
                let key: &V = node.key.borrow();
                stack.push(handle);
                curr = if key > lo { node.left } else { None };
            }

            let handle = match stack.pop() {
                Some(handle) => handle,
                None => break,
            };
            let node = &self.arena[handle];
            let key: &V = node.key.borrow();
            if key > hi {
                break;
            }
            if lo <= key {
                out.push(&node.key);
            }
            curr = if key < hi { node.right } else { None };
        }
    }
}
