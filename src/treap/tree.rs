use crate::treap::node::Node;
use log::trace;
use rand::Rng;
use std::borrow::Borrow;
use std::cmp::Ordering;

pub type Tree<T> = Option<Box<Node<T>>>;

enum RemovalCase {
    Splice,
    RotateLeft,
    RotateRight,
}

/// Inserts `key` below `tree`, drawing a priority from `rng` only if a new node is created. Nodes
/// whose child outranks them are rotated down while the recursion unwinds.
pub fn insert<T, R>(tree: &mut Tree<T>, key: T, rng: &mut R) -> bool
where
    T: Ord,
    R: Rng,
{
    match *tree {
        Some(ref mut node) => match key.cmp(&node.key) {
            Ordering::Less => {
                let inserted = insert(&mut node.left, key, rng);
                if node.is_heap_property_violated(&node.left) {
                    node.rotate_right();
                }
                inserted
            },
            Ordering::Greater => {
                let inserted = insert(&mut node.right, key, rng);
                if node.is_heap_property_violated(&node.right) {
                    node.rotate_left();
                }
                inserted
            },
            Ordering::Equal => false,
        },
        None => {
            *tree = Some(Box::new(Node::new(key, rng.next_u32())));
            true
        },
    }
}

fn get_removal_case<T>(node: &Node<T>) -> RemovalCase {
    match (&node.left, &node.right) {
        (Some(left_node), Some(right_node)) => {
            if left_node.priority > right_node.priority {
                RemovalCase::RotateRight
            } else {
                RemovalCase::RotateLeft
            }
        },
        _ => RemovalCase::Splice,
    }
}

fn rotate_down<T>(tree: &mut Tree<T>, rotations: usize) -> Option<T> {
    let case = get_removal_case(tree.as_ref()?);
    match case {
        RemovalCase::RotateRight => {
            let node = tree.as_mut()?;
            node.rotate_right();
            rotate_down(&mut node.right, rotations + 1)
        },
        RemovalCase::RotateLeft => {
            let node = tree.as_mut()?;
            node.rotate_left();
            rotate_down(&mut node.left, rotations + 1)
        },
        RemovalCase::Splice => {
            let mut node = tree.take()?;
            *tree = node.left.take().or_else(|| node.right.take());
            trace!("spliced out treap node after {} rotations", rotations);
            Some(node.key)
        },
    }
}

pub fn remove<T, V>(tree: &mut Tree<T>, key: &V) -> Option<T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let ordering = match tree {
        Some(node) => key.cmp(node.key.borrow()),
        None => return None,
    };
    match ordering {
        Ordering::Less => tree.as_mut().and_then(|node| remove(&mut node.left, key)),
        Ordering::Greater => tree.as_mut().and_then(|node| remove(&mut node.right, key)),
        Ordering::Equal => rotate_down(tree, 0),
    }
}

pub fn contains<T, V>(tree: &Tree<T>, key: &V) -> bool
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    while let Some(node) = curr {
        match key.cmp(node.key.borrow()) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return true,
        }
    }
    false
}

pub fn predecessor<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    let mut best = None;
    while let Some(node) = curr {
        let node_key: &V = node.key.borrow();
        if node_key < key {
            best = Some(&node.key);
            curr = &node.right;
        } else {
            curr = &node.left;
        }
    }
    best
}

pub fn successor<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    let mut best = None;
    while let Some(node) = curr {
        let node_key: &V = node.key.borrow();
        if node_key > key {
            best = Some(&node.key);
            curr = &node.left;
        } else {
            curr = &node.right;
        }
    }
    best
}

pub fn collect_range<'a, T, V>(tree: &'a Tree<T>, lo: &V, hi: &V, out: &mut Vec<&'a T>)
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    if let Some(node) = tree {
        let key: &V = node.key.borrow();
        if key > lo {
            collect_range(&node.left, lo, hi, out);
        }
        if lo <= key && key <= hi {
            out.push(&node.key);
        }
        if key < hi {
            collect_range(&node.right, lo, hi, out);
        }
    }
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.key
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.key
    })
}
