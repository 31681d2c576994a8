//! Ordered key sets backed by two self-balancing binary search trees.
//!
//! [`SplaySet`](splay_tree::SplaySet) moves every accessed key to the root and gives amortized
//! `O(log N)` operations. [`TreapSet`](treap::TreapSet) keeps a random max-heap order on node
//! priorities and gives expected `O(log N)` operations. Both implement
//! [`OrderedSet`](ordered_set::OrderedSet).

pub mod arena;
pub mod error;
pub mod ordered_set;
pub mod splay_tree;
pub mod treap;

pub use crate::error::{Error, Result};
pub use crate::ordered_set::OrderedSet;
pub use crate::splay_tree::SplaySet;
pub use crate::treap::TreapSet;
