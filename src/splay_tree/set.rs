use crate::arena::Handle;
use crate::ordered_set::OrderedSet;
use crate::splay_tree::node::Node;
use crate::splay_tree::tree::Tree;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;

/// An ordered set implemented using a splay tree.
///
/// A splay tree is a self-adjusting binary search tree with the additional property that recently
/// accessed keys are quick to access again. Every insertion, removal and lookup "splays" the key
/// it touched, or the last key it visited if the lookup failed, to the root of the tree using
/// zig, zig-zig and zig-zag rotations. Any sequence of `M` operations on a set of size `N` takes
/// `O(M log N)` time, so each operation is `O(log N)` amortized.
///
/// Because lookups restructure the tree, `contains`, `predecessor` and `successor` take
/// `&mut self`. `min`, `max`, `range` and iteration do not splay.
///
/// # Examples
///
/// ```
/// use ordered_sets::SplaySet;
///
/// let mut set = SplaySet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert!(set.contains(&0));
/// assert!(!set.contains(&1));
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.successor(&0), Some(&3));
/// assert_eq!(set.predecessor(&0), None);
/// assert_eq!(set.range(&0, &2), vec![&0]);
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct SplaySet<T> {
    tree: Tree<T>,
}

impl<T> SplaySet<T> {
    /// Constructs a new, empty `SplaySet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let set: SplaySet<u32> = SplaySet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty `SplaySet<T>` that can hold `capacity` keys before its node
    /// storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let set: SplaySet<u32> = SplaySet::with_capacity(1024);
    /// assert!(set.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        SplaySet {
            tree: Tree::with_capacity(capacity),
        }
    }

    /// Inserts a key into the set and splays it to the root. Returns `true` if the key was not
    /// already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        self.tree.insert(key)
    }

    /// Removes a key from the set. Returns the removed key, or `None` if it was not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(key)
    }

    /// Checks if a key exists in the set. The key, or the last key visited while looking for it,
    /// is splayed to the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&mut self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.find_or_last(key)
    }

    /// Returns the greatest key in the set that is strictly less than a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.predecessor(&1), None);
    /// assert_eq!(set.predecessor(&3), Some(&1));
    /// assert_eq!(set.predecessor(&5), Some(&3));
    /// ```
    pub fn predecessor<V>(&mut self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.predecessor(key)
    }

    /// Returns the least key in the set that is strictly greater than a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.successor(&0), Some(&1));
    /// assert_eq!(set.successor(&1), Some(&3));
    /// assert_eq!(set.successor(&3), None);
    /// ```
    pub fn successor<V>(&mut self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.successor(key)
    }

    /// Returns the keys in the inclusive range `[lo, hi]` in ascending order. The tree is not
    /// restructured.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// for key in 0..10 {
    ///     set.insert(key);
    /// }
    /// assert_eq!(set.range(&3, &5), vec![&3, &4, &5]);
    /// assert!(set.range(&5, &3).is_empty());
    /// ```
    pub fn range<V>(&self, lo: &V, hi: &V) -> Vec<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut ret = Vec::new();
        self.tree.collect_range(self.tree.root, lo, hi, &mut ret);
        ret
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the set, removing all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the minimum key of the set without splaying. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree
            .root
            .map(|root| self.tree.key(self.tree.min_of(root)))
    }

    /// Returns the maximum key of the set without splaying. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree
            .root
            .map(|root| self.tree.key(self.tree.max_of(root)))
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::SplaySet;
    ///
    /// let mut set = SplaySet::new();
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SplaySetIter<'_, T> {
        SplaySetIter {
            tree: &self.tree,
            current: self.tree.root,
            stack: Vec::new(),
            remaining: self.len(),
        }
    }
}

impl<T> OrderedSet<T> for SplaySet<T>
where
    T: Ord,
{
    fn insert(&mut self, key: T) -> bool {
        SplaySet::insert(self, key)
    }

    fn remove(&mut self, key: &T) -> Option<T> {
        SplaySet::remove(self, key)
    }

    fn contains(&mut self, key: &T) -> bool {
        SplaySet::contains(self, key)
    }

    fn predecessor(&mut self, key: &T) -> Option<&T> {
        SplaySet::predecessor(self, key)
    }

    fn successor(&mut self, key: &T) -> Option<&T> {
        SplaySet::successor(self, key)
    }

    fn range(&self, lo: &T, hi: &T) -> Vec<&T> {
        SplaySet::range(self, lo, hi)
    }

    fn len(&self) -> usize {
        SplaySet::len(self)
    }
}

impl<T> IntoIterator for SplaySet<T> {
    type IntoIter = SplaySetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        let current = self.tree.root;
        Self::IntoIter {
            tree: self.tree,
            current,
            stack: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a SplaySet<T>
where
    T: 'a,
{
    type IntoIter = SplaySetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `SplaySet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct SplaySetIntoIter<T> {
    tree: Tree<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<T> Iterator for SplaySetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.tree.arena[handle].left;
        }
        self.stack.pop().map(|handle| {
            let Node { key, right, .. } = self.tree.arena.free(handle);
            self.current = right;
            key
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tree.len();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for SplaySetIntoIter<T> {}

/// An iterator for `SplaySet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct SplaySetIter<'a, T>
where
    T: 'a,
{
    tree: &'a Tree<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
    remaining: usize,
}

impl<'a, T> Iterator for SplaySetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = tree.arena[handle].left;
        }
        self.stack.pop().map(|handle| {
            let node = &tree.arena[handle];
            self.current = node.right;
            self.remaining -= 1;
            &node.key
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for SplaySetIter<'a, T> where T: 'a {}

impl<T> Default for SplaySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for SplaySet<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = SplaySet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for SplaySet<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> fmt::Debug for SplaySet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for SplaySet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for SplaySet<T> where T: Eq {}

impl<T> Serialize for SplaySet<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T> Deserialize<'de> for SplaySet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SplaySetVisitor<T> {
            marker: PhantomData<T>,
        }

        impl<'de, T> Visitor<'de> for SplaySetVisitor<T>
        where
            T: Deserialize<'de> + Ord,
        {
            type Value = SplaySet<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of keys")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let capacity = seq.size_hint().unwrap_or(0).min(4096);
                let mut set = SplaySet::with_capacity(capacity);
                while let Some(key) = seq.next_element()? {
                    set.insert(key);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(SplaySetVisitor {
            marker: PhantomData,
        })
    }
}
