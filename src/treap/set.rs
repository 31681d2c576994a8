use crate::error::{Error, Result};
use crate::ordered_set::OrderedSet;
use crate::treap::node::Node;
use crate::treap::tree;
use log::debug;
use rand::{Rng, SeedableRng, XorShiftRng};
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::result;

/// An ordered set implemented using a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key and a priority. The key of any node is greater than all keys in its left subtree
/// and less than all keys occuring in its right subtree. The priority of a node is greater than or
/// equal to the priority of all nodes in its subtrees. By randomly generating priorities, the
/// expected height of the tree is proportional to the logarithm of the number of keys.
///
/// Priorities are drawn from a generator owned by the set, so a treap built with the same seed and
/// the same sequence of operations always has the same shape. Lookups never restructure the tree.
///
/// # Examples
///
/// ```
/// use ordered_sets::TreapSet;
///
/// let mut set = TreapSet::new();
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
pub struct TreapSet<T, R = XorShiftRng> {
    tree: tree::Tree<T>,
    rng: R,
    len: usize,
}

impl<T> TreapSet<T> {
    /// Constructs a new, empty `TreapSet<T>` whose priorities come from an `XorShiftRng` with a
    /// fixed default seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::TreapSet;
    ///
    /// let set: TreapSet<u32> = TreapSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_rng(XorShiftRng::new_unseeded())
    }

    /// Constructs a new, empty `TreapSet<T>` whose priorities come from an `XorShiftRng` seeded
    /// with `seed`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ZeroSeed` if every word of `seed` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::{Error, TreapSet};
    ///
    /// let set: TreapSet<u32> = TreapSet::with_seed([1, 2, 3, 4]).unwrap();
    /// assert!(set.is_empty());
    ///
    /// assert_eq!(TreapSet::<u32>::with_seed([0; 4]).err(), Some(Error::ZeroSeed));
    /// ```
    pub fn with_seed(seed: [u32; 4]) -> Result<Self> {
        if seed.iter().all(|word| *word == 0) {
            return Err(Error::ZeroSeed);
        }
        debug!("seeding treap priorities with {:?}", seed);
        Ok(Self::with_rng(XorShiftRng::from_seed(seed)))
    }
}

impl<T, R> TreapSet<T, R>
where
    R: Rng,
{
    /// Constructs a new, empty `TreapSet<T, R>` that draws priorities from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::TreapSet;
    /// use rand::{SeedableRng, XorShiftRng};
    ///
    /// let rng: XorShiftRng = SeedableRng::from_seed([1, 2, 3, 4]);
    /// let mut set = TreapSet::with_rng(rng);
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// ```
    pub fn with_rng(rng: R) -> Self {
        TreapSet {
            tree: None,
            rng,
            len: 0,
        }
    }

    /// Inserts a key into the set. Returns `true` if the key was not already present. Inserting a
    /// key that is already present leaves the tree unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        let TreapSet {
            ref mut tree,
            ref mut rng,
            ref mut len,
        } = self;
        let inserted = tree::insert(tree, key, rng);
        if inserted {
            *len += 1;
        }
        inserted
    }
}

impl<T, R> TreapSet<T, R> {
    /// Removes a key from the set. Returns the removed key, or `None` if it was not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let TreapSet {
            ref mut tree,
            ref mut len,
            ..
        } = self;
        tree::remove(tree, key).map(|key| {
            *len -= 1;
            key
        })
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::contains(&self.tree, key)
    }

    /// Returns the greatest key in the set that is strictly less than a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.predecessor(&1), None);
    /// assert_eq!(set.predecessor(&3), Some(&1));
    /// assert_eq!(set.predecessor(&5), Some(&3));
    /// ```
    pub fn predecessor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::predecessor(&self.tree, key)
    }

    /// Returns the least key in the set that is strictly greater than a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.successor(&0), Some(&1));
    /// assert_eq!(set.successor(&1), Some(&3));
    /// assert_eq!(set.successor(&3), None);
    /// ```
    pub fn successor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::successor(&self.tree, key)
    }

    /// Returns the keys in the inclusive range `[lo, hi]` in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::TreapSet;
    ///
    /// let mut set = TreapSet::new();
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
        tree::collect_range(&self.tree, lo, hi, &mut ret);
        ret
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the set, removing all keys. The priority generator keeps its state.
    pub fn clear(&mut self) {
        self.tree = None;
        self.len = 0;
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.tree)
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.tree)
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapSetIter<'_, T> {
        TreapSetIter {
            current: &self.tree,
            stack: Vec::new(),
            remaining: self.len,
        }
    }
}

impl<T, R> OrderedSet<T> for TreapSet<T, R>
where
    T: Ord,
    R: Rng,
{
    fn insert(&mut self, key: T) -> bool {
        TreapSet::insert(self, key)
    }

    fn remove(&mut self, key: &T) -> Option<T> {
        TreapSet::remove(self, key)
    }

    fn contains(&mut self, key: &T) -> bool {
        TreapSet::contains(self, key)
    }

    fn predecessor(&mut self, key: &T) -> Option<&T> {
        TreapSet::predecessor(self, key)
    }

    fn successor(&mut self, key: &T) -> Option<&T> {
        TreapSet::successor(self, key)
    }

    fn range(&self, lo: &T, hi: &T) -> Vec<&T> {
        TreapSet::range(self, lo, hi)
    }

    fn len(&self) -> usize {
        TreapSet::len(self)
    }
}

impl<T, R> IntoIterator for TreapSet<T, R> {
    type IntoIter = TreapSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree,
            stack: Vec::new(),
            remaining: self.len,
        }
    }
}

impl<'a, T, R> IntoIterator for &'a TreapSet<T, R>
where
    T: 'a,
{
    type IntoIter = TreapSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `TreapSet<T, R>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct TreapSetIntoIter<T> {
    current: tree::Tree<T>,
    stack: Vec<Node<T>>,
    remaining: usize,
}

impl<T> Iterator for TreapSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { key, right, .. } = node;
            self.current = right;
            self.remaining -= 1;
            key
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for TreapSetIntoIter<T> {}

/// An iterator for `TreapSet<T, R>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct TreapSetIter<'a, T>
where
    T: 'a,
{
    current: &'a tree::Tree<T>,
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for TreapSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            self.remaining -= 1;
            &node.key
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for TreapSetIter<'a, T> where T: 'a {}

impl<T> Default for TreapSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for TreapSet<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreapSet::new();
        set.extend(iter);
        set
    }
}

impl<T, R> Extend<T> for TreapSet<T, R>
where
    T: Ord,
    R: Rng,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T, R> fmt::Debug for TreapSet<T, R>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, R> PartialEq for TreapSet<T, R>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, R> Eq for TreapSet<T, R> where T: Eq {}

impl<T, R> Serialize for TreapSet<T, R>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T> Deserialize<'de> for TreapSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TreapSetVisitor<T> {
            marker: PhantomData<T>,
        }

        impl<'de, T> Visitor<'de> for TreapSetVisitor<T>
        where
            T: Deserialize<'de> + Ord,
        {
            type Value = TreapSet<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of keys")
            }

            fn visit_seq<A>(self, mut seq: A) -> result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut set = TreapSet::new();
                while let Some(key) = seq.next_element()? {
                    set.insert(key);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(TreapSetVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TreapSet;
    use crate::error::Error;
    use crate::treap::tree::Tree;
    use rand::{Rng, SeedableRng, XorShiftRng};
    use serde_test::{assert_tokens, Token};
    use std::collections::BTreeSet;

    fn shape(tree: &Tree<u32>, out: &mut Vec<(u32, u32)>) {
        if let Some(node) = tree {
            out.push((node.key, node.priority));
            shape(&node.left, out);
            shape(&node.right, out);
        }
    }

    fn is_heap_ordered(tree: &Tree<u32>) -> bool {
        match tree {
            None => true,
            Some(node) => {
                !node.is_heap_property_violated(&node.left)
                    && !node.is_heap_property_violated(&node.right)
                    && is_heap_ordered(&node.left)
                    && is_heap_ordered(&node.right)
            },
        }
    }

    fn scenario() -> TreapSet<u32> {
        let mut set = TreapSet::new();
        for key in &[5, 3, 8, 1, 4] {
            set.insert(*key);
        }
        set
    }

    #[test]
    fn test_len_empty() {
        let set: TreapSet<u32> = TreapSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_queries_on_empty_set() {
        let mut set: TreapSet<u32> = TreapSet::new();
        assert!(!set.contains(&1));
        assert_eq!(set.predecessor(&1), None);
        assert_eq!(set.successor(&1), None);
        assert_eq!(set.remove(&1), None);
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
        assert!(set.range(&0, &10).is_empty());
    }

    #[test]
    fn test_scenario() {
        let mut set = scenario();
        assert!(set.contains(&3));
        assert_eq!(set.predecessor(&4), Some(&3));
        assert_eq!(set.successor(&4), Some(&5));
        assert_eq!(set.range(&2, &6), vec![&3, &4, &5]);

        assert_eq!(set.remove(&5), Some(5));
        assert_eq!(set.successor(&4), Some(&8));
        assert!(!set.contains(&5));
        assert_eq!(set.len(), 4);
        assert!(is_heap_ordered(&set.tree));
    }

    #[test]
    fn test_queries_do_not_restructure() {
        let set = scenario();
        let mut before = Vec::new();
        shape(&set.tree, &mut before);

        set.contains(&4);
        set.predecessor(&8);
        set.successor(&0);
        set.range(&0, &10);

        let mut after = Vec::new();
        shape(&set.tree, &mut after);
        assert_eq!(before, after);
    }

    #[test]
    fn test_same_seed_same_shape() {
        let mut left = TreapSet::with_seed([3, 1, 4, 1]).unwrap();
        let mut right = TreapSet::with_seed([3, 1, 4, 1]).unwrap();
        for key in 0..200u32 {
            left.insert((key * 37) % 200);
            right.insert((key * 37) % 200);
        }
        for key in (0..200u32).filter(|key| key % 5 == 0) {
            left.remove(&key);
            right.remove(&key);
        }

        let mut left_shape = Vec::new();
        let mut right_shape = Vec::new();
        shape(&left.tree, &mut left_shape);
        shape(&right.tree, &mut right_shape);
        assert_eq!(left_shape, right_shape);
        assert!(is_heap_ordered(&left.tree));
    }

    #[test]
    fn test_duplicate_insert_draws_no_priority() {
        let mut with_duplicates = TreapSet::with_seed([1, 1, 1, 1]).unwrap();
        let mut without_duplicates = TreapSet::with_seed([1, 1, 1, 1]).unwrap();
        for key in 0..50u32 {
            with_duplicates.insert(key);
            with_duplicates.insert(key);
            without_duplicates.insert(key);
        }

        let mut left_shape = Vec::new();
        let mut right_shape = Vec::new();
        shape(&with_duplicates.tree, &mut left_shape);
        shape(&without_duplicates.tree, &mut right_shape);
        assert_eq!(left_shape, right_shape);
    }

    #[test]
    fn test_with_rng() {
        let rng: XorShiftRng = SeedableRng::from_seed([9, 8, 7, 6]);
        let mut set: TreapSet<u32, XorShiftRng> = TreapSet::with_rng(rng);
        set.extend(vec![3, 1, 2]);
        assert_eq!(set.iter().cloned().collect::<Vec<u32>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_seed() {
        assert_eq!(TreapSet::<u32>::with_seed([0, 0, 0, 0]).err(), Some(Error::ZeroSeed));
    }

    #[test]
    fn test_into_iter() {
        let set = scenario();
        let mut iter = set.into_iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.collect::<Vec<u32>>(), vec![3, 4, 5, 8]);
    }

    #[test]
    fn test_from_iter_and_eq() {
        let set: TreapSet<u32> = vec![8, 4, 1, 3, 5, 3].into_iter().collect();
        assert_eq!(set, scenario());
        assert_eq!(format!("{:?}", set), "{1, 3, 4, 5, 8}");
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut set = TreapSet::new();
        set.insert(String::from("b"));
        set.insert(String::from("d"));
        assert!(set.contains("b"));
        assert_eq!(set.predecessor("c").map(String::as_str), Some("b"));
        assert_eq!(set.remove("b"), Some(String::from("b")));
    }

    #[test]
    fn test_serde() {
        let set = scenario();
        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(5) },
                Token::U32(1),
                Token::U32(3),
                Token::U32(4),
                Token::U32(5),
                Token::U32(8),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_random_operations_keep_heap_order() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
        let mut set = TreapSet::with_seed([3, 5, 7, 9]).unwrap();
        let mut expected = BTreeSet::new();

        for i in 0..20_000 {
            let key = rng.gen_range(0, 1_000);
            if rng.gen_range(0, 2) == 0 {
                assert_eq!(set.insert(key), expected.insert(key));
            } else {
                assert_eq!(set.remove(&key), expected.take(&key));
            }
            if i % 100 == 0 {
                assert!(is_heap_ordered(&set.tree));
                assert_eq!(set.iter().collect::<Vec<&u32>>(), expected.iter().collect::<Vec<&u32>>());
            }
        }
        assert!(is_heap_ordered(&set.tree));
        assert_eq!(set.len(), expected.len());
    }
}
