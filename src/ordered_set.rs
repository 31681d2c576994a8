//! The capability surface shared by every set in this crate.

/// An ordered set of distinct, totally ordered keys.
///
/// Queries take `&mut self` because some implementations, like
/// [`SplaySet`](crate::splay_tree::SplaySet), restructure themselves on every access. Results
/// are always the same regardless of how the underlying tree is shaped.
///
/// # Examples
///
/// ```
/// use ordered_sets::{OrderedSet, SplaySet, TreapSet};
///
/// fn scenario<S: OrderedSet<i32>>(set: &mut S) {
///     for key in &[5, 3, 8, 1, 4] {
///         set.insert(*key);
///     }
///     assert!(set.contains(&3));
///     assert_eq!(set.predecessor(&4), Some(&3));
///     assert_eq!(set.successor(&4), Some(&5));
///     assert_eq!(set.range(&2, &6), vec![&3, &4, &5]);
///
///     assert_eq!(set.remove(&5), Some(5));
///     assert_eq!(set.successor(&4), Some(&8));
///     assert!(!set.contains(&5));
/// }
///
/// scenario(&mut SplaySet::new());
/// scenario(&mut TreapSet::new());
/// ```
pub trait OrderedSet<T: Ord> {
    /// Inserts a key. Returns `true` if the key was not already present.
    fn insert(&mut self, key: T) -> bool;

    /// Removes a key, returning it if it was present.
    fn remove(&mut self, key: &T) -> Option<T>;

    /// Returns `true` if the key is present.
    fn contains(&mut self, key: &T) -> bool;

    /// Returns the greatest key strictly less than `key`.
    fn predecessor(&mut self, key: &T) -> Option<&T>;

    /// Returns the least key strictly greater than `key`.
    fn successor(&mut self, key: &T) -> Option<&T>;

    /// Returns the keys in `[lo, hi]` in ascending order.
    fn range(&self, lo: &T, hi: &T) -> Vec<&T>;

    /// Returns the number of keys in the set.
    fn len(&self) -> usize;

    /// Returns `true` if the set holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
