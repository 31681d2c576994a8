//! Slot allocator used to store the nodes of a splay tree.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A copyable reference to an object stored in a `NodeArena<T>`.
///
/// A handle does not own the object it refers to, so it can be freely duplicated into parent and
/// child links without creating ownership cycles.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Handle {
    index: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator that stores objects of a single type in a `Vec` and hands out `Handle`s to them.
///
/// Freed slots are threaded onto a free list and reused by later allocations, so a long sequence
/// of inserts and removals does not grow the backing storage beyond the peak number of live
/// objects. All objects are dropped when the arena is dropped or cleared.
///
/// # Examples
///
/// ```
/// use ordered_sets::arena::NodeArena;
///
/// let mut arena = NodeArena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct NodeArena<T> {
    head: Option<Handle>,
    slots: Vec<Slot<T>>,
    len: usize,
}

impl<T> NodeArena<T> {
    /// Constructs a new, empty `NodeArena<T>`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty `NodeArena<T>` with room for `capacity` objects before the backing
    /// storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::arena::NodeArena;
    ///
    /// let arena: NodeArena<u32> = NodeArena::with_capacity(1024);
    /// assert!(arena.capacity() >= 1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            head: None,
            slots: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Stores an object in the arena and returns a handle to it. Vacant slots are reused before
    /// the backing storage grows.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Handle {
                    index: self.slots.len() - 1,
                }
            },
            Some(handle) => {
                let vacant_slot = mem::replace(&mut self.slots[handle.index], Slot::Occupied(value));
                match vacant_slot {
                    Slot::Vacant(next) => self.head = next,
                    Slot::Occupied(_) => panic!("Expected a vacant slot on the free list."),
                }
                handle
            },
        }
    }

    /// Removes an object from the arena and returns it. The handle must not be used afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the handle refers to a slot that is vacant or out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_sets::arena::NodeArena;
    ///
    /// let mut arena = NodeArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        match self.slots.get(handle.index) {
            None => panic!("Error: attempting to free an out of bounds slot."),
            Some(Slot::Vacant(_)) => panic!("Error: attempting to free a vacant slot."),
            Some(Slot::Occupied(_)) => {},
        }
        let old_slot = mem::replace(&mut self.slots[handle.index], Slot::Vacant(self.head));
        match old_slot {
            Slot::Vacant(_) => unreachable!(),
            Slot::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle);
                value
            },
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the handle
    /// refers to a vacant or out of bounds slot.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the handle refers
    /// to a vacant or out of bounds slot.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots the arena can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Drops every object in the arena, invalidating all handles.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for NodeArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Expected handle to refer to an occupied slot.")
    }
}

impl<T> IndexMut<Handle> for NodeArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Expected handle to refer to an occupied slot.")
    }
}
