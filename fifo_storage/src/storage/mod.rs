mod arena;
mod chain;
mod traverse;

pub use traverse::{IntoIter, Iter};

use arena::{NodeArena, NodeId};
use std::fmt;
use tracing::trace;

/// Singly-linked backing storage for a FIFO queue value.
///
/// `head` owns the chain through the arena, `tail` is a shortcut to the last
/// node used by [`Storage::append`]. Nodes are never shared between two
/// storages: [`Storage::copy`] always rebuilds an independent chain.
///
/// Storage does not track whether it is shared. A copy-on-write owner must
/// call [`Storage::copy`] (or `Clone`) before mutating a handle that another
/// value may still be reading.
pub struct Storage<T> {
    arena: NodeArena<T>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    count: usize,
}

impl<T> Storage<T> {
    pub const fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            head: None,
            tail: None,
            count: 0,
        }
    }

    /// Empty storage with room for `capacity` nodes before the arena grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            head: None,
            tail: None,
            count: 0,
        }
    }

    /// Builds storage by appending every element in iteration order.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let elements = elements.into_iter();
        let mut storage = Self::with_capacity(elements.size_hint().0);
        for element in elements {
            storage.append(element);
        }
        storage
    }

    /// `count` copies of `value`. The last slot takes `value` itself.
    pub fn repeating(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        let mut storage = Self::with_capacity(count);
        if count == 0 {
            return storage;
        }
        for _ in 1..count {
            storage.append(value.clone());
        }
        storage.append(value);
        storage
    }

    /// Deep copy of `other`, node by node, in the same order.
    pub fn copying(other: &Storage<T>) -> Self
    where
        T: Clone,
    {
        let mut storage = Self::with_capacity(other.count);
        for element in other.iter() {
            storage.append(element.clone());
        }
        trace!(count = storage.count, "copied storage chain");
        storage
    }

    #[inline]
    pub fn copy(&self) -> Self
    where
        T: Clone,
    {
        Self::copying(self)
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.head.map(|id| &self.arena.node(id).element)
    }

    #[inline]
    pub fn first_mut(&mut self) -> Option<&mut T> {
        let id = self.head?;
        Some(&mut self.arena.node_mut(id).element)
    }

    /// Peeks the tail element through the tail shortcut.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.tail.map(|id| &self.arena.node(id).element)
    }

    /// Node slots available before the arena reallocates.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional);
    }

    /// Releases the whole chain.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
        self.count = 0;
    }
}

impl<T> Default for Storage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Storage<T> {
    fn clone(&self) -> Self {
        Self::copying(self)
    }
}

impl<T> FromIterator<T> for Storage<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T> From<Vec<T>> for Storage<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_elements(elements)
    }
}

impl<T> Extend<T> for Storage<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for element in iter {
            self.append(element);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Storage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
