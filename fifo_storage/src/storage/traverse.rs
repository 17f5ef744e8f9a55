use super::arena::{NodeArena, NodeId};
use super::Storage;
use crate::error::{Result, StorageError};
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};
use tracing::debug;

impl<T> Storage<T> {
    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.count {
            return Ok(());
        }
        debug!(index, count = self.count, "index out of range");
        Err(StorageError::IndexOutOfRange {
            index,
            count: self.count,
        })
    }

    // Caller guarantees index < count.
    fn node_id_at_unchecked(&self, index: usize) -> NodeId {
        let mut current = match self.head {
            Some(id) => id,
            None => panic!("Traversal of empty chain"),
        };
        for step in 0..index {
            current = match self.arena.node(current).next {
                Some(id) => id,
                None => panic!("Chain ends after {} of {} nodes", step + 1, self.count),
            };
        }
        current
    }

    pub(super) fn node_id_at(&self, index: usize) -> Result<NodeId> {
        self.check_index(index)?;
        Ok(self.node_id_at_unchecked(index))
    }

    /// Element at `index`, walking from the head. O(index).
    pub fn get(&self, index: usize) -> Result<&T> {
        let id = self.node_id_at(index)?;
        Ok(&self.arena.node(id).element)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let id = self.node_id_at(index)?;
        Ok(&mut self.arena.node_mut(id).element)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            next: self.head,
            remaining: self.count,
        }
    }

    /// Walks the chain and panics if head, tail, count or the arena disagree.
    pub fn verify_chain(&self) {
        assert_eq!(
            self.count == 0,
            self.head.is_none(),
            "count is {} but head is {:?}",
            self.count,
            self.head
        );
        assert_eq!(
            self.head.is_none(),
            self.tail.is_none(),
            "head is {:?} but tail is {:?}",
            self.head,
            self.tail
        );

        let mut visited = vec![false; self.arena.slot_count()];
        let mut reached = 0;
        let mut last = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            assert!(!visited[id.slot()], "cycle through slot {}", id.slot());
            visited[id.slot()] = true;
            reached += 1;
            assert!(reached <= self.count, "chain longer than count {}", self.count);
            last = Some(id);
            cursor = self.arena.node(id).next;
        }

        assert_eq!(reached, self.count, "chain length differs from count");
        assert_eq!(last, self.tail, "tail is not the last reachable node");
        assert_eq!(self.arena.live(), self.count, "unreachable live nodes in arena");
        assert_eq!(
            self.arena.free_slots() + self.arena.live(),
            self.arena.slot_count(),
            "free list does not cover every vacant slot"
        );
    }
}

impl<T> Index<usize> for Storage<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(element) => element,
            Err(_) => panic!("Index out of range"),
        }
    }
}

impl<T> IndexMut<usize> for Storage<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(element) => element,
            Err(_) => panic!("Index out of range"),
        }
    }
}

/// Front-to-back borrowed traversal.
pub struct Iter<'a, T> {
    arena: &'a NodeArena<T>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.next?;
        let node = self.arena.node(id);
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> IntoIterator for &'a Storage<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Owning traversal; each step is a `pop_first`.
pub struct IntoIter<T> {
    storage: Storage<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.storage.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.storage.count, Some(self.storage.count))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Storage<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { storage: self }
    }
}
