use super::arena::NodeId;
use super::Storage;
use crate::error::{Result, StorageError};
use std::mem;
use tracing::{debug, trace};

impl<T> Storage<T> {
    /// Links a new node after the tail. O(1).
    pub fn append(&mut self, element: T) {
        let id = self.arena.alloc(element);

        match self.tail {
            Some(old_tail) => self.arena.node_mut(old_tail).next = Some(id),
            None => self.head = Some(id),
        }

        self.tail = Some(id);
        self.count += 1;
    }

    /// Removes and returns the first element, `None` when empty.
    pub fn pop_first(&mut self) -> Option<T> {
        let old_head = self.head?;
        let node = self.arena.release(old_head);

        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.count -= 1;

        Some(node.element)
    }

    /// Like [`Storage::pop_first`], but an empty chain is a contract violation.
    pub fn remove_first(&mut self) -> Result<T> {
        self.pop_first().ok_or_else(|| {
            debug!("remove_first called on empty storage");
            StorageError::Underflow {
                requested: 1,
                available: 0,
            }
        })
    }

    /// Removes the first `k` elements. Fails on an empty chain (even for
    /// `k == 0`) and when `k > count`.
    pub fn remove_first_n(&mut self, k: usize) -> Result<()> {
        if self.count == 0 || k > self.count {
            debug!(requested = k, available = self.count, "remove_first_n underflow");
            return Err(StorageError::Underflow {
                requested: k,
                available: self.count,
            });
        }

        for _ in 0..k {
            drop(self.pop_first());
        }

        trace!(removed = k, remaining = self.count, "removed leading elements");
        Ok(())
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, element: T) -> Result<T> {
        let id = self.node_id_at(index)?;
        Ok(mem::replace(&mut self.arena.node_mut(id).element, element))
    }

    /// Inserts `element` so that it ends up at `index`. Valid for
    /// `index < count` only; inserting at `count` goes through `append`.
    ///
    /// The node already at `index` keeps its identity and takes the new
    /// element; its old element moves into a fresh node linked right after it.
    pub fn insert(&mut self, element: T, index: usize) -> Result<()> {
        let target = self.node_id_at(index)?;
        self.displace_after(target, element);
        self.count += 1;
        Ok(())
    }

    /// Inserts every element of `elements` starting at `index`, in order.
    ///
    /// Same index rule as [`Storage::insert`]. The index is checked first, then
    /// `elements` must yield at least one item.
    pub fn insert_contents_of<I>(&mut self, elements: I, index: usize) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let target = self.node_id_at(index)?;

        let mut elements = elements.into_iter();
        let Some(first) = elements.next() else {
            debug!(index, "insert_contents_of called with an empty sequence");
            return Err(StorageError::EmptyInput);
        };

        let (detached, added) = self.build_detached_chain(elements);
        let displaced = self.displace_after(target, first);

        if let Some((chain_head, chain_tail)) = detached {
            self.arena.node_mut(target).next = Some(chain_head);
            self.arena.node_mut(chain_tail).next = Some(displaced);
        }

        self.count += 1 + added;
        trace!(index, inserted = 1 + added, count = self.count, "spliced sequence");
        Ok(())
    }

    // Stores `replacement` in `target` and moves its old element into a new
    // node linked directly after it. Returns the new node. Count is left to
    // the caller.
    fn displace_after(&mut self, target: NodeId, replacement: T) -> NodeId {
        let node = self.arena.node_mut(target);
        let successor = node.next;
        let displaced_element = mem::replace(&mut node.element, replacement);

        let displaced = self.arena.alloc(displaced_element);
        self.arena.node_mut(displaced).next = successor;
        self.arena.node_mut(target).next = Some(displaced);

        if self.tail == Some(target) {
            self.tail = Some(displaced);
        }

        displaced
    }

    // Allocates a chain that nothing links to yet. Returns its (head, tail)
    // and length.
    fn build_detached_chain<I>(&mut self, elements: I) -> (Option<(NodeId, NodeId)>, usize)
    where
        I: Iterator<Item = T>,
    {
        // +1 for the displaced node allocated afterwards
        self.arena.reserve(elements.size_hint().0 + 1);

        let mut head = None;
        let mut tail: Option<NodeId> = None;
        let mut added = 0;

        for element in elements {
            let id = self.arena.alloc(element);
            match tail {
                Some(prev) => self.arena.node_mut(prev).next = Some(id),
                None => head = Some(id),
            }
            tail = Some(id);
            added += 1;
        }

        (head.zip(tail), added)
    }
}
