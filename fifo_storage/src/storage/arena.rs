// Node slots for a single Storage. Links are slot indices, never references,
// so the tail shortcut can be held without owning anything.
use std::mem;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) fn slot(self) -> usize {
        self.0
    }
}

pub(crate) struct Node<T> {
    pub(crate) element: T,
    pub(crate) next: Option<NodeId>,
}

enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<NodeId> },
}

pub(crate) struct NodeArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<NodeId>, // LIFO list threaded through vacant slots
    live: usize,
}

impl<T> NodeArena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            live: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            live: 0,
        }
    }

    pub(crate) fn alloc(&mut self, element: T) -> NodeId {
        let node = Node {
            element,
            next: None,
        };

        let id = match self.free_head {
            Some(id) => {
                let next_free = match &self.slots[id.0] {
                    Slot::Vacant { next_free } => *next_free,
                    Slot::Occupied(_) => panic!("Free list points at occupied slot {}", id.0),
                };
                self.slots[id.0] = Slot::Occupied(node);
                self.free_head = next_free;
                id
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        };

        self.live += 1;
        id
    }

    pub(crate) fn release(&mut self, id: NodeId) -> Node<T> {
        if let Slot::Vacant { .. } = self.slots[id.0] {
            panic!("Releasing vacant slot {}", id.0);
        }

        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        self.free_head = Some(id);
        self.live -= 1;

        match mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("Link to vacant slot {}", id.0),
        }
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("Link to vacant slot {}", id.0),
        }
    }

    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    // Vacant slots are reused before the vector grows.
    pub(crate) fn reserve(&mut self, additional: usize) {
        let needed = (self.live + additional).saturating_sub(self.slots.len());
        self.slots.reserve(needed);
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.live = 0;
    }

    pub(crate) fn free_slots(&self) -> usize {
        let mut free = 0;
        let mut cursor = self.free_head;
        while let Some(id) = cursor {
            cursor = match &self.slots[id.0] {
                Slot::Vacant { next_free } => *next_free,
                Slot::Occupied(_) => panic!("Free list points at occupied slot {}", id.0),
            };
            free += 1;
        }
        free
    }
}
