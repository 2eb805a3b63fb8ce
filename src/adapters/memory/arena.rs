//! Arena-backed LRU store.
//!
//! Entries live in a `Vec` of slots addressed by index. The recency list is
//! threaded through the slots (`prev`/`next` handles), freed slots go on a
//! free list and are reused before the arena grows. `index` maps each key to
//! its slot. Every operation is O(1) expected.
//!
//! This type is not synchronized; [`MemoryProvider`](super::MemoryProvider)
//! wraps it in a single lock.

use std::collections::HashMap;

type Handle = usize;

#[derive(Debug)]
struct Node {
    key: String,
    value: String,
    prev: Option<Handle>,
    next: Option<Handle>,
}

#[derive(Debug)]
enum Slot {
    Occupied(Node),
    Free { next_free: Option<Handle> },
}

/// Bounded key/value store with least-recently-used eviction.
#[derive(Debug, Default)]
pub struct LruStore {
    capacity: usize,
    slots: Vec<Slot>,
    index: HashMap<String, Handle>,
    /// Most recently touched.
    head: Option<Handle>,
    /// Next eviction candidate.
    tail: Option<Handle>,
    free_head: Option<Handle>,
}

impl LruStore {
    /// Create a store holding at most `capacity` entries; 0 means unbounded.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of slots allocated, occupied or free.
    pub fn allocated_slots(&self) -> usize {
        self.slots.len()
    }

    /// Insert or update `key`, making it the most recent entry.
    ///
    /// Returns the key evicted to stay within capacity, if any.
    pub fn insert(&mut self, key: &str, value: &str) -> Option<String> {
        if let Some(&handle) = self.index.get(key) {
            self.node_mut(handle).value = value.to_string();
            self.move_to_front(handle);
            return None;
        }

        // Evicting before allocating lets the new entry take the freed slot,
        // so the arena never grows past capacity.
        let evicted = if self.capacity > 0 && self.index.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        let handle = self.allocate(Node {
            key: key.to_string(),
            value: value.to_string(),
            prev: None,
            next: None,
        });
        self.push_front(handle);
        self.index.insert(key.to_string(), handle);
        evicted
    }

    /// Look up `key`, promoting it to most recent on a hit.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        let handle = *self.index.get(key)?;
        self.move_to_front(handle);
        Some(self.node(handle).value.as_str())
    }

    /// Look up `key` without touching recency.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&handle| self.node(handle).value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let handle = self.index.remove(key)?;
        self.unlink(handle);
        Some(self.release(handle).value)
    }

    /// Remove the least recently used entry, returning its key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let handle = self.tail?;
        self.unlink(handle);
        let node = self.release(handle);
        self.index.remove(&node.key);
        Some(node.key)
    }

    /// Drop every entry and release the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
        self.free_head = None;
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.index.len());
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            keys.push(node.key.as_str());
            cursor = node.next;
        }
        keys
    }

    fn allocate(&mut self, node: Node) -> Handle {
        match self.free_head {
            Some(handle) => {
                if let Slot::Free { next_free } = &self.slots[handle] {
                    self.free_head = *next_free;
                }
                self.slots[handle] = Slot::Occupied(node);
                handle
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, handle: Handle) -> Node {
        let slot = std::mem::replace(
            &mut self.slots[handle],
            Slot::Free {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(handle);
        match slot {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => unreachable!("released a free slot"),
        }
    }

    fn node(&self, handle: Handle) -> &Node {
        match &self.slots[handle] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => unreachable!("dangling handle {handle}"),
        }
    }

    fn node_mut(&mut self, handle: Handle) -> &mut Node {
        match &mut self.slots[handle] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => unreachable!("dangling handle {handle}"),
        }
    }

    fn push_front(&mut self, handle: Handle) {
        let old_head = self.head;
        {
            let node = self.node_mut(handle);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = {
            let node = self.node(handle);
            (node.prev, node.next)
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
        let node = self.node_mut(handle);
        node.prev = None;
        node.next = None;
    }

    fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) {
            return;
        }
        self.unlink(handle);
        self.push_front(handle);
    }

    /// Walk the list and compare it with the index.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let keys = self.keys();
        assert_eq!(keys.len(), self.index.len(), "list and index disagree");
        for key in keys {
            assert!(self.index.contains_key(key), "orphaned list entry {key}");
        }
        if self.capacity > 0 {
            assert!(self.index.len() <= self.capacity, "over capacity");
        }
    }
}
