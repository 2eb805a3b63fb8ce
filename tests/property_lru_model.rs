//! Model-based property tests: the arena LRU against a naive vector LRU.

use cachemux::LruStore;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u8),
    Get(u8),
    Remove(u8),
}

fn op() -> impl Strategy<Value = Op> {
    // A small key space forces updates, hits and evictions.
    prop_oneof![
        3 => (0u8..12, any::<u8>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (0u8..12).prop_map(Op::Get),
        1 => (0u8..12).prop_map(Op::Remove),
    ]
}

/// Most recent entry first.
struct NaiveLru {
    capacity: usize,
    entries: Vec<(String, String)>,
}

impl NaiveLru {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn insert(&mut self, key: &str, value: &str) -> Option<String> {
        if let Some(pos) = self.position(key) {
            self.entries.remove(pos);
            self.entries.insert(0, (key.to_string(), value.to_string()));
            return None;
        }
        let evicted = if self.capacity > 0 && self.entries.len() >= self.capacity {
            self.entries.pop().map(|(k, _)| k)
        } else {
            None
        };
        self.entries.insert(0, (key.to_string(), value.to_string()));
        evicted
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos);
        let value = entry.1.clone();
        self.entries.insert(0, entry);
        Some(value)
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.position(key)?;
        Some(self.entries.remove(pos).1)
    }

    fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }
}

proptest! {
    /// Property: every operation agrees with the naive model
    ///
    /// Return values, recency order and size match after each step, for
    /// bounded and unbounded capacities.
    #[test]
    fn prop_matches_naive_model(
        capacity in 0usize..6,
        ops in prop::collection::vec(op(), 1..200)
    ) {
        let mut store = LruStore::new(capacity);
        let mut model = NaiveLru::new(capacity);

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let (key, value) = (format!("k{k}"), v.to_string());
                    prop_assert_eq!(store.insert(&key, &value), model.insert(&key, &value));
                }
                Op::Get(k) => {
                    let key = format!("k{k}");
                    prop_assert_eq!(store.get(&key).map(str::to_string), model.get(&key));
                }
                Op::Remove(k) => {
                    let key = format!("k{k}");
                    prop_assert_eq!(store.remove(&key), model.remove(&key));
                }
            }
            prop_assert_eq!(store.keys(), model.keys());
            prop_assert_eq!(store.len(), model.entries.len());
        }
    }

    /// Property: the arena never holds more slots than the peak entry count
    ///
    /// Freed slots are reused, so a bounded store never allocates more than
    /// `capacity` slots.
    #[test]
    fn prop_bounded_arena_does_not_grow(
        capacity in 1usize..8,
        ops in prop::collection::vec(op(), 1..300)
    ) {
        let mut store = LruStore::new(capacity);
        for op in ops {
            match op {
                Op::Insert(k, v) => { store.insert(&format!("k{k}"), &v.to_string()); }
                Op::Get(k) => { store.get(&format!("k{k}")); }
                Op::Remove(k) => { store.remove(&format!("k{k}")); }
            }
            prop_assert!(store.len() <= capacity);
            prop_assert!(store.allocated_slots() <= capacity);
        }
    }
}
