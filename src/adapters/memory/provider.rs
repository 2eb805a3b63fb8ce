//! In-process LRU cache provider.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::models::{CacheStats, Capability, CapabilitySet, OpContext};
use crate::domain::ports::{CacheProvider, HashStore, KeyValueStore, Scriptable, StreamStore};

use super::arena::LruStore;

/// Driver name the memory provider registers under.
pub const MEMORY_DRIVER: &str = "mem";

/// Bounded, concurrency-safe LRU cache living in process memory.
///
/// Every operation, lookups included, runs under one exclusive lock: a
/// lookup promotes the entry, so there is no read-only path. Hit and access
/// counters are atomics and can be read without the lock.
///
/// Limitations:
/// - no expiry: `set_expires` stores like `set` and ignores the ttl;
/// - hash fields are stored as ordinary entries under `key ∥ field`, so
///   `hget_all`, `hdelete` and `hexists` are unsupported;
/// - no streams, scripting, raw commands or batch delete.
///
/// The [`OpContext`] is ignored: nothing here blocks.
#[derive(Debug)]
pub struct MemoryProvider {
    store: Mutex<LruStore>,
    hits: AtomicU64,
    accesses: AtomicU64,
    closed: AtomicBool,
}

impl MemoryProvider {
    /// Create a provider retaining at most `capacity` entries; 0 means
    /// unbounded.
    pub fn new(capacity: usize) -> Self {
        Self {
            store: Mutex::new(LruStore::new(capacity)),
            hits: AtomicU64::new(0),
            accesses: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn accesses(&self) -> u64 {
        self.accesses.load(Ordering::Relaxed)
    }

    /// Keys from most to least recently used. Does not promote.
    pub fn keys(&self) -> Vec<String> {
        self.store
            .lock()
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn ensure_open(&self) -> CacheResult<()> {
        if self.is_closed() {
            Err(CacheError::Closed)
        } else {
            Ok(())
        }
    }

    fn lookup(&self, key: &str) -> CacheResult<Option<String>> {
        let mut store = self.store.lock();
        // Checked under the lock so a concurrent close cannot slip in between.
        self.ensure_open()?;
        self.accesses.fetch_add(1, Ordering::Relaxed);
        let value = store.get(key).map(str::to_string);
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        Ok(value)
    }

    fn store_value(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut store = self.store.lock();
        self.ensure_open()?;
        if let Some(evicted) = store.insert(key, value) {
            tracing::trace!(key = %evicted, "evicted least recently used entry");
        }
        Ok(())
    }

    fn remove_value(&self, key: &str) -> CacheResult<bool> {
        let mut store = self.store.lock();
        self.ensure_open()?;
        Ok(store.remove(key).is_some())
    }

    fn shutdown(&self) -> CacheResult<()> {
        let mut store = self.store.lock();
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(CacheError::Closed);
        }
        let dropped = store.len();
        store.clear();
        tracing::debug!(dropped, "memory cache closed");
        Ok(())
    }

    fn field_key(key: &str, field: &str) -> String {
        let mut composed = String::with_capacity(key.len() + field.len());
        composed.push_str(key);
        composed.push_str(field);
        composed
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new(0)
    }
}

#[async_trait]
impl KeyValueStore for MemoryProvider {
    async fn get(&self, _ctx: &OpContext, key: &str) -> CacheResult<Option<String>> {
        self.lookup(key)
    }

    async fn set(&self, _ctx: &OpContext, key: &str, value: &str) -> CacheResult<()> {
        self.store_value(key, value)
    }

    async fn delete(&self, _ctx: &OpContext, key: &str) -> CacheResult<bool> {
        self.remove_value(key)
    }

    async fn set_expires(
        &self,
        _ctx: &OpContext,
        key: &str,
        value: &str,
        _ttl: Duration,
    ) -> CacheResult<()> {
        self.store_value(key, value)
    }
}

#[async_trait]
impl HashStore for MemoryProvider {
    async fn hset(&self, _ctx: &OpContext, key: &str, field: &str, value: &str) -> CacheResult<()> {
        self.store_value(&Self::field_key(key, field), value)
    }

    async fn hget(&self, _ctx: &OpContext, key: &str, field: &str) -> CacheResult<Option<String>> {
        self.lookup(&Self::field_key(key, field))
    }
}

impl StreamStore for MemoryProvider {}

impl Scriptable for MemoryProvider {}

#[async_trait]
impl CacheProvider for MemoryProvider {
    fn name(&self) -> &'static str {
        MEMORY_DRIVER
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::empty()
            .with(Capability::KeyValue)
            .with(Capability::Hash)
    }

    fn stats(&self) -> Option<CacheStats> {
        let store = self.store.lock();
        Some(CacheStats {
            len: store.len(),
            capacity: store.capacity(),
            hits: self.hits(),
            accesses: self.accesses(),
        })
    }

    async fn close(&self) -> CacheResult<()> {
        self.shutdown()
    }
}
