//! In-process LRU cache backend.
//!
//! [`LruStore`] holds entries in an arena threaded by a recency list;
//! [`MemoryProvider`] puts it behind one lock and implements the provider
//! contract; [`MemoryDriver`] builds providers from tenant configuration.

pub mod arena;
pub mod driver;
pub mod provider;

pub use arena::LruStore;
pub use driver::{MemoryDriver, CAPACITY_PARAM};
pub use provider::{MemoryProvider, MEMORY_DRIVER};
