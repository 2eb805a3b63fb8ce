//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces adapters implement:
//! - CacheProvider and its capability traits: what application code calls
//! - Driver: named factory turning tenant configuration into a provider
//! - ConfigSource: where tenant configuration comes from
//!
//! These traits keep application code independent of any specific backend.

pub mod cache;
pub mod config_source;
pub mod driver;

pub use cache::{CacheProvider, HashStore, KeyValueStore, Scriptable, StreamStore};
pub use config_source::{ConfigPath, ConfigSource};
pub use driver::Driver;
