//! Cachemux - pluggable per-tenant cache engine
//!
//! Application code reads and writes cached data through one contract
//! ([`CacheProvider`]) while the backend is chosen per tenant from
//! configuration at start-up.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): provider contract, models and errors
//! - **Adapters** (`adapters`): the in-process LRU backend, the null backend
//!   and configuration sources
//! - **Service Layer** (`services`): driver registry and engine bootstrap
//! - **Infrastructure Layer** (`infrastructure`): app configuration, logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use cachemux::adapters::config_source::StaticConfigSource;
//! use cachemux::{CacheEngine, DriverRegistry, KeyValueStore, OpContext};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = DriverRegistry::with_builtin_drivers();
//! let source = StaticConfigSource::new()
//!     .with_tenant("10000", r#"{"provider":"mem","mem":"1000"}"#);
//!
//! let cache = CacheEngine::new(&registry, &source).bootstrap("10000").await?;
//! let ctx = OpContext::background();
//! cache.set(&ctx, "greeting", "hello").await?;
//! assert_eq!(cache.string(&ctx, "greeting").await?, "hello");
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::memory::{LruStore, MemoryDriver, MemoryProvider};
pub use adapters::null::{NullDriver, NullProvider};
pub use domain::errors::{
    BootstrapError, CacheError, CacheResult, ConfigSourceError, DriverError, RegistryError,
};
pub use domain::models::{
    CacheStats, Capability, CapabilitySet, Config, DriverConfig, OpContext, RawCommand, Reply,
};
pub use domain::ports::{
    CacheProvider, ConfigPath, ConfigSource, Driver, HashStore, KeyValueStore, Scriptable,
    StreamStore,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CacheEngine, DriverRegistry};
