//! Services wiring drivers, configuration and providers together.

pub mod driver_registry;
pub mod engine;

pub use driver_registry::DriverRegistry;
pub use engine::{CacheEngine, DEFAULT_FETCH_TIMEOUT};
