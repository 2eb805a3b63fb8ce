//! Domain layer for the cache engine
//!
//! This module contains the provider contract, the models it exchanges and
//! the error types shared by every backend.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{
    BootstrapError, CacheError, CacheResult, ConfigSourceError, DriverError, RegistryError,
};
