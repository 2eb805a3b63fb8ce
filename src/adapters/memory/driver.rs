//! Driver building [`MemoryProvider`] instances from tenant configuration.

use std::sync::Arc;

use crate::domain::errors::DriverError;
use crate::domain::models::DriverConfig;
use crate::domain::ports::{CacheProvider, Driver};

use super::provider::{MemoryProvider, MEMORY_DRIVER};

/// Parameter holding the maximum entry count. Shares its name with the driver.
pub const CAPACITY_PARAM: &str = MEMORY_DRIVER;

/// Factory for the in-process LRU provider.
///
/// Reads the entry limit from the `mem` parameter; absent, empty or `0`
/// means unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryDriver;

impl MemoryDriver {
    pub const fn new() -> Self {
        Self
    }

    /// Resolve the entry limit from a tenant configuration.
    pub fn capacity(config: &DriverConfig) -> Result<usize, DriverError> {
        match config.get(CAPACITY_PARAM).map(str::trim) {
            None | Some("") => Ok(0),
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                DriverError::InvalidParameter {
                    parameter: CAPACITY_PARAM.to_string(),
                    value: raw.to_string(),
                    reason: e.to_string(),
                }
            }),
        }
    }
}

impl Driver for MemoryDriver {
    fn create(&self, config: &DriverConfig) -> Result<Arc<dyn CacheProvider>, DriverError> {
        let capacity = Self::capacity(config)?;
        tracing::info!(capacity, unbounded = capacity == 0, "loading memory cache provider");
        Ok(Arc::new(MemoryProvider::new(capacity)))
    }
}
