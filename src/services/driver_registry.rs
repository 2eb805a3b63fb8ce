//! Driver registry.
//!
//! The [`DriverRegistry`] maps driver names to factories. It is an ordinary
//! value built at process start and handed to the
//! [`CacheEngine`](super::CacheEngine) by reference; there is no global.
//! Registration is write-once per name. All registrations are expected to
//! happen before the first lookup, so the shared-read / exclusive-write lock
//! is uncontended in steady state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::adapters::memory::{MemoryDriver, MEMORY_DRIVER};
use crate::adapters::null::{NullDriver, NULL_DRIVER};
use crate::domain::errors::RegistryError;
use crate::domain::ports::Driver;

/// Table of named cache drivers.
#[derive(Default)]
pub struct DriverRegistry {
    drivers: RwLock<HashMap<String, Arc<dyn Driver>>>,
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.names())
            .finish()
    }
}

impl DriverRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the drivers shipped in this crate: `mem` and `null`.
    pub fn with_builtin_drivers() -> Self {
        let registry = Self::new();
        registry
            .register(MEMORY_DRIVER, MemoryDriver::new())
            .and_then(|()| registry.register(NULL_DRIVER, NullDriver))
            .unwrap_or_else(|err| unreachable!("builtin driver names are unique: {err}"));
        registry
    }

    /// Record `driver` under `name`.
    ///
    /// Fails if `name` is empty or already taken. A registration is never
    /// replaced; callers should treat an error here as a deployment defect
    /// and abort start-up.
    pub fn register<D>(&self, name: &str, driver: D) -> Result<(), RegistryError>
    where
        D: Driver + 'static,
    {
        self.register_arc(name, Arc::new(driver))
    }

    /// Like [`DriverRegistry::register`], for an already shared driver.
    pub fn register_arc(&self, name: &str, driver: Arc<dyn Driver>) -> Result<(), RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let mut drivers = self.drivers.write();
        if drivers.contains_key(name) {
            tracing::error!(driver = name, "cache driver registered twice");
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        drivers.insert(name.to_string(), driver);
        tracing::debug!(driver = name, "registered cache driver");
        Ok(())
    }

    /// Look up the driver registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Driver>> {
        self.drivers.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.drivers.read().contains_key(name)
    }

    /// Registered driver names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.drivers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.drivers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.read().is_empty()
    }
}
