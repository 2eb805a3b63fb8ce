//! Driver port - named factories building providers from configuration.

use std::sync::Arc;

use crate::domain::errors::DriverError;
use crate::domain::models::DriverConfig;

use super::CacheProvider;

/// Factory for one kind of cache provider.
///
/// Drivers are registered once, by name, in a
/// [`DriverRegistry`](crate::services::DriverRegistry) before any tenant is
/// bootstrapped.
pub trait Driver: Send + Sync {
    /// Build a provider bound to `config`.
    fn create(&self, config: &DriverConfig) -> Result<Arc<dyn CacheProvider>, DriverError>;
}

impl<F> Driver for F
where
    F: Fn(&DriverConfig) -> Result<Arc<dyn CacheProvider>, DriverError> + Send + Sync,
{
    fn create(&self, config: &DriverConfig) -> Result<Arc<dyn CacheProvider>, DriverError> {
        self(config)
    }
}
