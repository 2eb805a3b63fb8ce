//! Cache engine bootstrap.
//!
//! Resolves a tenant's configured driver and builds its provider:
//!
//! 1. fetch `/system/base/cache/<tenant>` from the [`ConfigSource`];
//! 2. parse it as a [`DriverConfig`] (`{"provider": "...", ...}`);
//! 3. look the provider name up in the [`DriverRegistry`];
//! 4. hand the remaining parameters to the driver.
//!
//! Every failure is a [`BootstrapError`] and no provider is built. These are
//! deployment errors: the binary aborts on them rather than serving with a
//! broken cache.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::{BootstrapError, ConfigSourceError};
use crate::domain::models::DriverConfig;
use crate::domain::ports::{CacheProvider, ConfigPath, ConfigSource};

use super::DriverRegistry;

/// Default upper bound on the configuration fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds cache providers for tenants.
pub struct CacheEngine<'a> {
    registry: &'a DriverRegistry,
    source: &'a dyn ConfigSource,
    fetch_timeout: Duration,
}

impl<'a> CacheEngine<'a> {
    pub fn new(registry: &'a DriverRegistry, source: &'a dyn ConfigSource) -> Self {
        Self {
            registry,
            source,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Fetch and parse the cache configuration of `tenant`, checking that it
    /// names a registered driver. Builds nothing.
    pub async fn resolve_config(&self, tenant: &str) -> Result<DriverConfig, BootstrapError> {
        let path = ConfigPath::tenant_cache(tenant);
        let raw = tokio::time::timeout(self.fetch_timeout, self.source.fetch(&path))
            .await
            .unwrap_or(Err(ConfigSourceError::Timeout(self.fetch_timeout)))
            .map_err(|source| BootstrapError::ConfigFetch {
                tenant: tenant.to_string(),
                source,
            })?;

        let config = DriverConfig::from_json(&raw)?;
        if !self.registry.contains(config.provider()) {
            return Err(BootstrapError::UnknownDriver(config.provider().to_string()));
        }
        Ok(config)
    }

    /// Build the provider configured for `tenant`.
    #[tracing::instrument(skip(self), fields(driver))]
    pub async fn bootstrap(&self, tenant: &str) -> Result<Arc<dyn CacheProvider>, BootstrapError> {
        tracing::info!("loading cache engine");

        let result = self.build(tenant).await;
        match &result {
            Ok(provider) => tracing::info!(
                capabilities = %provider.capabilities(),
                "cache provider ready"
            ),
            Err(err) => tracing::error!(error = %err, "cache engine bootstrap failed"),
        }
        result
    }

    async fn build(&self, tenant: &str) -> Result<Arc<dyn CacheProvider>, BootstrapError> {
        let config = self.resolve_config(tenant).await?;
        tracing::Span::current().record("driver", config.provider());

        let driver = self
            .registry
            .lookup(config.provider())
            .ok_or_else(|| BootstrapError::UnknownDriver(config.provider().to_string()))?;

        driver
            .create(&config)
            .map_err(|source| BootstrapError::Driver {
                driver: config.provider().to_string(),
                source,
            })
    }
}
