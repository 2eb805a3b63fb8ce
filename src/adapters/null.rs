//! Null cache provider.
//!
//! Used when caching is disabled for a tenant but the application still
//! needs a provider to call.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::errors::{CacheResult, DriverError};
use crate::domain::models::{Capability, CapabilitySet, DriverConfig, OpContext};
use crate::domain::ports::{
    CacheProvider, Driver, HashStore, KeyValueStore, Scriptable, StreamStore,
};

/// Driver name the null provider registers under.
pub const NULL_DRIVER: &str = "null";

/// A provider that stores nothing. Writes succeed, lookups always miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProvider;

impl NullProvider {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyValueStore for NullProvider {
    async fn get(&self, _ctx: &OpContext, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _ctx: &OpContext, _key: &str, _value: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _ctx: &OpContext, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn set_expires(
        &self,
        _ctx: &OpContext,
        _key: &str,
        _value: &str,
        _ttl: Duration,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn batch_delete(&self, _ctx: &OpContext, _keys: &[&str]) -> CacheResult<usize> {
        Ok(0)
    }
}

#[async_trait]
impl HashStore for NullProvider {
    async fn hset(&self, _ctx: &OpContext, _key: &str, _field: &str, _value: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn hget(&self, _ctx: &OpContext, _key: &str, _field: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn hget_all(&self, _ctx: &OpContext, _key: &str) -> CacheResult<HashMap<String, String>> {
        Ok(HashMap::new())
    }

    async fn hdelete(&self, _ctx: &OpContext, _key: &str, _fields: &[&str]) -> CacheResult<usize> {
        Ok(0)
    }

    async fn hexists(&self, _ctx: &OpContext, _key: &str, _field: &str) -> CacheResult<bool> {
        Ok(false)
    }
}

impl StreamStore for NullProvider {}

impl Scriptable for NullProvider {}

#[async_trait]
impl CacheProvider for NullProvider {
    fn name(&self) -> &'static str {
        NULL_DRIVER
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::empty()
            .with(Capability::KeyValue)
            .with(Capability::BatchDelete)
            .with(Capability::Expiry)
            .with(Capability::Hash)
            .with(Capability::HashFields)
    }

    async fn close(&self) -> CacheResult<()> {
        Ok(())
    }
}

/// Factory for [`NullProvider`]. Takes no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDriver;

impl Driver for NullDriver {
    fn create(&self, _config: &DriverConfig) -> Result<Arc<dyn CacheProvider>, DriverError> {
        tracing::info!("loading null cache provider; caching is disabled");
        Ok(Arc::new(NullProvider::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_succeed_and_reads_miss() {
        let ctx = OpContext::background();
        let cache = NullProvider::new();

        cache.set(&ctx, "a", "1").await.unwrap();
        assert_eq!(cache.get(&ctx, "a").await.unwrap(), None);
        assert_eq!(cache.string(&ctx, "a").await.unwrap(), "");
        assert!(!cache.exists(&ctx, "a").await.unwrap());
        assert!(!cache.delete(&ctx, "a").await.unwrap());
        assert!(cache.hget_all(&ctx, "h").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_streams_are_unsupported() {
        let ctx = OpContext::background();
        let cache = NullProvider::new();
        assert!(!cache.supports(Capability::Stream));
        assert!(cache.xread(&ctx, &["s"], &Default::default()).await.unwrap_err().is_unsupported());
    }
}
