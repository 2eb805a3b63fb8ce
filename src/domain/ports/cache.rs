//! Cache provider port - the contract application code programs against.
//!
//! The contract is split by capability. A backend implements the traits for
//! every group, but only overrides the methods it actually supports; the
//! default bodies report [`CacheError::Unsupported`] naming the missing
//! capability. Callers can ask [`CacheProvider::capabilities`] up front
//! instead of probing.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::models::{
    CacheStats, Capability, CapabilitySet, OpContext, RawCommand, ReadOptions, Reply, StreamBatch,
};

/// Scalar key/value operations.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Look up `key`. `Ok(None)` on a miss.
    async fn get(&self, ctx: &OpContext, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` under `key` with the backend's default retention.
    async fn set(&self, ctx: &OpContext, key: &str, value: &str) -> CacheResult<()>;

    /// Remove `key`. Returns whether an entry was removed; removing an absent
    /// key is not an error.
    async fn delete(&self, ctx: &OpContext, key: &str) -> CacheResult<bool>;

    /// Look up `key`, returning the empty string on a miss.
    ///
    /// A stored empty value and a miss look the same here; use
    /// [`KeyValueStore::get`] when the difference matters.
    async fn string(&self, ctx: &OpContext, key: &str) -> CacheResult<String> {
        Ok(self.get(ctx, key).await?.unwrap_or_default())
    }

    /// Whether `key` is present.
    async fn exists(&self, ctx: &OpContext, key: &str) -> CacheResult<bool> {
        Ok(self.get(ctx, key).await?.is_some())
    }

    /// Store `value` under `key` for `ttl`. A zero `ttl` means the backend's
    /// default retention.
    async fn set_expires(
        &self,
        ctx: &OpContext,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> CacheResult<()> {
        let _ = (ctx, key, value, ttl);
        Err(CacheError::unsupported(Capability::Expiry, "set_expires"))
    }

    /// Remove several keys. Keys are processed independently; on error some
    /// keys may already be gone. Returns the number removed.
    async fn batch_delete(&self, ctx: &OpContext, keys: &[&str]) -> CacheResult<usize> {
        let _ = (ctx, keys);
        Err(CacheError::unsupported(Capability::BatchDelete, "batch_delete"))
    }
}

/// Field-scoped values stored under one key.
#[async_trait]
pub trait HashStore: Send + Sync {
    async fn hset(&self, ctx: &OpContext, key: &str, field: &str, value: &str) -> CacheResult<()> {
        let _ = (ctx, key, field, value);
        Err(CacheError::unsupported(Capability::Hash, "hset"))
    }

    /// `Ok(None)` when the key or field is absent.
    async fn hget(&self, ctx: &OpContext, key: &str, field: &str) -> CacheResult<Option<String>> {
        let _ = (ctx, key, field);
        Err(CacheError::unsupported(Capability::Hash, "hget"))
    }

    /// All fields of `key`; empty when the key is absent.
    async fn hget_all(&self, ctx: &OpContext, key: &str) -> CacheResult<HashMap<String, String>> {
        let _ = (ctx, key);
        Err(CacheError::unsupported(Capability::HashFields, "hget_all"))
    }

    /// Remove fields of `key`; returns the number removed.
    async fn hdelete(&self, ctx: &OpContext, key: &str, fields: &[&str]) -> CacheResult<usize> {
        let _ = (ctx, key, fields);
        Err(CacheError::unsupported(Capability::HashFields, "hdelete"))
    }

    async fn hexists(&self, ctx: &OpContext, key: &str, field: &str) -> CacheResult<bool> {
        let _ = (ctx, key, field);
        Err(CacheError::unsupported(Capability::HashFields, "hexists"))
    }
}

/// Append-only streams with consumer-group acknowledgment.
#[async_trait]
pub trait StreamStore: Send + Sync {
    /// Append an entry; `id` of `"*"` lets the backend assign one. Returns the
    /// entry id.
    async fn xadd(
        &self,
        ctx: &OpContext,
        key: &str,
        id: &str,
        fields: &[(&str, &str)],
    ) -> CacheResult<String> {
        let _ = (ctx, key, id, fields);
        Err(CacheError::unsupported(Capability::Stream, "xadd"))
    }

    /// Create consumer `group` on `key` starting at entry `start`.
    async fn xgroup(&self, ctx: &OpContext, key: &str, group: &str, start: &str) -> CacheResult<()> {
        let _ = (ctx, key, group, start);
        Err(CacheError::unsupported(Capability::Stream, "xgroup"))
    }

    async fn xread_group(
        &self,
        ctx: &OpContext,
        group: &str,
        consumer: &str,
        keys: &[&str],
        options: &ReadOptions,
    ) -> CacheResult<Vec<StreamBatch>> {
        let _ = (ctx, group, consumer, keys, options);
        Err(CacheError::unsupported(Capability::Stream, "xread_group"))
    }

    async fn xread(
        &self,
        ctx: &OpContext,
        keys: &[&str],
        options: &ReadOptions,
    ) -> CacheResult<Vec<StreamBatch>> {
        let _ = (ctx, keys, options);
        Err(CacheError::unsupported(Capability::Stream, "xread"))
    }

    /// Acknowledge entries for `group`; returns the number acknowledged.
    async fn xack(&self, ctx: &OpContext, key: &str, group: &str, ids: &[&str]) -> CacheResult<usize> {
        let _ = (ctx, key, group, ids);
        Err(CacheError::unsupported(Capability::Stream, "xack"))
    }
}

/// Backend-native scripting.
#[async_trait]
pub trait Scriptable: Send + Sync {
    async fn eval(
        &self,
        ctx: &OpContext,
        script: &str,
        keys: &[&str],
        args: &[&str],
    ) -> CacheResult<Reply> {
        let _ = (ctx, script, keys, args);
        Err(CacheError::unsupported(Capability::Scripting, "eval"))
    }
}

/// A bound, stateful cache backend instance.
#[async_trait]
pub trait CacheProvider: KeyValueStore + HashStore + StreamStore + Scriptable {
    /// Name of the driver that built this provider.
    fn name(&self) -> &'static str;

    /// Operation groups this provider actually implements.
    fn capabilities(&self) -> CapabilitySet;

    /// Usage counters, when the backend tracks them.
    fn stats(&self) -> Option<CacheStats> {
        None
    }

    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(capability)
    }

    /// Pass a backend-specific command through untyped.
    async fn operate(&self, ctx: &OpContext, command: &RawCommand) -> CacheResult<Reply> {
        let _ = (ctx, command);
        Err(CacheError::unsupported(Capability::RawCommand, "operate"))
    }

    /// Release backend resources. The provider is unusable afterwards.
    async fn close(&self) -> CacheResult<()>;
}
