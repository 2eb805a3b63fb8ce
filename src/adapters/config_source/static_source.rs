//! In-memory configuration source.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::errors::ConfigSourceError;
use crate::domain::ports::{ConfigPath, ConfigSource};

/// Configuration source backed by a map of `/system/...` paths to values.
///
/// Useful for embedding and for tests:
///
/// ```
/// use cachemux::adapters::config_source::StaticConfigSource;
///
/// let source = StaticConfigSource::new()
///     .with_tenant("10000", r#"{"provider":"mem","mem":"1000"}"#);
/// ```
#[derive(Debug, Default)]
pub struct StaticConfigSource {
    values: RwLock<HashMap<String, String>>,
}

impl StaticConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(path, value)` pairs, paths in `/system/...` form.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }

    /// Store the cache document for `tenant`.
    #[must_use]
    pub fn with_tenant(self, tenant: &str, document: impl Into<String>) -> Self {
        self.insert(&ConfigPath::tenant_cache(tenant), document);
        self
    }

    pub fn insert(&self, path: &ConfigPath, value: impl Into<String>) {
        self.values.write().insert(path.to_string(), value.into());
    }

    pub fn remove(&self, path: &ConfigPath) -> Option<String> {
        self.values.write().remove(&path.to_string())
    }
}

#[async_trait]
impl ConfigSource for StaticConfigSource {
    async fn fetch(&self, path: &ConfigPath) -> Result<String, ConfigSourceError> {
        let key = path.to_string();
        self.values
            .read()
            .get(&key)
            .cloned()
            .ok_or(ConfigSourceError::NotFound(key))
    }
}
