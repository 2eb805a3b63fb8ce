//! Configuration source port.

use std::fmt;

use async_trait::async_trait;

use crate::domain::errors::ConfigSourceError;

/// Logical location of a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath {
    pub namespace: String,
    pub section: String,
    pub key: String,
}

impl ConfigPath {
    pub fn new(
        namespace: impl Into<String>,
        section: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            section: section.into(),
            key: key.into(),
        }
    }

    /// Where a tenant's cache document lives: `base` / `cache` / tenant id.
    pub fn tenant_cache(tenant: &str) -> Self {
        Self::new("base", "cache", tenant)
    }

    /// Dotted form, e.g. `base.cache.10000`.
    pub fn dotted(&self) -> String {
        format!("{}.{}.{}", self.namespace, self.section, self.key)
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/system/{}/{}/{}", self.namespace, self.section, self.key)
    }
}

/// An opaque source of string configuration values.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn fetch(&self, path: &ConfigPath) -> Result<String, ConfigSourceError>;
}
