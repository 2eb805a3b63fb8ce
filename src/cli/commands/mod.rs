//! CLI command handlers

pub mod check;
pub mod drivers;
pub mod run;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::adapters::config_source::FigmentConfigSource;
use crate::domain::models::Config;
use crate::domain::ports::CacheProvider;
use crate::services::{CacheEngine, DriverRegistry};

/// Pick the tenant from the command line, falling back to `default_tenant`.
pub fn resolve_tenant(arg: Option<String>, config: &Config) -> Result<String> {
    arg.or_else(|| config.default_tenant.clone())
        .context("No tenant given: pass --tenant or set default_tenant in config")
}

/// Tenant documents source described by the loaded config.
pub fn config_source(config: &Config) -> FigmentConfigSource {
    FigmentConfigSource::new(&config.source.tenants_file)
        .with_env_prefix(config.source.env_prefix.clone())
}

pub fn engine<'a>(
    registry: &'a DriverRegistry,
    source: &'a FigmentConfigSource,
    config: &Config,
) -> CacheEngine<'a> {
    CacheEngine::new(registry, source)
        .with_fetch_timeout(Duration::from_millis(config.source.fetch_timeout_ms))
}

/// Bootstrap the tenant's provider through the built-in driver registry.
pub async fn open_tenant(tenant: &str, config: &Config) -> Result<Arc<dyn CacheProvider>> {
    let registry = DriverRegistry::with_builtin_drivers();
    let source = config_source(config);
    engine(&registry, &source, config)
        .bootstrap(tenant)
        .await
        .with_context(|| format!("Failed to bootstrap cache for tenant {tenant}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tenant_prefers_argument() {
        let config = Config {
            default_tenant: Some("fallback".to_string()),
            ..Config::default()
        };
        assert_eq!(
            resolve_tenant(Some("10000".to_string()), &config).unwrap(),
            "10000"
        );
        assert_eq!(resolve_tenant(None, &config).unwrap(), "fallback");
    }

    #[test]
    fn test_resolve_tenant_requires_some_tenant() {
        assert!(resolve_tenant(None, &Config::default()).is_err());
    }
}
