use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use super::{config_source, engine, resolve_tenant};
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::TenantArgs;
use crate::domain::models::{CacheStats, CapabilitySet, Config, DriverConfig};
use crate::domain::ports::ConfigPath;
use crate::services::DriverRegistry;

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub tenant: String,
    pub path: String,
    pub provider: String,
    pub params: BTreeMap<String, String>,
    pub capabilities: CapabilitySet,
    pub stats: Option<CacheStats>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Tenant:       {}", self.tenant),
            format!("Config path:  {}", self.path),
            format!("Provider:     {}", self.provider),
        ];
        for (name, value) in &self.params {
            lines.push(format!("  {name} = {value}"));
        }
        lines.push(format!("Capabilities: {}", self.capabilities));
        if let Some(stats) = self.stats {
            let capacity = if stats.capacity == 0 {
                "unbounded".to_string()
            } else {
                stats.capacity.to_string()
            };
            lines.push(format!("Entries:      {} / {capacity}", stats.len));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl CheckOutput {
    fn new(
        tenant: String,
        config: DriverConfig,
        capabilities: CapabilitySet,
        stats: Option<CacheStats>,
    ) -> Self {
        Self {
            path: ConfigPath::tenant_cache(&tenant).to_string(),
            tenant,
            provider: config.provider().to_string(),
            params: config.params().clone(),
            capabilities,
            stats,
        }
    }
}

pub async fn execute(args: TenantArgs, config: &Config, json_mode: bool) -> Result<()> {
    let tenant = resolve_tenant(args.tenant, config)?;

    let registry = DriverRegistry::with_builtin_drivers();
    let source = config_source(config);
    let engine = engine(&registry, &source, config);
    let driver_config = engine
        .resolve_config(&tenant)
        .await
        .with_context(|| format!("Failed to resolve cache config for tenant {tenant}"))?;
    let cache = engine
        .bootstrap(&tenant)
        .await
        .with_context(|| format!("Failed to bootstrap cache for tenant {tenant}"))?;

    let out = CheckOutput::new(tenant, driver_config, cache.capabilities(), cache.stats());
    cache.close().await?;

    output(&out, json_mode);
    Ok(())
}
