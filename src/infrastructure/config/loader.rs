use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Tenants file path cannot be empty")]
    EmptyTenantsFile,

    #[error("Invalid fetch_timeout_ms: {0}. Must be at least 1")]
    InvalidFetchTimeout(u64),

    #[error("Default tenant cannot be blank")]
    BlankDefaultTenant,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .cachemux/config.yaml (project config)
    /// 3. .cachemux/local.yaml (project local overrides, optional)
    /// 4. Environment variables (CACHEMUX_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::base()
            .merge(Yaml::file(".cachemux/config.yaml"))
            .merge(Yaml::file(".cachemux/local.yaml"))
            .merge(Self::env())
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring environment
    /// overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Self::base()
            .merge(Yaml::file(path.as_ref()))
            .merge(Self::env())
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn base() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    // Tenant documents use their own CACHEMUX_TENANT_ prefix.
    fn env() -> Env {
        Env::prefixed("CACHEMUX_")
            .filter(|key| !key.starts_with("tenant_"))
            .split("__")
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.source.tenants_file.trim().is_empty() {
            return Err(ConfigError::EmptyTenantsFile);
        }

        if config.source.fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidFetchTimeout(config.source.fetch_timeout_ms));
        }

        if config
            .default_tenant
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
        {
            return Err(ConfigError::BlankDefaultTenant);
        }

        Ok(())
    }
}
