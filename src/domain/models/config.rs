use serde::{Deserialize, Serialize};

/// Main configuration structure for the cachemux binary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Tenant used when a command does not name one
    #[serde(default)]
    pub default_tenant: Option<String>,

    /// Where tenant cache documents are read from
    #[serde(default)]
    pub source: SourceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tenant configuration source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SourceConfig {
    /// YAML file holding `base.cache.<tenant>` documents
    #[serde(default = "default_tenants_file")]
    pub tenants_file: String,

    /// Environment prefix overriding file values
    #[serde(default = "default_env_prefix")]
    pub env_prefix: String,

    /// Upper bound on a single configuration fetch
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

fn default_tenants_file() -> String {
    ".cachemux/tenants.yaml".to_string()
}

fn default_env_prefix() -> String {
    "CACHEMUX_TENANT_".to_string()
}

const fn default_fetch_timeout_ms() -> u64 {
    5000
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            tenants_file: default_tenants_file(),
            env_prefix: default_env_prefix(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
