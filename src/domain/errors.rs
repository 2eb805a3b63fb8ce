//! Domain errors for the cache engine.
//!
//! Errors are split into two tiers. Start-up errors ([`RegistryError`],
//! [`ConfigSourceError`], [`DriverError`], [`BootstrapError`]) describe a
//! misconfigured deployment and are meant to abort the initializing path.
//! Runtime errors ([`CacheError`]) are returned per operation and let callers
//! route around capability gaps.

use std::time::Duration;

use thiserror::Error;

use super::models::Capability;

/// Errors returned by provider operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Operation '{operation}' is not supported: backend lacks the {capability} capability")]
    Unsupported {
        capability: Capability,
        operation: &'static str,
    },

    #[error("Cache provider is closed")]
    Closed,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation exceeded its deadline")]
    DeadlineExceeded,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl CacheError {
    /// Shorthand for an [`CacheError::Unsupported`] failure.
    pub const fn unsupported(capability: Capability, operation: &'static str) -> Self {
        Self::Unsupported {
            capability,
            operation,
        }
    }

    /// Whether this error reports a missing capability.
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Result type for provider operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors raised while registering drivers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Driver name cannot be empty")]
    EmptyName,

    #[error("Driver '{0}' is already registered")]
    Duplicate(String),
}

/// Errors raised by a configuration source.
#[derive(Debug, Error)]
pub enum ConfigSourceError {
    #[error("No configuration found at {0}")]
    NotFound(String),

    #[error("Configuration source unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration source timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors raised by a driver while constructing a provider.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Invalid value '{value}' for parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("Driver initialization failed: {0}")]
    InitializationFailed(String),
}

/// Errors raised while bootstrapping a tenant's cache provider.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to load cache configuration for tenant '{tenant}': {source}")]
    ConfigFetch {
        tenant: String,
        #[source]
        source: ConfigSourceError,
    },

    #[error("Malformed cache configuration: {0}")]
    MalformedConfig(String),

    #[error("Cache configuration does not name a provider")]
    MissingProvider,

    #[error("No cache driver registered under '{0}'")]
    UnknownDriver(String),

    #[error("Driver '{driver}' failed to build a provider: {source}")]
    Driver {
        driver: String,
        #[source]
        source: DriverError,
    },
}

impl From<serde_json::Error> for BootstrapError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedConfig(err.to_string())
    }
}
