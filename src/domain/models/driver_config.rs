//! Parsed per-tenant cache configuration.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::errors::BootstrapError;

/// Name of the field selecting the driver.
pub const PROVIDER_FIELD: &str = "provider";

/// A tenant's cache configuration: the driver name plus the remaining
/// driver-specific parameters, passed to the driver verbatim.
///
/// ```json
/// {"provider": "mem", "mem": "1000"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverConfig {
    provider: String,
    params: BTreeMap<String, String>,
}

impl DriverConfig {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Parse the JSON document stored for a tenant.
    ///
    /// The document must be an object with a non-empty string `provider`.
    /// Other fields may be strings, numbers or booleans; they are kept as
    /// strings. Nested arrays and objects are rejected.
    pub fn from_json(raw: &str) -> Result<Self, BootstrapError> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Object(fields) = value else {
            return Err(BootstrapError::MalformedConfig(
                "expected a JSON object".to_string(),
            ));
        };

        let mut provider = None;
        let mut params = BTreeMap::new();
        for (key, value) in fields {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => continue,
                Value::Array(_) | Value::Object(_) => {
                    return Err(BootstrapError::MalformedConfig(format!(
                        "field '{key}' must be a scalar value"
                    )));
                }
            };
            if key == PROVIDER_FIELD {
                provider = Some(text);
            } else {
                params.insert(key, text);
            }
        }

        match provider {
            Some(name) if !name.trim().is_empty() => Ok(Self {
                provider: name,
                params,
            }),
            _ => Err(BootstrapError::MissingProvider),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub const fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}
