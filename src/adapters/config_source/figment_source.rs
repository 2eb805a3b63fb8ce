//! File and environment backed configuration source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use figment::providers::{Env, Format, Yaml};
use figment::value::Value;
use figment::Figment;

use crate::domain::errors::ConfigSourceError;
use crate::domain::ports::{ConfigPath, ConfigSource};

/// Configuration source reading a YAML document, overridable from the
/// environment.
///
/// Values are looked up by dotted path (`base.cache.<tenant>`). A value may
/// be the JSON document as a string, or a YAML mapping that is re-encoded as
/// JSON:
///
/// ```yaml
/// base:
///   cache:
///     "10000": '{"provider":"mem","mem":"1000"}'
///     "10001":
///       provider: mem
///       mem: "50"
/// ```
///
/// With the prefix `CACHEMUX_TENANT_`, `CACHEMUX_TENANT_BASE__CACHE__10000`
/// overrides the first entry. The file is re-read on every fetch so edits
/// apply to the next bootstrap.
#[derive(Debug, Clone)]
pub struct FigmentConfigSource {
    path: PathBuf,
    env_prefix: Option<String>,
}

impl FigmentConfigSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            env_prefix: None,
        }
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn figment(&self) -> Figment {
        let figment = Figment::new().merge(Yaml::file(&self.path));
        match &self.env_prefix {
            Some(prefix) => figment.merge(Env::prefixed(prefix).split("__").lowercase(true)),
            None => figment,
        }
    }

    fn lookup(&self, path: &ConfigPath) -> Result<String, ConfigSourceError> {
        let value: Value = match self.figment().find_value(&path.dotted()) {
            Ok(value) => value,
            Err(err) if err.missing() => return Err(ConfigSourceError::NotFound(path.to_string())),
            Err(err) => return Err(ConfigSourceError::Unavailable(err.to_string())),
        };

        match value {
            Value::String(_, text) => Ok(text),
            other => serde_json::to_string(&other)
                .map_err(|e| ConfigSourceError::Unavailable(e.to_string())),
        }
    }
}

#[async_trait]
impl ConfigSource for FigmentConfigSource {
    async fn fetch(&self, path: &ConfigPath) -> Result<String, ConfigSourceError> {
        let source = self.clone();
        let path = path.clone();
        tokio::task::spawn_blocking(move || source.lookup(&path))
            .await
            .map_err(|e| ConfigSourceError::Unavailable(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_yaml(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_string_document() {
        let file = write_yaml(
            "base:\n  cache:\n    \"10000\": '{\"provider\":\"mem\",\"mem\":\"1000\"}'\n",
        );
        let source = FigmentConfigSource::new(file.path());
        let value = source
            .fetch(&ConfigPath::tenant_cache("10000"))
            .await
            .unwrap();
        assert_eq!(value, r#"{"provider":"mem","mem":"1000"}"#);
    }

    #[tokio::test]
    async fn test_mapping_document_is_reencoded() {
        let file = write_yaml("base:\n  cache:\n    \"42\":\n      provider: mem\n      mem: \"50\"\n");
        let source = FigmentConfigSource::new(file.path());
        let value = source.fetch(&ConfigPath::tenant_cache("42")).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&value).unwrap();
        assert_eq!(parsed["provider"], "mem");
        assert_eq!(parsed["mem"], "50");
    }

    #[tokio::test]
    async fn test_missing_tenant() {
        let file = write_yaml("base:\n  cache: {}\n");
        let source = FigmentConfigSource::new(file.path());
        let err = source
            .fetch(&ConfigPath::tenant_cache("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigSourceError::NotFound(_)));
    }
}
