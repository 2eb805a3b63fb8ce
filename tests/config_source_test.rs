//! Tenant configuration resolved from YAML files and the environment.

mod common;

use std::io::Write;

use cachemux::adapters::config_source::FigmentConfigSource;
use cachemux::{CacheEngine, CacheProvider, ConfigPath, ConfigSource, DriverRegistry};
use tempfile::NamedTempFile;

const PREFIX: &str = "CACHEMUX_ITEST_TENANT_";

fn tenants_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "base:\n  cache:\n    \"10000\": '{{\"provider\":\"mem\",\"mem\":\"1000\"}}'\n    \"42\":\n      provider: mem\n      mem: \"50\"\n"
    )
    .unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_bootstrap_from_yaml_file() {
    common::setup_test_logging();
    let file = tenants_file();
    let registry = DriverRegistry::with_builtin_drivers();
    let source = FigmentConfigSource::new(file.path());

    let cache = CacheEngine::new(&registry, &source)
        .bootstrap("10000")
        .await
        .unwrap();
    assert_eq!(cache.stats().unwrap().capacity, 1000);

    let cache = CacheEngine::new(&registry, &source)
        .bootstrap("42")
        .await
        .unwrap();
    assert_eq!(cache.stats().unwrap().capacity, 50);
}

#[test]
fn test_environment_overrides_file_field() {
    let file = tenants_file();
    temp_env::with_vars([(format!("{PREFIX}BASE__CACHE__42__MEM"), Some("99"))], || {
        let registry = DriverRegistry::with_builtin_drivers();
        let source = FigmentConfigSource::new(file.path()).with_env_prefix(PREFIX);

        let cache = tokio_test::block_on(CacheEngine::new(&registry, &source).bootstrap("42"))
            .unwrap();
        assert_eq!(cache.stats().unwrap().capacity, 99);
    });
}

#[test]
fn test_environment_adds_tenant() {
    let file = tenants_file();
    temp_env::with_vars(
        [(format!("{PREFIX}BASE__CACHE__77__PROVIDER"), Some("null"))],
        || {
            let source = FigmentConfigSource::new(file.path()).with_env_prefix(PREFIX);
            let raw = tokio_test::block_on(source.fetch(&ConfigPath::tenant_cache("77"))).unwrap();
            let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
            assert_eq!(parsed["provider"], "null");
        },
    );
}

#[tokio::test]
async fn test_missing_file_reports_not_found() {
    let source = FigmentConfigSource::new("/nonexistent/cachemux/tenants.yaml");
    let err = source
        .fetch(&ConfigPath::tenant_cache("10000"))
        .await
        .unwrap_err();
    assert!(matches!(err, cachemux::ConfigSourceError::NotFound(_)));
}
