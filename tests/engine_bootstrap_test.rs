//! Bootstrap of tenant caches through the registry and a config source.

mod common;

use std::sync::Arc;

use cachemux::adapters::config_source::StaticConfigSource;
use cachemux::{
    BootstrapError, CacheEngine, CacheProvider, Capability, ConfigPath, DriverConfig,
    DriverError, DriverRegistry, KeyValueStore, MemoryProvider, OpContext, RegistryError,
};
use common::{setup_test_logging, source_with, TENANT};

#[tokio::test]
async fn test_bootstrap_memory_tenant_from_system_path() {
    setup_test_logging();
    let registry = DriverRegistry::with_builtin_drivers();
    let source = StaticConfigSource::from_pairs([(
        "/system/base/cache/10000",
        r#"{"provider":"mem","mem":"1000"}"#,
    )]);

    let cache = CacheEngine::new(&registry, &source)
        .bootstrap(TENANT)
        .await
        .unwrap();

    assert_eq!(cache.name(), "mem");
    assert!(cache.supports(Capability::KeyValue));
    assert_eq!(cache.stats().unwrap().capacity, 1000);

    let ctx = OpContext::background();
    cache.set(&ctx, "token", "abc").await.unwrap();
    assert_eq!(cache.string(&ctx, "token").await.unwrap(), "abc");
}

#[tokio::test]
async fn test_registered_driver_is_resolvable() {
    let registry = DriverRegistry::new();
    registry
        .register(
            "custom",
            |config: &DriverConfig| -> Result<Arc<dyn CacheProvider>, DriverError> {
                let capacity = config.get("size").and_then(|s| s.parse().ok()).unwrap_or(0);
                Ok(Arc::new(MemoryProvider::new(capacity)))
            },
        )
        .unwrap();

    let source = source_with(TENANT, r#"{"provider":"custom","size":"3"}"#);
    let cache = CacheEngine::new(&registry, &source)
        .bootstrap(TENANT)
        .await
        .unwrap();
    assert_eq!(cache.stats().unwrap().capacity, 3);
}

#[test]
fn test_duplicate_registration_fails() {
    let registry = DriverRegistry::with_builtin_drivers();
    let err = registry
        .register("mem", |_: &DriverConfig| -> Result<Arc<dyn CacheProvider>, DriverError> {
            Ok(Arc::new(MemoryProvider::new(1)))
        })
        .unwrap_err();
    assert_eq!(err, RegistryError::Duplicate("mem".to_string()));
}

#[tokio::test]
async fn test_unknown_provider_fails_fast() {
    let registry = DriverRegistry::with_builtin_drivers();
    let source = source_with(TENANT, r#"{"provider":"redis"}"#);
    let err = CacheEngine::new(&registry, &source)
        .bootstrap(TENANT)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, BootstrapError::UnknownDriver(name) if name == "redis"));
}

#[tokio::test]
async fn test_malformed_json_fails_fast() {
    let registry = DriverRegistry::with_builtin_drivers();
    let source = source_with(TENANT, "{provider: mem");
    let err = CacheEngine::new(&registry, &source)
        .bootstrap(TENANT)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, BootstrapError::MalformedConfig(_)));
}

#[tokio::test]
async fn test_missing_provider_field_fails_fast() {
    let registry = DriverRegistry::with_builtin_drivers();
    let source = source_with(TENANT, r#"{"mem":"10"}"#);
    let err = CacheEngine::new(&registry, &source)
        .bootstrap(TENANT)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, BootstrapError::MissingProvider));
}

#[tokio::test]
async fn test_missing_tenant_document() {
    let registry = DriverRegistry::with_builtin_drivers();
    let source = StaticConfigSource::new();
    let err = CacheEngine::new(&registry, &source)
        .bootstrap("20000")
        .await
        .err()
        .unwrap();
    match err {
        BootstrapError::ConfigFetch { tenant, .. } => assert_eq!(tenant, "20000"),
        other => panic!("Expected ConfigFetch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_capacity_is_a_driver_error() {
    let registry = DriverRegistry::with_builtin_drivers();
    let source = source_with(TENANT, r#"{"provider":"mem","mem":"lots"}"#);
    let err = CacheEngine::new(&registry, &source)
        .bootstrap(TENANT)
        .await
        .err()
        .unwrap();
    assert!(matches!(
        err,
        BootstrapError::Driver {
            source: DriverError::InvalidParameter { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_null_driver_always_misses() {
    let registry = DriverRegistry::with_builtin_drivers();
    let source = source_with(TENANT, r#"{"provider":"null"}"#);
    let cache = CacheEngine::new(&registry, &source)
        .bootstrap(TENANT)
        .await
        .unwrap();

    let ctx = OpContext::background();
    cache.set(&ctx, "a", "1").await.unwrap();
    assert_eq!(cache.get(&ctx, "a").await.unwrap(), None);
    assert_eq!(cache.string(&ctx, "a").await.unwrap(), "");
    assert!(cache.stats().is_none());
}

#[test]
fn test_tenant_config_path() {
    assert_eq!(
        ConfigPath::tenant_cache(TENANT).to_string(),
        "/system/base/cache/10000"
    );
}
