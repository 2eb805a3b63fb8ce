//! Common test utilities for integration tests
//!
//! Provides shared fixtures for building registries, config sources and
//! bootstrapped providers.

#![allow(dead_code)]

use std::sync::Arc;

use cachemux::adapters::config_source::StaticConfigSource;
use cachemux::{CacheEngine, CacheProvider, DriverRegistry};

/// Tenant id used by the bootstrap scenarios.
pub const TENANT: &str = "10000";

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Config source holding a single tenant document.
pub fn source_with(tenant: &str, document: &str) -> StaticConfigSource {
    StaticConfigSource::new().with_tenant(tenant, document)
}

/// Bootstrap an LRU provider of the given capacity through the engine.
pub async fn memory_cache(capacity: usize) -> Arc<dyn CacheProvider> {
    let registry = DriverRegistry::with_builtin_drivers();
    let source = source_with(
        TENANT,
        &format!(r#"{{"provider":"mem","mem":"{capacity}"}}"#),
    );
    CacheEngine::new(&registry, &source)
        .bootstrap(TENANT)
        .await
        .expect("Failed to bootstrap memory cache")
}
