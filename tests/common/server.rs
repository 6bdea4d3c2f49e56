//! Test server helpers
//!
//! Builds the full router over a fresh `MemoryStore` and wraps it in an
//! `axum_test::TestServer`. The store handle is kept so tests can inspect
//! what was persisted.

use axum_test::TestServer;
use snapshare::backend::server::create_app_with_store;
use snapshare::backend::MemoryStore;
use snapshare::shared::AppConfig;
use std::sync::Arc;

/// Session secret used by every test server
pub const TEST_SECRET: &str = "integration-test-secret";

/// A running test application
pub struct TestApp {
    pub server: TestServer,
    pub store: MemoryStore,
}

/// Configuration with the cheapest bcrypt cost
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .session_secret(TEST_SECRET)
        .bcrypt_cost(4)
        .static_dir("public")
        .build()
        .expect("valid test configuration")
}

impl TestApp {
    /// Start an application over an empty in-memory store
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let app = create_app_with_store(&test_config(), Arc::new(store.clone()));
        let server = TestServer::new(app).expect("Failed to start test server");
        Self { server, store }
    }
}
