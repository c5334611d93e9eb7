//! Test helpers: build the router around an in-memory provider.
//!
//! Run from workspace root: `cargo test -p cliplens-api --test analyze_test`.

pub mod provider;

use axum_test::TestServer;
use cliplens_api::setup::routes;
use cliplens_api::AppState;
use cliplens_core::Config;
use std::collections::HashMap;
use std::sync::Arc;

pub use provider::RecordingProvider;

/// Test application: server plus the provider double behind it.
pub struct TestApp {
    pub server: TestServer,
    pub provider: Arc<RecordingProvider>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("GEMINI_API_KEY".to_string(), "test-key".to_string());
    vars.insert("POLL_INTERVAL_SECS".to_string(), "1".to_string());
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

pub fn setup_test_app(provider: RecordingProvider) -> TestApp {
    setup_test_app_with_config(provider, test_config(&[]))
}

pub fn setup_test_app_with_config(provider: RecordingProvider, config: Config) -> TestApp {
    let provider = Arc::new(provider);
    let state = Arc::new(AppState::new(config.clone(), provider.clone()));
    let router = routes::setup_routes(&config, state).expect("router");
    let server = TestServer::new(router).expect("test server");

    TestApp { server, provider }
}
