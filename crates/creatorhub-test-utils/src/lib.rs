pub mod fixtures;
pub mod wallet;

pub use fixtures::TestFixtures;
pub use wallet::{connected_session, sample_address, ScriptedBridge};

use creatorhub_client::{ClientConfig, PlaceholderBackend};
use std::sync::Once;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("creatorhub=debug,creatorhub_client=debug,creatorhub_crypto=debug")
            }))
            .with_test_writer()
            .init();
    });
}

#[derive(Debug, Clone)]
pub struct TestConfig {
    pub placeholder_delay: Duration,
    pub api_base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            placeholder_delay: Duration::ZERO, // Tests don't wait
            api_base_url: "http://backend.test".to_string(),
        }
    }
}

impl TestConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_base_url.clone(),
            placeholder_delay: self.placeholder_delay,
            ..ClientConfig::default()
        }
    }

    pub fn backend(&self) -> PlaceholderBackend {
        PlaceholderBackend::new(self.client_config())
    }
}
