//! Client configuration

use crate::ClientError;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Prefix shared by every environment variable, e.g. `CREATORHUB_IPFS_GATEWAY`
pub const ENV_PREFIX: &str = "CREATORHUB";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_IPFS_GATEWAY: &str = "https://gateway.pinata.cloud";
const DEFAULT_PLACEHOLDER_DELAY_MS: u64 = 800;

/// Where the backend collaborators live and how the placeholders behave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the CreatorHub API, without trailing slash
    pub api_base_url: String,
    /// IPFS HTTP gateway, always with scheme and without trailing slash
    pub ipfs_gateway: String,
    /// Simulated latency of every placeholder call
    pub placeholder_delay: Duration,
}

/// Settings as they arrive from the environment, before normalisation
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_api_base_url")]
    api_base_url: String,

    #[serde(default = "default_ipfs_gateway")]
    ipfs_gateway: String,

    #[serde(default = "default_placeholder_delay_ms")]
    placeholder_delay_ms: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.into()
}
fn default_ipfs_gateway() -> String {
    DEFAULT_IPFS_GATEWAY.into()
}
fn default_placeholder_delay_ms() -> u64 {
    DEFAULT_PLACEHOLDER_DELAY_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            ipfs_gateway: default_ipfs_gateway(),
            placeholder_delay: Duration::from_millis(DEFAULT_PLACEHOLDER_DELAY_MS),
        }
    }
}

impl ClientConfig {
    /// Load from `CREATORHUB_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ClientError> {
        Self::load(None)
    }

    /// Load from an explicit set of variables instead of the process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ClientError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self, ClientError> {
        let raw: RawConfig = ::config::Config::builder()
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .source(vars),
            )
            .build()?
            .try_deserialize()?;

        raw.validate()
    }

    /// Full URL of an API endpoint such as `/content/mint`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url, endpoint)
    }

    /// Gateway URL serving `cid`
    pub fn gateway_url(&self, cid: &str) -> String {
        format!("{}/ipfs/{}", self.ipfs_gateway, cid)
    }
}

impl RawConfig {
    fn validate(self) -> Result<ClientConfig, ClientError> {
        let api_base_url = match self.api_base_url.trim() {
            "" => default_api_base_url(),
            url => url.trim_end_matches('/').to_string(),
        };
        if !has_scheme(&api_base_url) {
            return Err(ClientError::InvalidInput(format!(
                "{ENV_PREFIX}_API_BASE_URL must be an http(s) URL, got {api_base_url:?}"
            )));
        }

        let ipfs_gateway = match self.ipfs_gateway.trim() {
            "" => default_ipfs_gateway(),
            gateway => normalize_gateway(gateway),
        };

        Ok(ClientConfig {
            api_base_url,
            ipfs_gateway,
            placeholder_delay: Duration::from_millis(self.placeholder_delay_ms),
        })
    }
}

fn has_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Gateways configured without a scheme get `https://`
fn normalize_gateway(raw: &str) -> String {
    let raw = raw.trim();
    if has_scheme(raw) {
        raw.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", raw.trim_matches('/'))
    }
}
