use async_trait::async_trait;
use creatorhub_client::{
    AddressResult, ClientError, ExtensionBridge, InMemorySigner, WalletAddress, WalletSession,
};
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const BASE32: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// A random, well-formed Stellar account id
pub fn sample_address() -> WalletAddress {
    let mut rng = rand::thread_rng();
    let body: String = (0..55)
        .map(|_| BASE32[rng.gen_range(0..BASE32.len())] as char)
        .collect();
    WalletAddress::parse(&format!("G{body}")).expect("generated address is valid")
}

/// Session already connected through an in-memory signer
pub async fn connected_session(address: WalletAddress) -> WalletSession {
    let session = WalletSession::new(Arc::new(InMemorySigner::new(address)));
    session.connect().await.expect("in-memory signer connects");
    session
}

/// Extension bridge with canned answers
pub struct ScriptedBridge {
    pub connected: bool,
    pub address: AddressResult,
    pub latency: Duration,
    pub address_requests: AtomicUsize,
}

impl ScriptedBridge {
    pub fn authorized(address: &WalletAddress) -> Self {
        Self {
            connected: true,
            address: AddressResult {
                address: address.to_string(),
                error: None,
            },
            latency: Duration::ZERO,
            address_requests: AtomicUsize::new(0),
        }
    }

    pub fn not_installed() -> Self {
        Self {
            connected: false,
            address: AddressResult::default(),
            latency: Duration::ZERO,
            address_requests: AtomicUsize::new(0),
        }
    }

    pub fn rejecting(error: &str) -> Self {
        Self {
            connected: true,
            address: AddressResult {
                address: String::new(),
                error: Some(error.to_string()),
            },
            latency: Duration::ZERO,
            address_requests: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl ExtensionBridge for ScriptedBridge {
    async fn is_connected(&self) -> Result<bool, ClientError> {
        Ok(self.connected)
    }

    async fn get_address(&self) -> Result<AddressResult, ClientError> {
        self.address_requests.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.address.clone())
    }
}
