//! Wallet identity
//!
//! The wallet extension is reached through the [`Signer`] capability. A
//! [`WalletSession`] is created once at start-up and handed to every flow
//! that needs the caller's address.

use crate::ClientError;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Length of a Stellar account id
const ADDRESS_LEN: usize = 56;

/// A Stellar account id (`G...`, 56 base32 characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let raw = raw.trim();
        if raw.len() != ADDRESS_LEN {
            return Err(ClientError::InvalidAddress(format!(
                "expected {ADDRESS_LEN} characters, got {}",
                raw.len()
            )));
        }
        if !raw.starts_with('G') {
            return Err(ClientError::InvalidAddress(
                "account ids start with 'G'".to_string(),
            ));
        }
        if let Some(c) = raw
            .chars()
            .find(|c| !matches!(c, 'A'..='Z' | '2'..='7'))
        {
            return Err(ClientError::InvalidAddress(format!(
                "unexpected character {c:?}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for display, e.g. `GABC...WXYZ`
    pub fn truncated(&self) -> String {
        truncate_address(&self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keep the first and last four characters of anything longer than eight
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Something that can prove which wallet the user controls
#[async_trait]
pub trait Signer: Send + Sync {
    /// Ask the wallet for the user's address, prompting if needed
    async fn connect(&self) -> Result<WalletAddress, ClientError>;

    /// Human readable name for logs
    fn name(&self) -> &str;
}

/// Response of an extension address request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressResult {
    pub address: String,
    pub error: Option<String>,
}

/// Message channel to a browser wallet extension
#[async_trait]
pub trait ExtensionBridge: Send + Sync {
    /// Whether the extension is installed and has authorized this site
    async fn is_connected(&self) -> Result<bool, ClientError>;

    /// Request the active account address
    async fn get_address(&self) -> Result<AddressResult, ClientError>;
}

/// Signer backed by a wallet extension
pub struct ExtensionSigner<B> {
    bridge: B,
}

impl<B: ExtensionBridge> ExtensionSigner<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl<B: ExtensionBridge> Signer for ExtensionSigner<B> {
    async fn connect(&self) -> Result<WalletAddress, ClientError> {
        if !self.bridge.is_connected().await? {
            return Err(ClientError::WalletUnavailable(
                "wallet extension not connected; install it and authorize this site".to_string(),
            ));
        }

        let result = self.bridge.get_address().await?;
        if let Some(error) = result.error {
            return Err(ClientError::WalletRejected(error));
        }

        WalletAddress::parse(&result.address)
    }

    fn name(&self) -> &str {
        "extension"
    }
}

/// Signer returning a fixed answer, for tests and demos
pub struct InMemorySigner {
    outcome: Result<WalletAddress, String>,
}

impl InMemorySigner {
    pub fn new(address: WalletAddress) -> Self {
        Self {
            outcome: Ok(address),
        }
    }

    /// A signer whose every connect attempt is rejected with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
        }
    }
}

#[async_trait]
impl Signer for InMemorySigner {
    async fn connect(&self) -> Result<WalletAddress, ClientError> {
        self.outcome
            .clone()
            .map_err(ClientError::WalletRejected)
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

/// Counts one in-flight connect until dropped, so a cancelled connect is released too
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Connection state for one user's wallet
pub struct WalletSession {
    signer: Arc<dyn Signer>,
    public_key: RwLock<Option<WalletAddress>>,
    connecting: AtomicUsize,
}

impl WalletSession {
    pub fn new(signer: Arc<dyn Signer>) -> Self {
        Self {
            signer,
            public_key: RwLock::new(None),
            connecting: AtomicUsize::new(0),
        }
    }

    /// Connect through the signer. `is_connecting` stays set while any
    /// connect is still waiting on the signer.
    pub async fn connect(&self) -> Result<WalletAddress, ClientError> {
        let _in_flight = InFlight::enter(&self.connecting);

        match self.signer.connect().await {
            Ok(address) => {
                info!(signer = self.signer.name(), address = %address.truncated(), "Wallet connected");
                *self.public_key.write().await = Some(address.clone());
                Ok(address)
            }
            Err(e) => {
                warn!(signer = self.signer.name(), "Failed to connect wallet: {}", e);
                Err(e)
            }
        }
    }

    pub async fn disconnect(&self) {
        *self.public_key.write().await = None;
        info!("Wallet disconnected");
    }

    pub async fn public_key(&self) -> Option<WalletAddress> {
        self.public_key.read().await.clone()
    }

    pub async fn is_connected(&self) -> bool {
        self.public_key.read().await.is_some()
    }

    pub async fn is_connecting(&self) -> bool {
        self.connecting.load(Ordering::SeqCst) > 0
    }

    /// The connected address, or [`ClientError::WalletNotConnected`]
    pub async fn require_address(&self) -> Result<WalletAddress, ClientError> {
        self.public_key().await.ok_or(ClientError::WalletNotConnected)
    }
}
