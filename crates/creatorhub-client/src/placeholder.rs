//! In-process stand-in for the CreatorHub backend
//!
//! Every call logs the request it would have sent, waits the configured
//! delay and then answers from memory. Access rules follow the on-chain
//! contract: a purchase grants access to one item; an unexpired subscription
//! grants access to that creator's subscriber-only items.

use crate::api::{self, *};
use crate::{ClientConfig, ClientError};
use async_trait::async_trait;
use ring::digest;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Length of a subscription month in seconds
const SECONDS_PER_MONTH: u64 = 30 * 24 * 3600;

/// CIDv1 prefix: base16 multibase, raw codec, sha2-256 multihash of 32 bytes
const CID_PREFIX: &str = "f01551220";

/// Source of the current time in unix seconds
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

#[derive(Debug, Clone)]
struct CreatorRecord {
    profile_uri: String,
    subscription_price: i64,
}

#[derive(Debug, Clone)]
struct ContentRecord {
    creator: String,
    encrypted_cid: String,
    price: i64,
    is_for_subscribers: bool,
}

#[derive(Default)]
struct LedgerState {
    blobs: HashMap<String, Vec<u8>>,
    creators: HashMap<String, CreatorRecord>,
    contents: BTreeMap<u64, ContentRecord>,
    keys: HashMap<u64, String>,
    /// (subscriber, creator) -> expiry in unix seconds
    subscriptions: HashMap<(String, String), u64>,
    purchases: HashSet<(String, u64)>,
}

impl LedgerState {
    fn has_access(&self, user: &str, content_id: u64, now: u64) -> bool {
        let Some(content) = self.contents.get(&content_id) else {
            return false;
        };

        if self.purchases.contains(&(user.to_string(), content_id)) {
            return true;
        }

        content.is_for_subscribers
            && self
                .subscriptions
                .get(&(user.to_string(), content.creator.clone()))
                .is_some_and(|expiry| *expiry > now)
    }
}

pub struct PlaceholderBackend {
    config: ClientConfig,
    clock: Clock,
    state: Mutex<LedgerState>,
}

impl PlaceholderBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_clock(config, Arc::new(unix_now))
    }

    /// Use `clock` (unix seconds) for subscription expiry
    pub fn with_clock(config: ClientConfig, clock: Clock) -> Self {
        Self {
            config,
            clock,
            state: Mutex::new(LedgerState::default()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Profile URI and price of a registered creator
    pub async fn creator_profile(&self, creator: &str) -> Option<(String, i64)> {
        self.state
            .lock()
            .await
            .creators
            .get(creator)
            .map(|c| (c.profile_uri.clone(), c.subscription_price))
    }

    /// Encrypted CID and price of minted content
    pub async fn content_listing(&self, content_id: u64) -> Option<(String, i64)> {
        self.state
            .lock()
            .await
            .contents
            .get(&content_id)
            .map(|c| (c.encrypted_cid.clone(), c.price))
    }

    /// Log the request that would have been sent, then simulate latency
    async fn simulate_post<T: Serialize>(&self, endpoint: &str, body: &T) {
        let url = self.config.endpoint_url(endpoint);
        info!("POST {} {}", url, redacted_json(body));
        self.pause().await;
    }

    async fn pause(&self) {
        if !self.config.placeholder_delay.is_zero() {
            tokio::time::sleep(self.config.placeholder_delay).await;
        }
    }
}

#[async_trait]
impl Backend for PlaceholderBackend {
    async fn upload_to_ipfs(&self, data: Vec<u8>) -> Result<IpfsUploadResponse, ClientError> {
        info!(
            "POST {} <{} bytes>",
            self.config.endpoint_url(api::IPFS_UPLOAD),
            data.len()
        );
        self.pause().await;

        let cid = content_address(&data);
        self.state.lock().await.blobs.insert(cid.clone(), data);

        Ok(IpfsUploadResponse {
            ipfs_uri: format!("ipfs://{cid}"),
            gateway_url: self.config.gateway_url(&cid),
            cid,
        })
    }

    async fn fetch_from_ipfs(&self, cid: &str) -> Result<Vec<u8>, ClientError> {
        let cid = cid.trim_start_matches("ipfs://");
        info!("GET {}", self.config.gateway_url(cid));
        self.pause().await;

        self.state
            .lock()
            .await
            .blobs
            .get(cid)
            .cloned()
            .ok_or_else(|| ClientError::Api {
                status: 404,
                message: format!("CID {cid} not found on gateway"),
            })
    }

    async fn register_creator(
        &self,
        request: CreatorRegisterRequest,
    ) -> Result<CreatorRegisterResponse, ClientError> {
        self.simulate_post(api::CREATOR_REGISTER, &request).await;

        self.state.lock().await.creators.insert(
            request.creator_address,
            CreatorRecord {
                profile_uri: request.profile_uri,
                subscription_price: request.subscription_price,
            },
        );

        Ok(CreatorRegisterResponse {
            ok: true,
            message: Some("Creator registered".to_string()),
        })
    }

    async fn mint_content(
        &self,
        request: ContentMintRequest,
    ) -> Result<ContentMintResponse, ClientError> {
        self.simulate_post(api::CONTENT_MINT, &request).await;

        let mut state = self.state.lock().await;
        let content_id = state.contents.len() as u64 + 1;
        state.contents.insert(
            content_id,
            ContentRecord {
                creator: request.creator_address,
                encrypted_cid: format!("ipfs://{}", request.ipfs_cid),
                price: request.price,
                is_for_subscribers: request.is_for_subscribers,
            },
        );
        state.keys.insert(content_id, request.aes_key);
        debug!(content_id, "Stored content key");

        Ok(ContentMintResponse {
            ok: true,
            content_id,
            cli_output: content_id.to_string(),
        })
    }

    async fn subscribe(
        &self,
        request: SubscribeRequest,
    ) -> Result<SubscribeResponse, ClientError> {
        self.simulate_post(api::SUBSCRIPTION_SUBSCRIBE, &request).await;

        let expiry = (self.clock)() + u64::from(request.months) * SECONDS_PER_MONTH;
        self.state.lock().await.subscriptions.insert(
            (request.subscriber_address, request.creator_address),
            expiry,
        );

        Ok(SubscribeResponse {
            ok: true,
            message: Some("Subscription recorded".to_string()),
        })
    }

    async fn buy_content(
        &self,
        request: BuyContentRequest,
    ) -> Result<BuyContentResponse, ClientError> {
        self.simulate_post(api::CONTENT_BUY, &request).await;

        self.state
            .lock()
            .await
            .purchases
            .insert((request.buyer_address, request.content_id));

        Ok(BuyContentResponse {
            ok: true,
            message: Some("Purchase recorded".to_string()),
        })
    }

    async fn get_content_key(
        &self,
        request: ContentKeyRequest,
    ) -> Result<ContentKeyResponse, ClientError> {
        self.simulate_post(api::CONTENT_KEY, &request).await;

        let state = self.state.lock().await;
        if !state.has_access(&request.wallet_address, request.content_id, (self.clock)()) {
            return Err(ClientError::Api {
                status: 403,
                message: "User has no access to this content".to_string(),
            });
        }

        let aes_key = state
            .keys
            .get(&request.content_id)
            .cloned()
            .ok_or_else(|| ClientError::Api {
                status: 404,
                message: "AES key not found for this content".to_string(),
            })?;

        Ok(ContentKeyResponse {
            ok: true,
            content_id: request.content_id,
            aes_key,
        })
    }

    async fn check_access(
        &self,
        request: AccessCheckRequest,
    ) -> Result<AccessCheckResponse, ClientError> {
        self.simulate_post(api::ACCESS_CHECK, &request).await;

        let has_access = self.state.lock().await.has_access(
            &request.user_address,
            request.content_id,
            (self.clock)(),
        );

        Ok(AccessCheckResponse {
            ok: true,
            has_access,
        })
    }
}

/// CIDv1 (base16, raw codec) of `data`
pub fn content_address(data: &[u8]) -> String {
    let hash = digest::digest(&digest::SHA256, data);
    let hex: String = hash.as_ref().iter().map(|b| format!("{b:02x}")).collect();
    format!("{CID_PREFIX}{hex}")
}

/// JSON body with any `aes_key` field masked
fn redacted_json<T: Serialize>(body: &T) -> String {
    match serde_json::to_value(body) {
        Ok(mut value) => {
            if let Some(key) = value.get_mut("aes_key") {
                *key = serde_json::Value::String("<redacted>".to_string());
            }
            value.to_string()
        }
        Err(e) => format!("<unserializable body: {e}>"),
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
