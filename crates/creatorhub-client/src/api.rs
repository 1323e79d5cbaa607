//! Backend collaborator interface
//!
//! Request and response bodies keep the JSON field names of the CreatorHub
//! HTTP API. Prices are integer micro-XLM.

use crate::ClientError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const IPFS_UPLOAD: &str = "/ipfs/upload";
pub const CREATOR_REGISTER: &str = "/creator/register";
pub const CONTENT_MINT: &str = "/content/mint";
pub const SUBSCRIPTION_SUBSCRIBE: &str = "/subscription/subscribe";
pub const CONTENT_BUY: &str = "/content/buy";
pub const CONTENT_KEY: &str = "/content/key";
pub const ACCESS_CHECK: &str = "/access/check";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpfsUploadResponse {
    pub cid: String,
    pub ipfs_uri: String,
    pub gateway_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorRegisterRequest {
    pub creator_address: String,
    pub profile_uri: String,
    pub subscription_price: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorRegisterResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Mint request. `aes_key` is the key descriptor of the uploaded ciphertext.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMintRequest {
    pub creator_address: String,
    pub ipfs_cid: String,
    pub price: i64,
    pub is_for_subscribers: bool,
    pub aes_key: String,
}

impl fmt::Debug for ContentMintRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentMintRequest")
            .field("creator_address", &self.creator_address)
            .field("ipfs_cid", &self.ipfs_cid)
            .field("price", &self.price)
            .field("is_for_subscribers", &self.is_for_subscribers)
            .field("aes_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMintResponse {
    pub ok: bool,
    pub content_id: u64,
    pub cli_output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub subscriber_address: String,
    pub creator_address: String,
    pub months: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyContentRequest {
    #[serde(alias = "subscriber_address")]
    pub buyer_address: String,
    pub content_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyContentResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentKeyRequest {
    pub wallet_address: String,
    pub content_id: u64,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentKeyResponse {
    pub ok: bool,
    pub content_id: u64,
    pub aes_key: String,
}

impl fmt::Debug for ContentKeyResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentKeyResponse")
            .field("ok", &self.ok)
            .field("content_id", &self.content_id)
            .field("aes_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCheckRequest {
    pub user_address: String,
    pub content_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCheckResponse {
    pub ok: bool,
    pub has_access: bool,
}

/// Storage, ledger and key custody as seen from the client
#[async_trait]
pub trait Backend: Send + Sync {
    /// Pin already-encrypted bytes to IPFS
    async fn upload_to_ipfs(&self, data: Vec<u8>) -> Result<IpfsUploadResponse, ClientError>;

    /// Download bytes from the IPFS gateway
    async fn fetch_from_ipfs(&self, cid: &str) -> Result<Vec<u8>, ClientError>;

    async fn register_creator(
        &self,
        request: CreatorRegisterRequest,
    ) -> Result<CreatorRegisterResponse, ClientError>;

    /// Record content on the ledger and hand its key to custody
    async fn mint_content(
        &self,
        request: ContentMintRequest,
    ) -> Result<ContentMintResponse, ClientError>;

    async fn subscribe(&self, request: SubscribeRequest)
        -> Result<SubscribeResponse, ClientError>;

    async fn buy_content(
        &self,
        request: BuyContentRequest,
    ) -> Result<BuyContentResponse, ClientError>;

    /// Fetch the key descriptor for content the caller may view
    async fn get_content_key(
        &self,
        request: ContentKeyRequest,
    ) -> Result<ContentKeyResponse, ClientError>;

    async fn check_access(
        &self,
        request: AccessCheckRequest,
    ) -> Result<AccessCheckResponse, ClientError>;
}
