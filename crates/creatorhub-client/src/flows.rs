//! Creator and subscriber flows
//!
//! Each flow takes the wallet session and backend explicitly. Encryption runs
//! on the blocking pool so large files do not stall the runtime.

use crate::api::*;
use crate::{parse_xlm, ClientError, ContentKind, WalletAddress, WalletSession};
use creatorhub_crypto::EncryptedContent;
use tracing::info;

/// Used when a creator registers without a profile URI
pub const DEFAULT_PROFILE_URI: &str = "https://example.com/profile";

/// Longest subscription that can be bought in one go
pub const MAX_SUBSCRIPTION_MONTHS: u32 = 12;

/// A file a creator wants to publish
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub title: String,
    pub description: String,
    /// Decimal XLM, as typed by the user
    pub price: String,
    pub is_for_subscribers: bool,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Content published by the current creator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedContent {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub encrypted_cid: String,
    /// Micro-XLM
    pub price: i64,
    pub is_for_subscribers: bool,
}

/// Decrypted content ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewedContent {
    pub content_id: u64,
    pub data: Vec<u8>,
    pub kind: ContentKind,
}

/// Encrypt on the blocking pool
pub async fn encrypt_file(data: Vec<u8>) -> Result<EncryptedContent, ClientError> {
    let sealed = tokio::task::spawn_blocking(move || creatorhub_crypto::encrypt(&data))
        .await
        .map_err(|e| ClientError::Task(e.to_string()))??;
    Ok(sealed)
}

/// Decrypt on the blocking pool
pub async fn decrypt_file(ciphertext: Vec<u8>, descriptor: String) -> Result<Vec<u8>, ClientError> {
    let plaintext =
        tokio::task::spawn_blocking(move || creatorhub_crypto::decrypt(&ciphertext, &descriptor))
            .await
            .map_err(|e| ClientError::Task(e.to_string()))??;
    Ok(plaintext)
}

pub async fn register_creator(
    session: &WalletSession,
    backend: &dyn Backend,
    profile_uri: &str,
    subscription_price: &str,
) -> Result<CreatorRegisterResponse, ClientError> {
    let creator = session.require_address().await?;
    let subscription_price = parse_xlm(subscription_price)?;

    let profile_uri = match profile_uri.trim() {
        "" => DEFAULT_PROFILE_URI.to_string(),
        uri => uri.to_string(),
    };

    info!(creator = %creator.truncated(), "Registering creator");
    backend
        .register_creator(CreatorRegisterRequest {
            creator_address: creator.to_string(),
            profile_uri,
            subscription_price,
        })
        .await
}

/// Encrypt a file, pin the ciphertext and mint it with its key descriptor
pub async fn upload_content(
    session: &WalletSession,
    backend: &dyn Backend,
    request: UploadRequest,
) -> Result<CreatedContent, ClientError> {
    let creator = session.require_address().await?;
    if request.file_name.trim().is_empty() {
        return Err(ClientError::InvalidInput("no file selected".to_string()));
    }
    let price = parse_xlm(&request.price)?;

    info!(
        file = %request.file_name,
        size = request.data.len(),
        "Encrypting content"
    );
    let sealed = encrypt_file(request.data).await?;

    let upload = backend.upload_to_ipfs(sealed.ciphertext).await?;
    info!(cid = %upload.cid, "Uploaded encrypted content");

    let minted = backend
        .mint_content(ContentMintRequest {
            creator_address: creator.to_string(),
            ipfs_cid: upload.cid.clone(),
            price,
            is_for_subscribers: request.is_for_subscribers,
            aes_key: sealed.descriptor,
        })
        .await?;
    info!(content_id = minted.content_id, "Minted content");

    Ok(CreatedContent {
        id: minted.content_id,
        title: request.title,
        description: request.description,
        encrypted_cid: upload.cid,
        price,
        is_for_subscribers: request.is_for_subscribers,
    })
}

pub async fn subscribe(
    session: &WalletSession,
    backend: &dyn Backend,
    creator: &str,
    months: u32,
) -> Result<SubscribeResponse, ClientError> {
    let subscriber = session.require_address().await?;
    let creator = WalletAddress::parse(creator)?;
    if !(1..=MAX_SUBSCRIPTION_MONTHS).contains(&months) {
        return Err(ClientError::InvalidInput(format!(
            "subscriptions run 1 to {MAX_SUBSCRIPTION_MONTHS} months, got {months}"
        )));
    }

    info!(creator = %creator.truncated(), months, "Subscribing");
    backend
        .subscribe(SubscribeRequest {
            subscriber_address: subscriber.to_string(),
            creator_address: creator.to_string(),
            months,
        })
        .await
}

pub async fn buy_content(
    session: &WalletSession,
    backend: &dyn Backend,
    content_id: u64,
) -> Result<BuyContentResponse, ClientError> {
    let buyer = session.require_address().await?;

    info!(content_id, "Buying content");
    backend
        .buy_content(BuyContentRequest {
            buyer_address: buyer.to_string(),
            content_id,
        })
        .await
}

pub async fn check_access(
    session: &WalletSession,
    backend: &dyn Backend,
    content_id: u64,
) -> Result<bool, ClientError> {
    let user = session.require_address().await?;
    let response = backend
        .check_access(AccessCheckRequest {
            user_address: user.to_string(),
            content_id,
        })
        .await?;
    Ok(response.has_access)
}

/// Fetch the key and ciphertext for `content_id`, then decrypt locally
pub async fn view_content(
    session: &WalletSession,
    backend: &dyn Backend,
    content_id: u64,
    encrypted_cid: &str,
) -> Result<ViewedContent, ClientError> {
    let viewer = session.require_address().await?;
    if encrypted_cid.trim().is_empty() {
        return Err(ClientError::InvalidInput("encrypted CID is required".to_string()));
    }

    info!(content_id, "Retrieving decryption key");
    let key = backend
        .get_content_key(ContentKeyRequest {
            wallet_address: viewer.to_string(),
            content_id,
        })
        .await?;

    info!(cid = %encrypted_cid, "Downloading content");
    let ciphertext = backend.fetch_from_ipfs(encrypted_cid.trim()).await?;

    info!(content_id, "Decrypting content");
    let data = decrypt_file(ciphertext, key.aes_key).await?;
    let kind = ContentKind::sniff(&data);

    Ok(ViewedContent {
        content_id,
        data,
        kind,
    })
}
