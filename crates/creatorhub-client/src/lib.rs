//! CreatorHub client orchestration
//!
//! Wallet session, signer capability, backend collaborators and the
//! upload/view/purchase flows built on top of `creatorhub-crypto`.

pub mod api;
pub mod config;
pub mod content;
pub mod flows;
pub mod placeholder;
pub mod pricing;
pub mod wallet;

pub use api::{
    AccessCheckRequest, AccessCheckResponse, Backend, BuyContentRequest, BuyContentResponse,
    ContentKeyRequest, ContentKeyResponse, ContentMintRequest, ContentMintResponse,
    CreatorRegisterRequest, CreatorRegisterResponse, IpfsUploadResponse, SubscribeRequest,
    SubscribeResponse,
};
pub use config::ClientConfig;
pub use content::ContentKind;
pub use flows::{CreatedContent, UploadRequest, ViewedContent};
pub use placeholder::PlaceholderBackend;
pub use pricing::{format_xlm, parse_xlm, MICRO_PER_XLM};
pub use wallet::{
    AddressResult, ExtensionBridge, ExtensionSigner, InMemorySigner, Signer, WalletAddress,
    WalletSession,
};

use creatorhub_crypto::CryptoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("Wallet unavailable: {0}")]
    WalletUnavailable(String),

    #[error("Wallet rejected request: {0}")]
    WalletRejected(String),

    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Background task failed: {0}")]
    Task(String),
}
