//! Client-side content encryption for CreatorHub
//!
//! Every upload is sealed under a fresh AES-256-GCM key and nonce. The pair is
//! exported as a single base64 key descriptor, which is the only thing a
//! viewer needs to recover the original bytes.

pub mod cipher;
pub mod descriptor;
pub mod helper;
pub mod key;

pub use cipher::{ContentCipher, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use descriptor::{KeyDescriptor, DESCRIPTOR_LEN};
pub use helper::{decrypt, encrypt, encrypt_with, EncryptedContent};
pub use key::{ContentNonce, EntropySource, SymmetricKey, SystemEntropy};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    /// The platform cannot perform the operation at all (RNG or cipher unavailable)
    #[error("Crypto failure: {0}")]
    CryptoFailure(String),

    /// The descriptor or ciphertext does not open
    #[error("Decryption failed")]
    DecryptionFailure(#[from] DecryptFailure),
}

impl CryptoError {
    /// True when the error means "wrong or corrupted key/data" rather than
    /// "crypto is unavailable"
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, CryptoError::DecryptionFailure(_))
    }
}

/// Why a decryption was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecryptFailure {
    #[error("key descriptor is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("key descriptor has wrong length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("authentication failed, wrong key or corrupted content")]
    Authentication,
}
