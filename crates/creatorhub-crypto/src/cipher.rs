//! AES-256-GCM content cipher
//!
//! Thin wrapper over the `aes-gcm` crate. Content is sealed without
//! associated data; the 16-byte tag is appended to the ciphertext.

use crate::{ContentNonce, CryptoError, DecryptFailure, SymmetricKey};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};

/// Size of an AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of the AES-GCM nonce in bytes
pub const NONCE_SIZE: usize = 12;

/// Size of the authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// AES-256-GCM cipher bound to one content key
pub struct ContentCipher {
    cipher: Aes256Gcm,
}

impl ContentCipher {
    /// Create a cipher for the given key
    pub fn new(key: &SymmetricKey) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Encrypt `plaintext`, returning ciphertext with the tag appended
    pub fn seal(&self, nonce: &ContentNonce, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = Nonce::from_slice(nonce.as_bytes());
        self.cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CryptoError::CryptoFailure("AES-GCM encryption failed".to_string()))
    }

    /// Verify and decrypt `ciphertext`. Nothing is returned unless the tag checks out.
    pub fn open(&self, nonce: &ContentNonce, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = Nonce::from_slice(nonce.as_bytes());
        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| DecryptFailure::Authentication.into())
    }
}
