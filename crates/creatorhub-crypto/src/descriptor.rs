//! Key descriptor encoding
//!
//! A descriptor is `base64(key || nonce)` using the standard padded alphabet,
//! so 44 raw bytes always encode to 60 characters.

use crate::{ContentNonce, CryptoError, DecryptFailure, SymmetricKey, KEY_SIZE, NONCE_SIZE};
use base64::{engine::general_purpose, Engine as _};
use std::fmt;
use zeroize::Zeroize;

/// Raw length of a decoded descriptor
pub const DESCRIPTOR_LEN: usize = KEY_SIZE + NONCE_SIZE;

/// Everything needed to open one ciphertext. Has no `PartialEq`; compare
/// encoded forms instead.
#[derive(Clone)]
pub struct KeyDescriptor {
    key: SymmetricKey,
    nonce: ContentNonce,
}

impl KeyDescriptor {
    pub fn new(key: SymmetricKey, nonce: ContentNonce) -> Self {
        Self { key, nonce }
    }

    pub fn key(&self) -> &SymmetricKey {
        &self.key
    }

    pub fn nonce(&self) -> &ContentNonce {
        &self.nonce
    }

    /// Encode to the transport string
    pub fn encode(&self) -> String {
        let mut raw = [0u8; DESCRIPTOR_LEN];
        raw[..KEY_SIZE].copy_from_slice(self.key.as_bytes());
        raw[KEY_SIZE..].copy_from_slice(self.nonce.as_bytes());

        let encoded = general_purpose::STANDARD.encode(raw);
        raw.zeroize();
        encoded
    }

    /// Decode a transport string. Surrounding whitespace is ignored.
    pub fn decode(encoded: &str) -> Result<Self, CryptoError> {
        let mut raw = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| DecryptFailure::InvalidEncoding(e.to_string()))?;

        if raw.len() != DESCRIPTOR_LEN {
            let got = raw.len();
            raw.zeroize();
            return Err(DecryptFailure::InvalidLength {
                expected: DESCRIPTOR_LEN,
                got,
            }
            .into());
        }

        let mut key = [0u8; KEY_SIZE];
        let mut nonce = [0u8; NONCE_SIZE];
        key.copy_from_slice(&raw[..KEY_SIZE]);
        nonce.copy_from_slice(&raw[KEY_SIZE..]);
        raw.zeroize();

        let descriptor = Self::new(SymmetricKey::from_bytes(key), ContentNonce::from_bytes(nonce));
        key.zeroize();
        Ok(descriptor)
    }
}

impl fmt::Debug for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyDescriptor")
            .field("key", &self.key)
            .field("nonce", &"<redacted>")
            .finish()
    }
}
