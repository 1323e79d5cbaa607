//! Key and nonce generation
//!
//! Both values come from the operating system CSPRNG through ring. A failing
//! source is reported as [`CryptoError::CryptoFailure`]; there is no fallback.

use crate::{CryptoError, KEY_SIZE, NONCE_SIZE};
use ring::rand::{SecureRandom, SystemRandom};
use std::fmt;
use zeroize::Zeroize;

/// Source of cryptographically secure random bytes
pub trait EntropySource: Send + Sync {
    /// Fill `dest` entirely with random bytes
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// Operating system random number generator
#[derive(Clone)]
pub struct SystemEntropy {
    rng: SystemRandom,
}

impl SystemEntropy {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for SystemEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        self.rng
            .fill(dest)
            .map_err(|_| CryptoError::CryptoFailure("System random source unavailable".to_string()))
    }
}

/// A 256-bit content key. Wiped from memory on drop. No `PartialEq`, so key
/// bytes are never compared in variable time.
#[derive(Clone)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Generate a fresh key
    pub fn generate(source: &dyn EntropySource) -> Result<Self, CryptoError> {
        let mut bytes = [0u8; KEY_SIZE];
        source.fill(&mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// A 96-bit AES-GCM nonce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentNonce([u8; NONCE_SIZE]);

impl ContentNonce {
    /// Generate a fresh random nonce
    pub fn generate(source: &dyn EntropySource) -> Result<Self, CryptoError> {
        let mut bytes = [0u8; NONCE_SIZE];
        source.fill(&mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}
