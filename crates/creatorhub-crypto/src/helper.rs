//! One-shot encrypt and decrypt of whole files
//!
//! Each call to [`encrypt`] is self-contained: it draws its own key and nonce,
//! and the returned descriptor opens only the ciphertext returned with it.

use crate::{
    ContentCipher, ContentNonce, CryptoError, EntropySource, KeyDescriptor, SymmetricKey,
    SystemEntropy,
};
use std::fmt;
use tracing::debug;

/// Output of [`encrypt`]
#[derive(Clone)]
pub struct EncryptedContent {
    /// Ciphertext with the 16-byte tag appended
    pub ciphertext: Vec<u8>,
    /// Base64 key descriptor for `ciphertext`
    pub descriptor: String,
}

impl fmt::Debug for EncryptedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedContent")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("descriptor", &"<redacted>")
            .finish()
    }
}

/// Encrypt `plaintext` under a fresh key and nonce from the system RNG
pub fn encrypt(plaintext: &[u8]) -> Result<EncryptedContent, CryptoError> {
    encrypt_with(&SystemEntropy::new(), plaintext)
}

/// Encrypt `plaintext` drawing key and nonce from `source`
pub fn encrypt_with(
    source: &dyn EntropySource,
    plaintext: &[u8],
) -> Result<EncryptedContent, CryptoError> {
    let key = SymmetricKey::generate(source)?;
    let nonce = ContentNonce::generate(source)?;

    let ciphertext = ContentCipher::new(&key).seal(&nonce, plaintext)?;
    let descriptor = KeyDescriptor::new(key, nonce).encode();

    debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "Encrypted content"
    );

    Ok(EncryptedContent {
        ciphertext,
        descriptor,
    })
}

/// Decrypt `ciphertext` with the descriptor produced alongside it
pub fn decrypt(ciphertext: &[u8], descriptor: &str) -> Result<Vec<u8>, CryptoError> {
    let descriptor = KeyDescriptor::decode(descriptor)?;
    let plaintext = ContentCipher::new(descriptor.key()).open(descriptor.nonce(), ciphertext)?;

    debug!(ciphertext_len = ciphertext.len(), "Decrypted content");
    Ok(plaintext)
}
