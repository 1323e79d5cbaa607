//! Error handling tests for creatorhub-crypto

use creatorhub_crypto::{
    decrypt, encrypt, encrypt_with, CryptoError, DecryptFailure, EntropySource,
};
use std::sync::atomic::{AtomicUsize, Ordering};

struct BrokenEntropy;

impl EntropySource for BrokenEntropy {
    fn fill(&self, _dest: &mut [u8]) -> Result<(), CryptoError> {
        Err(CryptoError::CryptoFailure("entropy unavailable".to_string()))
    }
}

/// Succeeds for the first `ok_calls` requests, then fails
struct FlakyEntropy {
    ok_calls: usize,
    calls: AtomicUsize,
}

impl EntropySource for FlakyEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.ok_calls {
            return Err(CryptoError::CryptoFailure("entropy exhausted".to_string()));
        }
        dest.fill(0x5A);
        Ok(())
    }
}

#[test]
fn test_unavailable_rng_is_crypto_failure() {
    let result = encrypt_with(&BrokenEntropy, b"secret");
    let err = result.unwrap_err();
    assert!(matches!(err, CryptoError::CryptoFailure(_)));
    assert!(!err.is_decryption_failure());
}

#[test]
fn test_rng_failing_on_nonce_is_crypto_failure() {
    let source = FlakyEntropy {
        ok_calls: 1,
        calls: AtomicUsize::new(0),
    };
    let result = encrypt_with(&source, b"secret");
    assert!(matches!(result, Err(CryptoError::CryptoFailure(_))));
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_unrelated_descriptor_is_rejected() {
    let a = encrypt(b"content A").unwrap();
    let b = encrypt(b"content A").unwrap();

    let result = decrypt(&a.ciphertext, &b.descriptor);
    assert!(matches!(
        result,
        Err(CryptoError::DecryptionFailure(DecryptFailure::Authentication))
    ));
}

#[test]
fn test_any_flipped_byte_is_rejected() {
    let sealed = encrypt(&[1, 2, 3, 4, 5]).unwrap();

    for i in 0..sealed.ciphertext.len() {
        let mut tampered = sealed.ciphertext.clone();
        tampered[i] ^= 0x01;
        let result = decrypt(&tampered, &sealed.descriptor);
        assert!(
            matches!(result, Err(CryptoError::DecryptionFailure(_))),
            "flip at byte {i} was accepted"
        );
    }
}

#[test]
fn test_truncated_ciphertext_is_rejected() {
    let sealed = encrypt(b"some media bytes").unwrap();
    let cut = &sealed.ciphertext[..sealed.ciphertext.len() - 1];
    assert!(decrypt(cut, &sealed.descriptor).unwrap_err().is_decryption_failure());
    assert!(decrypt(&[], &sealed.descriptor).unwrap_err().is_decryption_failure());
}

#[test]
fn test_truncated_descriptor_is_rejected() {
    let sealed = encrypt(b"data").unwrap();

    // Whole quantum removed: still valid base64, but too short
    let short = &sealed.descriptor[..40];
    assert!(matches!(
        decrypt(&sealed.ciphertext, short),
        Err(CryptoError::DecryptionFailure(DecryptFailure::InvalidLength { got: 30, .. }))
    ));

    // Partial quantum: no longer valid base64
    let ragged = &sealed.descriptor[..59];
    assert!(matches!(
        decrypt(&sealed.ciphertext, ragged),
        Err(CryptoError::DecryptionFailure(DecryptFailure::InvalidEncoding(_)))
    ));
}

#[test]
fn test_non_base64_descriptor_is_rejected() {
    let sealed = encrypt(b"data").unwrap();

    for bad in ["not base64 at all!", "****", "\u{1F980}"] {
        let result = decrypt(&sealed.ciphertext, bad);
        assert!(
            matches!(
                result,
                Err(CryptoError::DecryptionFailure(DecryptFailure::InvalidEncoding(_)))
            ),
            "{bad:?} was accepted"
        );
    }
}

#[test]
fn test_empty_descriptor_is_rejected() {
    let sealed = encrypt(b"data").unwrap();
    let result = decrypt(&sealed.ciphertext, "");
    assert!(matches!(
        result,
        Err(CryptoError::DecryptionFailure(DecryptFailure::InvalidLength { got: 0, .. }))
    ));
}

#[test]
fn test_error_messages_are_distinct() {
    let crypto = CryptoError::CryptoFailure("rng".to_string()).to_string();
    let decrypt = CryptoError::from(DecryptFailure::Authentication).to_string();
    assert!(crypto.starts_with("Crypto failure"));
    assert!(decrypt.starts_with("Decryption failed"));
}

#[test]
fn test_decryption_reason_is_reported_once() {
    use std::error::Error as _;

    let err = CryptoError::from(DecryptFailure::Authentication);
    assert_eq!(err.to_string(), "Decryption failed");
    assert_eq!(
        err.source().map(|s| s.to_string()).as_deref(),
        Some("authentication failed, wrong key or corrupted content")
    );
}
