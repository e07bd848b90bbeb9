//! Content sign/verify over the process keypair.
//!
//! Scheme: PKCS#1 v1.5 padding over a SHA-256 digest of the UTF-8 content
//! bytes. Deterministic — the same content and key always produce the same
//! signature bytes.
//!
//! `verify` is a predicate, not a diagnostic: every failure mode (malformed
//! signature bytes, wrong length, digest mismatch, wrong key) normalizes to
//! `false` and the call never errors. Callers that want to distinguish
//! transport problems (e.g. bad base64) must do so before calling in.

use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer, Verifier};

use crate::error::{Result, TrustError};
use crate::signing::keys::KeyManager;

pub struct SignatureService {
    signing_key: SigningKey<Sha256>,
    verifying_key: VerifyingKey<Sha256>,
}

impl SignatureService {
    pub fn new(keys: &KeyManager) -> Self {
        Self {
            signing_key: SigningKey::new(keys.private_key().clone()),
            verifying_key: VerifyingKey::new(keys.public_key().clone()),
        }
    }

    /// Sign the UTF-8 bytes of `content`, returning raw signature bytes.
    /// Base64 encoding for transport is the HTTP boundary's job.
    pub fn sign(&self, content: &str) -> Result<Vec<u8>> {
        let signature = self
            .signing_key
            .try_sign(content.as_bytes())
            .map_err(|e| TrustError::Signing {
                reason: e.to_string(),
            })?;
        Ok(signature.to_vec())
    }

    /// Check `signature` against `content` and the process public key.
    /// Returns `true` only on an exact cryptographic match.
    pub fn verify(&self, content: &str, signature: &[u8]) -> bool {
        // Two failure modes, each normalized to false: bytes that do not
        // parse as a signature for this key size, and a padding/digest
        // mismatch on an otherwise well-formed signature.
        let signature = match Signature::try_from(signature) {
            Ok(s) => s,
            Err(_) => return false,
        };
        self.verifying_key
            .verify(content.as_bytes(), &signature)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SignatureService {
        let keys = KeyManager::generate().unwrap();
        SignatureService::new(&keys)
    }

    #[test]
    fn sign_and_verify() {
        let svc = service();
        let sig = svc.sign("hello world").unwrap();
        assert!(svc.verify("hello world", &sig));
    }

    #[test]
    fn verify_rejects_modified_content() {
        let svc = service();
        let sig = svc.sign("hello world").unwrap();
        assert!(!svc.verify("HELLO WORLD", &sig));
    }

    #[test]
    fn verify_rejects_flipped_byte() {
        let svc = service();
        let mut sig = svc.sign("hello world").unwrap();
        let last = sig.len() - 1;
        sig[last] ^= 0x01;
        assert!(!svc.verify("hello world", &sig));
    }

    #[test]
    fn verify_rejects_truncated_and_empty() {
        let svc = service();
        let sig = svc.sign("payload").unwrap();

        assert!(!svc.verify("payload", &sig[..sig.len() / 2]));
        assert!(!svc.verify("payload", &[]));
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let alice = service();
        let bob = service();
        let sig = alice.sign("data").unwrap();
        assert!(!bob.verify("data", &sig));
    }

    #[test]
    fn signing_is_deterministic() {
        let svc = service();
        let a = svc.sign("same input").unwrap();
        let b = svc.sign("same input").unwrap();
        assert_eq!(a, b);
    }
}
