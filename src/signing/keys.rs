//! Process keypair — one RSA-2048 keypair generated at startup.
//!
//! The keypair lives exactly as long as the process: generated once before
//! the listener binds, never written to disk, never rotated. Signatures are
//! therefore only meaningful against the public key exported by the same
//! process instance.
//!
//! Public key export uses SPKI PEM (`-----BEGIN PUBLIC KEY-----`), the
//! interchange format verifiers outside this process expect.

use rand::rngs::OsRng;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::{Result, TrustError};

/// Modulus size in bits. The public exponent is the RSA default, 65537.
/// Hard-coded on purpose: there is no rotation or multi-key story here,
/// a real deployment would front this with a KMS.
const KEY_BITS: usize = 2048;

/// Holds the process-lifetime keypair. Constructed once in `main` and shared
/// read-only from then on, so it is freely usable across request handlers
/// without locking.
pub struct KeyManager {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
    public_pem: String,
}

impl KeyManager {
    /// Generate a fresh keypair. Failure here is fatal for the process —
    /// the service must not come up without a signing key.
    pub fn generate() -> Result<Self> {
        let mut rng = OsRng;
        let private_key =
            RsaPrivateKey::new(&mut rng, KEY_BITS).map_err(|e| TrustError::KeyGeneration {
                reason: e.to_string(),
            })?;
        let public_key = RsaPublicKey::from(&private_key);

        // Rendered once so repeated exports are byte-identical.
        let public_pem =
            public_key
                .to_public_key_pem(LineEnding::LF)
                .map_err(|e| TrustError::KeyGeneration {
                    reason: format!("public key encoding failed: {e}"),
                })?;

        Ok(Self {
            private_key,
            public_key,
            public_pem,
        })
    }

    /// SPKI PEM encoding of the public key. Deterministic for the lifetime
    /// of the keypair.
    pub fn public_key_pem(&self) -> &str {
        &self.public_pem
    }

    pub(crate) fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    pub(crate) fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }
}
