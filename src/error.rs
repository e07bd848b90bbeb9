//! Error types — key lifecycle, signing, model artifact, and trainer input.
//!
//! Signature *verification* failure is deliberately not represented here:
//! verify is a predicate returning `bool`, never an error (see
//! `signing::service`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrustError {
    /// The crypto backend could not produce a keypair. Fatal at startup —
    /// the service must not accept traffic without one.
    #[error("key generation failed: {reason}")]
    KeyGeneration { reason: String },

    /// Backend failure while producing a signature. Surfaced to the caller
    /// as a request-level error, never swallowed.
    #[error("signing failed: {reason}")]
    Signing { reason: String },

    #[error("model not found at {path}")]
    ModelNotFound { path: String },

    #[error("invalid model: {reason}")]
    InvalidModel { reason: String },

    #[error("dataset error: {reason}")]
    Dataset { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrustError>;
