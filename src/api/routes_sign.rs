//! Sign and verify endpoints.
//!
//! Signatures travel as standard base64. Decoding happens here, before the
//! signature service is involved: a string that is not base64 at all is a
//! transport error with its own message, never conflated with a
//! cryptographic mismatch.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::AppState;

#[derive(Deserialize)]
pub struct SignRequest {
    /// Missing field behaves like an empty string, which signs fine.
    #[serde(default)]
    pub content: String,
}

#[derive(Serialize)]
pub struct SignResponse {
    pub content: String,
    pub signature: String,
}

pub async fn sign(State(state): State<AppState>, Json(req): Json<SignRequest>) -> Response {
    match state.signer.sign(&req.content) {
        Ok(signature) => Json(SignResponse {
            content: req.content,
            signature: B64.encode(signature),
        })
        .into_response(),
        Err(e) => {
            // Backend-level condition, not a caller mistake.
            tracing::warn!(error = %e, "signing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "signing failed" })),
            )
                .into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub signature: String,
}

pub async fn verify(State(state): State<AppState>, Json(req): Json<VerifyRequest>) -> Json<Value> {
    let signature = match B64.decode(&req.signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            return Json(json!({ "valid": false, "error": "Invalid signature encoding" }));
        }
    };

    let valid = state.signer.verify(&req.content, &signature);
    Json(json!({ "content": req.content, "valid": valid }))
}
