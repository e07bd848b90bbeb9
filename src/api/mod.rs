//! HTTP API for the news trust backend.
//!
//! Response shapes match the contracts the browser frontend was built
//! against: flat JSON objects, failures reported through an `error` field or
//! `valid: false` rather than bare status codes. CORS is wide open — the
//! frontend is served from a different origin and the API carries no caller
//! authentication.

pub mod routes_keys;
pub mod routes_predict;
pub mod routes_sign;
pub mod routes_status;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::classifier::Classifier;
use crate::signing::{KeyManager, SignatureService};

#[derive(Clone)]
pub struct AppState {
    pub keys: Arc<KeyManager>,
    pub signer: Arc<SignatureService>,
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(keys: KeyManager, classifier: Arc<dyn Classifier>) -> Self {
        let signer = SignatureService::new(&keys);
        Self {
            keys: Arc::new(keys),
            signer: Arc::new(signer),
            classifier,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes_status::root))
        .route("/public_key", get(routes_keys::get_public_key))
        .route("/sign", post(routes_sign::sign))
        .route("/verify", post(routes_sign::verify))
        .route("/predict", post(routes_predict::predict))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
