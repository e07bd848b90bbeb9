use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;

#[derive(Serialize)]
pub struct PublicKeyResponse {
    pub public_key: String,
}

/// The PEM public key clients need to verify signatures out of band.
pub async fn get_public_key(State(state): State<AppState>) -> Json<PublicKeyResponse> {
    Json(PublicKeyResponse {
        public_key: state.keys.public_key_pem().to_string(),
    })
}
