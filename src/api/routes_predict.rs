use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;

#[derive(Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: String,
}

pub async fn predict(State(state): State<AppState>, Json(req): Json<PredictRequest>) -> Json<Value> {
    if req.text.trim().is_empty() {
        return Json(json!({ "error": "No text provided" }));
    }

    let prediction = state.classifier.predict(&req.text);
    Json(json!({
        "text": req.text,
        "prediction": prediction.label.as_str(),
        "confidence": prediction.confidence,
    }))
}
