use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and whether provider/persistence are wired up.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "lumen-api",
        "provider_configured": state.config.gemini_api_key.is_some(),
        "attempts_enabled": state.attempts.is_some()
    }))
}
