pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::attempts::handlers as attempts;
use crate::generation::handlers as generation;
use crate::state::AppState;

/// Inbound JSON bodies are small; quiz attempts are the largest.
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/generate", post(generation::handle_generate))
        .route("/api/quiz", post(generation::handle_quiz))
        .route("/api/saveAttempt", post(attempts::handle_save_attempt))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
