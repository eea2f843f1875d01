//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::content::{DocumentContent, GenerationRequest, QuizQuestion, Source};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub source: Source,
    pub content: DocumentContent,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub source: Source,
    pub questions: Vec<QuizQuestion>,
}

/// POST /api/generate
///
/// Returns document content from the provider, or the deterministic fallback.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<DocumentResponse>, AppError> {
    let Json(request) = payload?;
    info!("/generate called with title {:?}", request.title);

    let result = state.orchestrator.generate_document(&request).await?;

    Ok(Json(DocumentResponse {
        source: result.source,
        content: result.payload,
    }))
}

/// POST /api/quiz
pub async fn handle_quiz(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, AppError> {
    let Json(request) = payload?;
    info!("/quiz called with title {:?}", request.title);

    let result = state.orchestrator.generate_quiz(&request).await?;

    Ok(Json(QuizResponse {
        source: result.source,
        questions: result.payload.questions,
    }))
}
