use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::attempt::NewQuizAttempt;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SaveAttemptRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<Value>>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SaveAttemptResponse {
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/saveAttempt
///
/// Persists a scored attempt when a store is configured; otherwise reports
/// `saved: false` without failing.
pub async fn handle_save_attempt(
    State(state): State<AppState>,
    payload: Result<Json<SaveAttemptRequest>, JsonRejection>,
) -> Result<Json<SaveAttemptResponse>, AppError> {
    let Json(request) = payload?;
    let attempt = validate_attempt(request)?;

    let Some(store) = state.attempts.as_ref() else {
        return Ok(Json(SaveAttemptResponse {
            saved: false,
            id: None,
            message: Some("No attempt store configured. Skipping save.".to_string()),
        }));
    };

    let row = store.save(attempt).await?;
    info!(
        "Saved quiz attempt {} for {:?}: score {} over {} questions at {}",
        row.id,
        row.title,
        row.score,
        row.questions.as_array().map_or(0, Vec::len),
        row.created_at
    );

    Ok(Json(SaveAttemptResponse {
        saved: true,
        id: Some(row.id),
        message: None,
    }))
}

fn validate_attempt(request: SaveAttemptRequest) -> Result<NewQuizAttempt, AppError> {
    let missing = || AppError::Validation("title, questions and score are required".to_string());

    let title = request
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(missing)?;
    let questions = request.questions.ok_or_else(missing)?;
    let score = request.score.ok_or_else(missing)?;

    Ok(NewQuizAttempt {
        title,
        questions,
        score,
    })
}
