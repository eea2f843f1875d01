use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted quiz attempt. `questions` is stored as submitted by the client
/// (question, options, correctIndex, chosenIndex).
#[derive(Debug, Clone, FromRow)]
pub struct QuizAttemptRow {
    pub id: Uuid,
    pub title: String,
    pub questions: Value,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuizAttempt {
    pub title: String,
    pub questions: Vec<Value>,
    pub score: f64,
}
