//! Attempt storage: trait seam plus the Postgres implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::attempt::{NewQuizAttempt, QuizAttemptRow};

/// Carried in `AppState` as `Option<Arc<dyn AttemptStore>>`; `None` disables saving.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn save(&self, attempt: NewQuizAttempt) -> Result<QuizAttemptRow, sqlx::Error>;
}

pub struct PgAttemptStore {
    pool: PgPool,
}

impl PgAttemptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptStore for PgAttemptStore {
    async fn save(&self, attempt: NewQuizAttempt) -> Result<QuizAttemptRow, sqlx::Error> {
        let questions = serde_json::Value::Array(attempt.questions);

        sqlx::query_as::<_, QuizAttemptRow>(
            r#"
            INSERT INTO quiz_attempts (id, title, questions, score)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, questions, score, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&attempt.title)
        .bind(&questions)
        .bind(attempt.score)
        .fetch_one(&self.pool)
        .await
    }
}

#[cfg(test)]
pub mod memory {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    /// In-memory store for handler tests.
    #[derive(Default)]
    pub struct MemoryAttemptStore {
        pub rows: Mutex<Vec<QuizAttemptRow>>,
    }

    #[async_trait]
    impl AttemptStore for MemoryAttemptStore {
        async fn save(&self, attempt: NewQuizAttempt) -> Result<QuizAttemptRow, sqlx::Error> {
            let row = QuizAttemptRow {
                id: Uuid::new_v4(),
                title: attempt.title,
                questions: serde_json::Value::Array(attempt.questions),
                score: attempt.score,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }
    }
}
