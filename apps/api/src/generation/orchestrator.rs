//! Generation orchestrator: decides between provider output and fallback.
//!
//! Flow per request: check title → (credential present?) provider fetch →
//! schema validation → provider result, or fallback synthesis on any failure.
//!
//! Provider and schema failures never escape this module. The only error a
//! caller can see is a missing title.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::fallback::{synthesize_document, synthesize_quiz};
use crate::generation::schema::{validate_document, validate_quiz, SchemaError};
use crate::llm_client::{GenerativeProvider, ProviderError};
use crate::models::content::{DocumentContent, GenerationRequest, GenerationResult, Quiz};

#[derive(Clone)]
pub struct GenerationOrchestrator {
    provider: Arc<dyn GenerativeProvider>,
}

impl GenerationOrchestrator {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self { provider }
    }

    pub async fn generate_document(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult<DocumentContent>, AppError> {
        let (title, prompt) = unpack(request)?;

        let attempt = if self.provider.is_configured() {
            Some(self.provider.fetch_document(title, prompt).await)
        } else {
            None
        };

        Ok(match accept("document", title, attempt, validate_document) {
            Some(content) => GenerationResult::provider(content),
            None => GenerationResult::fallback(synthesize_document(title, prompt)),
        })
    }

    pub async fn generate_quiz(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult<Quiz>, AppError> {
        let (title, prompt) = unpack(request)?;

        let attempt = if self.provider.is_configured() {
            Some(self.provider.fetch_quiz(title, prompt).await)
        } else {
            None
        };

        Ok(match accept("quiz", title, attempt, validate_quiz) {
            Some(quiz) => GenerationResult::provider(quiz),
            None => GenerationResult::fallback(synthesize_quiz(title)),
        })
    }
}

/// Title is required and checked before any other work. A blank prompt counts as absent.
fn unpack(request: &GenerationRequest) -> Result<(&str, Option<&str>), AppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    let prompt = request
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    Ok((title, prompt))
}

/// Returns the validated provider payload, or `None` when the request must fall back.
/// `attempt` is `None` when no credential is configured.
fn accept<T>(
    kind: &str,
    title: &str,
    attempt: Option<Result<Value, ProviderError>>,
    validate: fn(&Value) -> Result<T, SchemaError>,
) -> Option<T> {
    let raw = match attempt {
        None => {
            info!("No provider credential; serving fallback {kind} for {title:?}");
            return None;
        }
        Some(Err(e)) => {
            warn!(
                reason = %e.reason,
                "Provider {kind} call failed, using fallback: {}",
                e.detail
            );
            return None;
        }
        Some(Ok(raw)) => raw,
    };

    match validate(&raw) {
        Ok(payload) => {
            info!("Serving provider {kind} for {title:?}");
            Some(payload)
        }
        Err(e) => {
            warn!("Provider {kind} failed schema validation, using fallback: {e}");
            None
        }
    }
}
