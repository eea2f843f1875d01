//! Provider client: the single point of entry for all generative-language calls.
//!
//! ARCHITECTURAL RULE: No other module may call the provider API directly.
//! All provider interactions go through `GenerativeProvider`.
//!
//! One attempt per call. The client returns the raw parsed JSON object and
//! leaves shape validation to `generation::schema`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::generation::prompts::{build_document_prompt, build_quiz_prompt};

pub mod prompts;

/// Longest slice of a provider error body kept in error details.
const ERROR_BODY_PREVIEW: usize = 200;

/// Immutable provider settings, injected at construction.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub timeout: Duration,
}

/// Why a provider attempt produced nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFailure {
    NotConfigured,
    HttpError,
    Timeout,
    EmptyResponse,
    UnparseableResponse,
}

impl ProviderFailure {
    pub fn code(self) -> &'static str {
        match self {
            ProviderFailure::NotConfigured => "not_configured",
            ProviderFailure::HttpError => "http_error",
            ProviderFailure::Timeout => "timeout",
            ProviderFailure::EmptyResponse => "empty_response",
            ProviderFailure::UnparseableResponse => "unparseable_response",
        }
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error)]
#[error("{reason}: {detail}")]
pub struct ProviderError {
    pub reason: ProviderFailure,
    pub detail: String,
}

impl ProviderError {
    pub fn new(reason: ProviderFailure, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }

    /// Classifies a transport error. The URL is stripped because it carries the credential.
    fn from_transport(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            ProviderFailure::Timeout
        } else {
            ProviderFailure::HttpError
        };
        Self::new(reason, err.without_url().to_string())
    }
}

/// The seam the orchestrator depends on. `ProviderClient` is the HTTP
/// implementation; tests substitute scripted providers.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Whether a credential is present. Checked before any network attempt.
    fn is_configured(&self) -> bool;

    async fn fetch_document(&self, title: &str, prompt: Option<&str>)
        -> Result<Value, ProviderError>;

    async fn fetch_quiz(&self, title: &str, prompt: Option<&str>) -> Result<Value, ProviderError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Reply envelope. Every level is optional; a missing level means "no text".
#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if any.
    fn text(&self) -> Option<&str> {
        self.candidates
            .as_deref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_deref()?
            .first()?
            .text
            .as_deref()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// HTTP client for the generative-language endpoint.
/// Holds only immutable configuration, so one instance serves all requests.
#[derive(Clone)]
pub struct ProviderClient {
    client: Client,
    config: ProviderConfig,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            config,
        })
    }

    /// Sends one instruction and returns the JSON object embedded in the reply.
    pub async fn generate(&self, instruction: &str) -> Result<Value, ProviderError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            ProviderError::new(ProviderFailure::NotConfigured, "no provider credential")
        })?;

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: instruction }],
            }],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
            return Err(ProviderError::new(
                ProviderFailure::HttpError,
                format!("status {}: {}", status.as_u16(), preview),
            ));
        }

        let raw = response
            .text()
            .await
            .map_err(ProviderError::from_transport)?;

        let envelope: GenerateContentResponse = serde_json::from_str(&raw).unwrap_or_default();
        let text = envelope
            .text()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::new(ProviderFailure::EmptyResponse, "reply carried no text")
            })?;

        debug!("Provider replied with {} chars of text", text.len());

        parse_json_reply(text)
    }
}

#[async_trait]
impl GenerativeProvider for ProviderClient {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn fetch_document(
        &self,
        title: &str,
        prompt: Option<&str>,
    ) -> Result<Value, ProviderError> {
        self.generate(&build_document_prompt(title, prompt)).await
    }

    async fn fetch_quiz(&self, title: &str, prompt: Option<&str>) -> Result<Value, ProviderError> {
        self.generate(&build_quiz_prompt(title, prompt)).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Reply parsing
// ────────────────────────────────────────────────────────────────────────────

/// Locates the candidate JSON object in free text: from the first `{` to the
/// last `}`. Commentary and code fences around it are discarded.
pub fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Two-stage parse: span extraction, then JSON decoding.
pub fn parse_json_reply(text: &str) -> Result<Value, ProviderError> {
    let span = extract_json_span(text).ok_or_else(|| {
        ProviderError::new(
            ProviderFailure::UnparseableResponse,
            "no JSON object in reply",
        )
    })?;

    serde_json::from_str(span)
        .map_err(|e| ProviderError::new(ProviderFailure::UnparseableResponse, e.to_string()))
}
