use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Inbound body for both generation endpoints.
///
/// A missing, null or non-string `title` decodes as empty so it surfaces as a
/// validation error instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationRequest {
    #[serde(default, deserialize_with = "text_or_blank")]
    pub title: String,
    #[serde(default)]
    pub prompt: Option<String>,
}

fn text_or_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

/// Long-form document content. `sections` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContent {
    pub title: String,
    pub description: String,
    pub introduction: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub q: String,
    pub options: [String; 4],
    /// Always within 0..=3.
    #[serde(rename = "correctIndex")]
    pub correct_index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

/// Provenance of a generated payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Provider,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult<T> {
    pub source: Source,
    pub payload: T,
}

impl<T> GenerationResult<T> {
    pub fn provider(payload: T) -> Self {
        Self {
            source: Source::Provider,
            payload,
        }
    }

    pub fn fallback(payload: T) -> Self {
        Self {
            source: Source::Fallback,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Source::Provider).unwrap(), r#""provider""#);
        assert_eq!(serde_json::to_string(&Source::Fallback).unwrap(), r#""fallback""#);
    }

    #[test]
    fn test_quiz_question_uses_camel_case_index() {
        let question = QuizQuestion {
            q: "Q1".to_string(),
            options: ["a", "b", "c", "d"].map(String::from),
            correct_index: 2,
        };
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["correctIndex"], 2);
        assert!(value.get("correct_index").is_none());
    }

    #[test]
    fn test_generation_request_null_or_non_string_title_is_empty() {
        for body in [r#"{"title":null}"#, r#"{"title":42}"#, r#"{"title":["a"]}"#] {
            let request: GenerationRequest = serde_json::from_str(body).unwrap();
            assert!(request.title.is_empty(), "expected blank title for {body}");
        }
    }

    #[test]
    fn test_generation_request_missing_title_is_empty() {
        let request: GenerationRequest = serde_json::from_str(r#"{"prompt":"x"}"#).unwrap();
        assert!(request.title.is_empty());
        assert_eq!(request.prompt.as_deref(), Some("x"));
    }
}
