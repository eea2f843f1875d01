//! Schema validation: coerces raw provider JSON into `DocumentContent` / `Quiz`.
//!
//! Repair policy:
//! - Document scalars (`title`, `description`, `introduction`) coerce to strings;
//!   missing or null becomes `""`.
//! - Quiz entries that fail the per-entry rules are dropped; the quiz is rejected
//!   only when none survive.
//! - `correctIndex` resolves from `correctIndex`, then `answer` (first present,
//!   non-null). Anything outside 0..=3 or non-numeric becomes 0.
//!
//! Every repair is deterministic and idempotent: validating a serialized
//! validated value yields the same value.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::content::{DocumentContent, Quiz, QuizQuestion, Section};

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("sections are missing or empty")]
    MissingSections,

    #[error("section {index} lacks a non-empty heading and body")]
    InvalidSection { index: usize },

    #[error("questions are missing or not a list")]
    MissingQuestions,

    #[error("no question passed validation")]
    NoValidQuestions,
}

pub fn validate_document(candidate: &Value) -> Result<DocumentContent, SchemaError> {
    let object = as_object(candidate)?;

    let sections = match object.get("sections") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(SchemaError::MissingSections),
    };

    let sections = sections
        .iter()
        .enumerate()
        .map(|(index, item)| {
            validate_section(item).ok_or(SchemaError::InvalidSection { index })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DocumentContent {
        title: string_field(object, "title"),
        description: string_field(object, "description"),
        introduction: string_field(object, "introduction"),
        sections,
    })
}

pub fn validate_quiz(candidate: &Value) -> Result<Quiz, SchemaError> {
    let object = as_object(candidate)?;

    let entries = match object.get("questions") {
        Some(Value::Array(items)) => items,
        _ => return Err(SchemaError::MissingQuestions),
    };

    let questions: Vec<QuizQuestion> = entries.iter().filter_map(validate_question).collect();

    if questions.is_empty() {
        return Err(SchemaError::NoValidQuestions);
    }

    Ok(Quiz { questions })
}

fn validate_section(item: &Value) -> Option<Section> {
    let object = item.as_object()?;
    let heading = coerce_string(object.get("heading")?)?;
    let body = coerce_string(object.get("body")?)?;

    if heading.trim().is_empty() || body.trim().is_empty() {
        return None;
    }

    Some(Section { heading, body })
}

fn validate_question(item: &Value) -> Option<QuizQuestion> {
    let object = item.as_object()?;

    let q = coerce_string(object.get("q")?)?;
    if q.trim().is_empty() {
        return None;
    }

    let options = match object.get("options")? {
        Value::Array(items) if items.len() == OPTIONS_PER_QUESTION => items
            .iter()
            .map(coerce_string)
            .collect::<Option<Vec<String>>>()?,
        _ => return None,
    };
    let options: [String; OPTIONS_PER_QUESTION] = options.try_into().ok()?;

    Some(QuizQuestion {
        q,
        options,
        correct_index: resolve_correct_index(object),
    })
}

/// First present, non-null of `correctIndex` then `answer`, normalized into 0..=3.
fn resolve_correct_index(object: &Map<String, Value>) -> u8 {
    let raw = ["correctIndex", "answer"]
        .iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null());

    raw.and_then(index_from_value)
        .filter(|index| *index < OPTIONS_PER_QUESTION as i64)
        .map(|index| index as u8)
        .unwrap_or(0)
}

fn index_from_value(value: &Value) -> Option<i64> {
    let index = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    index.filter(|index| *index >= 0)
}

fn as_object(candidate: &Value) -> Result<&Map<String, Value>, SchemaError> {
    candidate
        .as_object()
        .ok_or_else(|| SchemaError::NotAnObject(type_name(candidate)))
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object.get(key).and_then(coerce_string).unwrap_or_default()
}

/// Scalars coerce to their text; null becomes empty. Containers do not coerce.
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(index: Value) -> Value {
        json!({ "q": "Q", "options": ["a", "b", "c", "d"], "correctIndex": index })
    }

    fn first_index(candidate: Value) -> u8 {
        validate_quiz(&json!({ "questions": [candidate] })).unwrap().questions[0].correct_index
    }

    #[test]
    fn test_document_missing_scalars_become_empty() {
        let doc = validate_document(&json!({
            "sections": [{ "heading": "Background", "body": "Text" }]
        }))
        .unwrap();
        assert_eq!(doc.title, "");
        assert_eq!(doc.description, "");
        assert_eq!(doc.introduction, "");
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn test_document_numeric_title_coerces() {
        let doc = validate_document(&json!({
            "title": 1984,
            "sections": [{ "heading": "H", "body": "B" }]
        }))
        .unwrap();
        assert_eq!(doc.title, "1984");
    }

    #[test]
    fn test_document_requires_sections() {
        assert_eq!(
            validate_document(&json!({ "title": "T" })),
            Err(SchemaError::MissingSections)
        );
        assert_eq!(
            validate_document(&json!({ "title": "T", "sections": [] })),
            Err(SchemaError::MissingSections)
        );
        assert_eq!(
            validate_document(&json!({ "sections": "Background" })),
            Err(SchemaError::MissingSections)
        );
    }

    #[test]
    fn test_document_rejects_blank_section() {
        let result = validate_document(&json!({
            "sections": [
                { "heading": "Background", "body": "Text" },
                { "heading": "  ", "body": "Text" }
            ]
        }));
        assert_eq!(result, Err(SchemaError::InvalidSection { index: 1 }));
    }

    #[test]
    fn test_document_rejects_non_object() {
        assert_eq!(
            validate_document(&json!(["not", "an", "object"])),
            Err(SchemaError::NotAnObject("array"))
        );
    }

    #[test]
    fn test_quiz_answer_field_is_accepted() {
        assert_eq!(
            first_index(json!({ "q": "Q", "options": ["a", "b", "c", "d"], "answer": 2 })),
            2
        );
    }

    #[test]
    fn test_quiz_correct_index_takes_precedence_over_answer() {
        assert_eq!(
            first_index(json!({
                "q": "Q", "options": ["a", "b", "c", "d"], "correctIndex": 1, "answer": 3
            })),
            1
        );
    }

    #[test]
    fn test_quiz_null_correct_index_falls_through_to_answer() {
        assert_eq!(
            first_index(json!({
                "q": "Q", "options": ["a", "b", "c", "d"], "correctIndex": null, "answer": 3
            })),
            3
        );
    }

    #[test]
    fn test_quiz_out_of_range_index_becomes_zero() {
        assert_eq!(first_index(question(json!(7))), 0);
        assert_eq!(first_index(question(json!(-1))), 0);
        assert_eq!(first_index(question(json!("two"))), 0);
        assert_eq!(first_index(question(json!(1.5))), 0);
        assert_eq!(first_index(question(json!([1]))), 0);
    }

    #[test]
    fn test_quiz_numeric_string_and_integral_float_are_kept() {
        assert_eq!(first_index(question(json!("3"))), 3);
        assert_eq!(first_index(question(json!(2.0))), 2);
    }

    #[test]
    fn test_quiz_missing_index_becomes_zero() {
        assert_eq!(
            first_index(json!({ "q": "Q", "options": ["a", "b", "c", "d"] })),
            0
        );
    }

    #[test]
    fn test_quiz_drops_malformed_entries() {
        let quiz = validate_quiz(&json!({
            "questions": [
                { "q": "ok", "options": ["a", "b", "c", "d"], "answer": 1 },
                { "q": "three options", "options": ["a", "b", "c"] },
                { "q": "", "options": ["a", "b", "c", "d"] },
                { "options": ["a", "b", "c", "d"] },
                { "q": "nested", "options": ["a", ["b"], "c", "d"] },
                "not an object"
            ]
        }))
        .unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].q, "ok");
    }

    #[test]
    fn test_quiz_with_no_valid_entries_fails() {
        assert_eq!(
            validate_quiz(&json!({ "questions": [{ "q": "x", "options": [] }] })),
            Err(SchemaError::NoValidQuestions)
        );
        assert_eq!(
            validate_quiz(&json!({ "questions": [] })),
            Err(SchemaError::NoValidQuestions)
        );
        assert_eq!(validate_quiz(&json!({})), Err(SchemaError::MissingQuestions));
    }

    #[test]
    fn test_quiz_repair_is_idempotent() {
        let inputs = [
            json!({ "questions": [
                { "q": "Q1", "options": ["a", "b", "c", "d"], "correctIndex": 7 },
                { "q": "Q2", "options": [1, 2, 3, true], "answer": "2" },
                { "q": "Q3", "options": ["a", "b"] }
            ]}),
            json!({ "questions": [
                { "q": "Q1", "options": ["a", "b", "c", null], "answer": 3 }
            ]}),
        ];

        for input in inputs {
            let once = validate_quiz(&input).unwrap();
            let twice = validate_quiz(&serde_json::to_value(&once).unwrap()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_document_repair_is_idempotent() {
        let input = json!({
            "title": true,
            "introduction": null,
            "sections": [{ "heading": "H", "body": 42 }]
        });
        let once = validate_document(&input).unwrap();
        let twice = validate_document(&serde_json::to_value(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }
}
