// Prompt templates for document and quiz generation.
// Reuses the cross-cutting JSON-only fragment from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Document prompt template.
/// Replace: {title}, {prompt}, {json_only}
pub const DOCUMENT_PROMPT_TEMPLATE: &str = r#"Write a JSON object about the topic "{title}" with this EXACT schema:
{
  "title": "string",
  "description": "string",
  "introduction": "string",
  "sections": [
    {"heading": "string", "body": "string"}
  ]
}

Include sections: Background, Key Concepts, Use Cases, Conclusion.
Every section must have a non-empty heading and body.
Additional instructions: {prompt}

{json_only}"#;

/// Quiz prompt template.
/// Replace: {title}, {prompt}, {json_only}
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Generate 5 multiple choice questions about "{title}" as a JSON object with this EXACT schema:
{"questions":[{"q":"string","options":["","","",""],"answer":<0-3>}]}

Each question must have exactly 4 options. "answer" is the index of the correct option.
Additional instructions: {prompt}

{json_only}"#;

pub fn build_document_prompt(title: &str, prompt: Option<&str>) -> String {
    fill(DOCUMENT_PROMPT_TEMPLATE, title, prompt)
}

pub fn build_quiz_prompt(title: &str, prompt: Option<&str>) -> String {
    fill(QUIZ_PROMPT_TEMPLATE, title, prompt)
}

/// Substitutes placeholders in a single pass over the template, so caller text
/// is never rescanned for placeholders.
fn fill(template: &str, title: &str, prompt: Option<&str>) -> String {
    let values = [
        ("{title}", title),
        ("{prompt}", prompt.unwrap_or("none")),
        ("{json_only}", JSON_ONLY_INSTRUCTION),
    ];

    let mut out = String::with_capacity(template.len() + title.len());
    let mut rest = template;
    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match values.iter().find(|(key, _)| rest.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &rest[key.len()..];
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
