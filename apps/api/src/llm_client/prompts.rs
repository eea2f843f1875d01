// Shared prompt fragments. Endpoint-specific templates live in generation::prompts.

/// Appended to every instruction. The provider has no system role here, so the
/// JSON-only rule travels inside the user text.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY a single valid JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or apologies.";
