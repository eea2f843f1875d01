// Document and quiz generation.
// Provider calls go through llm_client; everything here is pure except the orchestrator's single await.

pub mod fallback;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod schema;
