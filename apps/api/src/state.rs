use std::sync::Arc;

use crate::attempts::store::AttemptStore;
use crate::config::Config;
use crate::generation::orchestrator::GenerationOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: GenerationOrchestrator,
    /// Attempt persistence. `None` when no database is configured or reachable.
    pub attempts: Option<Arc<dyn AttemptStore>>,
    pub config: Config,
}
