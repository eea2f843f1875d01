mod attempts;
mod config;
mod db;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::attempts::store::{AttemptStore, PgAttemptStore};
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::generation::orchestrator::GenerationOrchestrator;
use crate::llm_client::ProviderClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lumen API v{}", env!("CARGO_PKG_VERSION"));

    // Provider client (credential optional: absent means fallback-only)
    let provider = ProviderClient::new(config.provider())?;
    if config.gemini_api_key.is_some() {
        info!(
            "Provider configured (timeout {}ms)",
            config.provider_timeout_ms
        );
    } else {
        info!("GEMINI_API_KEY not set; all content will come from the fallback generator");
    }
    let orchestrator = GenerationOrchestrator::new(Arc::new(provider));

    // Attempt persistence (optional)
    let attempts = match config.database_url.as_deref() {
        Some(url) => connect_attempt_store(url).await,
        None => {
            info!("DATABASE_URL not set; quiz attempts will not be saved");
            None
        }
    };

    let state = AppState {
        orchestrator,
        attempts,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// A database that is configured but unreachable disables saving; it never stops startup.
async fn connect_attempt_store(database_url: &str) -> Option<Arc<dyn AttemptStore>> {
    let pool = match create_pool(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            warn!("PostgreSQL connection failed, attempts will not be saved: {e}");
            return None;
        }
    };

    if let Err(e) = ensure_schema(&pool).await {
        warn!("Could not prepare quiz_attempts table, attempts will not be saved: {e}");
        return None;
    }

    Some(Arc::new(PgAttemptStore::new(pool)))
}
