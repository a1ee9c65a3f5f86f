use std::sync::Arc;

use adscript_pipeline::{Orchestrator, TextGenerator};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: adscript_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Vendor client (an [`adscript_llm::LlmClient`] in production).
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    /// Orchestrator bound to this state's pool, generator and default model.
    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(
            self.pool.clone(),
            Arc::clone(&self.generator),
            self.config.default_model.clone(),
        )
    }
}
