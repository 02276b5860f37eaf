use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ProviderRouter;
use crate::scoring::ScoringOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub router: Arc<ProviderRouter>,
    pub scorer: Arc<ScoringOrchestrator>,
}

impl AppState {
    /// Wires the orchestrator to the same router the enhance/chat handlers use.
    pub fn new(config: Config, router: ProviderRouter) -> Self {
        let router = Arc::new(router);
        Self {
            config: Arc::new(config),
            scorer: Arc::new(ScoringOrchestrator::new(router.clone())),
            router,
        }
    }
}
