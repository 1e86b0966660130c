use std::sync::Arc;

use crate::config::Config;
use crate::gateway::GenerativeService;
use crate::storage::SnapshotStore;
use crate::store::sessions::SessionManager;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// One independent portfolio store per editing session.
    pub sessions: SessionManager,
    /// Generative backend behind the gateway seam; stubbed in tests.
    pub llm: Arc<dyn GenerativeService>,
    /// Publish slot the read-only view consumes.
    pub storage: Arc<dyn SnapshotStore>,
    pub config: Config,
}
