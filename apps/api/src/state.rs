use std::sync::Arc;

use crate::config::Config;
use crate::notion::NotionApi;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// CMS backend. `NotionClient` in production, in-memory in tests.
    pub notion: Arc<dyn NotionApi>,
    pub config: Config,
}
