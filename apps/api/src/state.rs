use std::sync::Arc;

use crate::config::Config;
use crate::embedder::Embedder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable embedding backend. Default: HttpEmbedder against EMBEDDING_ENDPOINT.
    pub embedder: Arc<dyn Embedder>,
}
