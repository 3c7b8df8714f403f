pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ranking::handlers;
use crate::state::AppState;

/// Uploads are capped at 20 MiB per request (a batch of PDF resumes).
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/rank", post(handlers::handle_rank))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
