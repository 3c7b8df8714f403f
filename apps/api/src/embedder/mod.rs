//! Embedding client — the single point of entry for dense-vector inference.
//!
//! ARCHITECTURAL RULE: No other module may call an embedding service directly.
//! Scorers receive an `Arc<dyn Embedder>` and stay oblivious to the backend,
//! which keeps them testable with deterministic fixed vectors.

use async_trait::async_trait;
use thiserror::Error;

pub mod http;

pub use http::HttpEmbedder;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("embedding service returned no vector")]
    EmptyResponse,
}

/// Maps a text to a fixed-length dense vector. Deterministic for a given
/// backend model and input.
///
/// Carried in `AppState` as `Arc<dyn Embedder>`.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
}
