use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the embedding inference service (OpenAI-style `/embeddings`).
    pub embedding_endpoint: String,
    /// Model identifier forwarded to the embedding service.
    pub embedding_model: String,
    /// Minimum fuzzy-match score (0-100) for a line to count as a section header.
    pub fuzzy_threshold: f64,
    /// Minimum cosine similarity for a skill to count as a semantic match.
    pub semantic_threshold: f32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            embedding_endpoint: require_env("EMBEDDING_ENDPOINT")?,
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "sentence-transformers/all-MiniLM-L6-v2".to_string()),
            fuzzy_threshold: std::env::var("FUZZY_THRESHOLD")
                .unwrap_or_else(|_| "80".to_string())
                .parse::<f64>()
                .context("FUZZY_THRESHOLD must be a number between 0 and 100")?,
            semantic_threshold: std::env::var("SEMANTIC_THRESHOLD")
                .unwrap_or_else(|_| "0.7".to_string())
                .parse::<f32>()
                .context("SEMANTIC_THRESHOLD must be a number between 0 and 1")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
