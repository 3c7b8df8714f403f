//! HTTP embedding backend speaking the OpenAI-style `/embeddings` protocol
//! (as served by text-embeddings-inference and compatible model servers).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{EmbedError, Embedder};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Embedder backed by an external inference service.
/// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    endpoint: String,
    model: String,
}

impl HttpEmbedder {
    pub fn new(endpoint: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            model,
        }
    }

    async fn call(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let request_body = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let mut attempt = 0;
        loop {
            let response = self
                .client
                .post(&self.endpoint)
                .json(&request_body)
                .send()
                .await?;

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                attempt += 1;
                if attempt >= MAX_RETRIES {
                    return Err(EmbedError::Api {
                        status: status.as_u16(),
                        message: format!("gave up after {MAX_RETRIES} retries"),
                    });
                }
                let backoff = std::time::Duration::from_millis(500 * 2u64.pow(attempt));
                warn!("Embedding service returned {status}, retrying in {backoff:?}");
                tokio::time::sleep(backoff).await;
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(EmbedError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: EmbeddingResponse = response.json().await?;
            debug!("Embedded {} chars", text.len());
            return parsed
                .data
                .into_iter()
                .next()
                .map(|d| d.embedding)
                .ok_or(EmbedError::EmptyResponse);
        }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        self.call(text).await
    }
}
