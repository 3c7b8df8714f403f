//! Test doubles shared across module tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::embedder::{EmbedError, Embedder};

/// Deterministic bag-of-words embedder. Each distinct token gets its own
/// dimension (assigned on first sight), vectors are L2-normalized, so texts
/// sharing tokens score high cosine similarity and disjoint texts score 0.
pub struct StubEmbedder {
    dim: usize,
    slots: Mutex<HashMap<String, usize>>,
}

impl StubEmbedder {
    pub fn new() -> Self {
        Self {
            dim: 512,
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut slots = self.slots.lock().expect("stub embedder lock");
        let mut vector = vec![0.0f32; self.dim];
        for token in text.split_whitespace() {
            let next = slots.len();
            let slot = *slots.entry(token.to_string()).or_insert(next);
            vector[slot % self.dim] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        Ok(vector)
    }
}
