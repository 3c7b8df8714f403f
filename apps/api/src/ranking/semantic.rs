//! Semantic ranking: dense-embedding cosine similarity with chunk-and-average
//! handling for long documents.
//!
//! Long resumes are split into fixed-size token windows, each window embedded
//! independently, and the document vector is the arithmetic mean of its window
//! vectors. The job description is embedded as a single window.

use std::cmp::Ordering;

use crate::embedder::{EmbedError, Embedder};
use crate::preprocess::TextNormalizer;

/// Embedding-model window size in whitespace tokens.
pub const WINDOW_TOKENS: usize = 512;

/// Tokens reserved for the model's special tokens; the effective window
/// stride is `WINDOW_TOKENS - WINDOW_MARGIN`.
const WINDOW_MARGIN: usize = 50;

/// Splits text into non-overlapping windows by advancing a cursor across the
/// whitespace-tokenized document. Empty text yields no windows.
pub fn chunk_text(text: &str, window_tokens: usize) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let stride = window_tokens.saturating_sub(WINDOW_MARGIN).max(1);

    let mut windows = Vec::new();
    let mut cursor = 0;
    while cursor < tokens.len() {
        let end = (cursor + stride).min(tokens.len());
        windows.push(tokens[cursor..end].join(" "));
        cursor = end;
    }
    windows
}

pub struct SemanticRanker {
    normalizer: TextNormalizer,
}

impl Default for SemanticRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticRanker {
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
        }
    }

    /// Embeds a query as a single window.
    pub async fn embed_query(
        &self,
        embedder: &dyn Embedder,
        text: &str,
    ) -> Result<Vec<f32>, EmbedError> {
        embedder.embed(&self.normalizer.clean_embedding(text)).await
    }

    /// Embeds a document with chunk-and-average: each window embedded
    /// independently, mean-pooled into one vector. A document with no tokens
    /// yields an empty vector (cosine against it is 0).
    pub async fn embed_document(
        &self,
        embedder: &dyn Embedder,
        text: &str,
    ) -> Result<Vec<f32>, EmbedError> {
        let cleaned = self.normalizer.clean_embedding(text);
        let windows = chunk_text(&cleaned, WINDOW_TOKENS);
        if windows.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(windows.len());
        for window in &windows {
            vectors.push(embedder.embed(window).await?);
        }
        Ok(mean_pool(&vectors))
    }

    /// Ranks resumes by cosine similarity between the job-description
    /// embedding and each resume's mean-pooled embedding, descending.
    pub async fn rank(
        &self,
        embedder: &dyn Embedder,
        job_description: &str,
        resumes: &[(String, String)],
    ) -> Result<Vec<(String, f32)>, EmbedError> {
        let jd_embedding = self.embed_query(embedder, job_description).await?;

        let mut ranked = Vec::with_capacity(resumes.len());
        for (name, text) in resumes {
            let doc_embedding = self.embed_document(embedder, text).await?;
            ranked.push((name.clone(), cosine_similarity(&jd_embedding, &doc_embedding)));
        }

        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Ok(ranked)
    }
}

/// Cosine similarity. Mathematically in [-1, 1]; callers must not assume
/// non-negativity. Zero when either vector is empty or zero-length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Arithmetic mean of window vectors.
fn mean_pool(vectors: &[Vec<f32>]) -> Vec<f32> {
    let dim = vectors.first().map(Vec::len).unwrap_or(0);
    let mut pooled = vec![0.0f32; dim];
    for vector in vectors {
        for (sum, value) in pooled.iter_mut().zip(vector) {
            *sum += value;
        }
    }
    let count = vectors.len() as f32;
    for value in &mut pooled {
        *value /= count;
    }
    pooled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StubEmbedder;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_chunking_strides_by_window_minus_margin() {
        let windows = chunk_text(&words(1000), WINDOW_TOKENS);
        // 1000 tokens at stride 462: 462 + 462 + 76
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].split_whitespace().count(), 462);
        assert_eq!(windows[1].split_whitespace().count(), 462);
        assert_eq!(windows[2].split_whitespace().count(), 76);
    }

    #[test]
    fn test_short_text_is_a_single_window() {
        let windows = chunk_text("rust developer", WINDOW_TOKENS);
        assert_eq!(windows, vec!["rust developer".to_string()]);
    }

    #[test]
    fn test_empty_text_has_no_windows() {
        assert!(chunk_text("", WINDOW_TOKENS).is_empty());
        assert!(chunk_text("   ", WINDOW_TOKENS).is_empty());
    }

    #[test]
    fn test_chunking_preserves_every_token_once() {
        let text = words(997);
        let windows = chunk_text(&text, WINDOW_TOKENS);
        let rejoined = windows.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_cosine_of_identical_vectors_is_one() {
        let v = vec![0.5, 0.2, 0.8];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_of_orthogonal_vectors_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_can_be_negative() {
        assert!(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) < 0.0);
    }

    #[test]
    fn test_cosine_guards_zero_and_mismatched_vectors() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_mean_pool_averages_elementwise() {
        let pooled = mean_pool(&[vec![1.0, 3.0], vec![3.0, 5.0]]);
        assert_eq!(pooled, vec![2.0, 4.0]);
    }

    #[tokio::test]
    async fn test_identical_text_ranks_highest() {
        let embedder = StubEmbedder::new();
        let ranker = SemanticRanker::new();
        let jd = "python flask nlp";
        let resumes = vec![
            ("match".to_string(), "python flask nlp".to_string()),
            ("mismatch".to_string(), "java spring hibernate".to_string()),
        ];

        let ranked = ranker.rank(&embedder, jd, &resumes).await.unwrap();
        assert_eq!(ranked[0].0, "match");
        assert!((ranked[0].1 - 1.0).abs() < 1e-5);
        assert!(ranked[0].1 > ranked[1].1);
    }

    #[tokio::test]
    async fn test_empty_document_scores_zero() {
        let embedder = StubEmbedder::new();
        let ranker = SemanticRanker::new();
        let resumes = vec![("empty".to_string(), String::new())];

        let ranked = ranker.rank(&embedder, "python", &resumes).await.unwrap();
        assert_eq!(ranked[0].1, 0.0);
    }
}
