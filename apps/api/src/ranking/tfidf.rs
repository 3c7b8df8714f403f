//! Lexical ranking: sparse TF-IDF vectors compared with cosine similarity.
//!
//! `fit` returns an explicit immutable [`FittedTfidf`] index; ranking is a
//! method on the fitted value, so rank-before-fit is unrepresentable and
//! concurrent requests each fit their own index.

use std::collections::HashMap;

use crate::preprocess::TextNormalizer;

pub struct TfidfMatcher {
    normalizer: TextNormalizer,
}

/// Immutable fitted index: corpus vocabulary, idf table, and L2-normalized
/// document vectors.
pub struct FittedTfidf {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    doc_vectors: Vec<HashMap<usize, f32>>,
    names: Vec<String>,
    normalizer: TextNormalizer,
}

impl Default for TfidfMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfMatcher {
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
        }
    }

    /// Normalizes each corpus document, builds the vocabulary and smoothed
    /// idf table, and precomputes L2-normalized document vectors.
    pub fn fit(&self, texts: &[(String, String)]) -> FittedTfidf {
        let tokenized: Vec<Vec<String>> = texts
            .iter()
            .map(|(_, text)| self.normalizer.normalize_tokens(text))
            .collect();

        // Vocabulary indices in first-seen order keeps fitting deterministic.
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        for tokens in &tokenized {
            let mut seen: Vec<usize> = Vec::new();
            for token in tokens {
                let index = *vocabulary.entry(token.clone()).or_insert_with(|| {
                    document_frequency.push(0);
                    document_frequency.len() - 1
                });
                if !seen.contains(&index) {
                    seen.push(index);
                    document_frequency[index] += 1;
                }
            }
        }

        let n = texts.len() as f32;
        let idf: Vec<f32> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let doc_vectors = tokenized
            .iter()
            .map(|tokens| weighted_vector(tokens, &vocabulary, &idf))
            .collect();

        FittedTfidf {
            vocabulary,
            idf,
            doc_vectors,
            names: texts.iter().map(|(name, _)| name.clone()).collect(),
            normalizer: TextNormalizer::new(),
        }
    }
}

impl FittedTfidf {
    /// Projects the query into the fitted vocabulary space (out-of-vocabulary
    /// terms contribute zero) and ranks documents by cosine similarity,
    /// descending. Ties keep corpus order.
    pub fn rank(&self, query: &str) -> Vec<(String, f32)> {
        let query_tokens = self.normalizer.normalize_tokens(query);
        let query_vector = weighted_vector(&query_tokens, &self.vocabulary, &self.idf);

        let mut ranked: Vec<(String, f32)> = self
            .names
            .iter()
            .zip(&self.doc_vectors)
            .map(|(name, doc)| (name.clone(), sparse_dot(&query_vector, doc)))
            .collect();

        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

/// Term counts weighted by idf, L2-normalized. Tokens outside the vocabulary
/// are skipped.
fn weighted_vector(
    tokens: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f32],
) -> HashMap<usize, f32> {
    let mut counts: HashMap<usize, f32> = HashMap::new();
    for token in tokens {
        if let Some(&index) = vocabulary.get(token) {
            *counts.entry(index).or_insert(0.0) += 1.0;
        }
    }

    for (index, weight) in counts.iter_mut() {
        *weight *= idf[*index];
    }

    let norm = counts.values().map(|w| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for weight in counts.values_mut() {
            *weight /= norm;
        }
    }
    counts
}

/// Dot product of two L2-normalized sparse vectors, i.e. cosine similarity.
fn sparse_dot(a: &HashMap<usize, f32>, b: &HashMap<usize, f32>) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(index, weight)| large.get(index).map(|other| weight * other))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(name, text)| (name.to_string(), text.to_string()))
            .collect()
    }

    #[test]
    fn test_self_similarity_is_maximal() {
        let matcher = TfidfMatcher::new();
        let text = "experienced python developer using flask and nlp techniques";
        let fitted = matcher.fit(&corpus(&[("a", text)]));

        let ranked = fitted.rank(text);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].1 - 1.0).abs() < 1e-5, "score was {}", ranked[0].1);
    }

    #[test]
    fn test_matching_resume_ranks_first() {
        let matcher = TfidfMatcher::new();
        let fitted = matcher.fit(&corpus(&[
            ("java.pdf", "java spring developer building microservices"),
            ("python.pdf", "experienced python developer using flask and nlp techniques"),
        ]));

        let ranked = fitted.rank("python flask nlp");
        assert_eq!(ranked[0].0, "python.pdf");
        assert!(ranked[0].1 > ranked[1].1);
    }

    #[test]
    fn test_out_of_vocabulary_query_scores_zero() {
        let matcher = TfidfMatcher::new();
        let fitted = matcher.fit(&corpus(&[("a", "rust systems programming")]));

        let ranked = fitted.rank("gardening cooking painting");
        assert_eq!(ranked[0].1, 0.0);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let matcher = TfidfMatcher::new();
        let fitted = matcher.fit(&corpus(&[
            ("first", "identical wording here"),
            ("second", "identical wording here"),
        ]));

        let ranked = fitted.rank("identical wording");
        assert_eq!(ranked[0].0, "first");
        assert_eq!(ranked[1].0, "second");
        assert!((ranked[0].1 - ranked[1].1).abs() < 1e-6);
    }

    #[test]
    fn test_empty_corpus_ranks_empty() {
        let matcher = TfidfMatcher::new();
        let fitted = matcher.fit(&[]);
        assert!(fitted.rank("anything").is_empty());
    }

    #[test]
    fn test_scores_bounded_by_one() {
        let matcher = TfidfMatcher::new();
        let fitted = matcher.fit(&corpus(&[
            ("a", "python flask web services"),
            ("b", "python data pipelines"),
        ]));
        for (_, score) in fitted.rank("python flask data") {
            assert!((0.0..=1.0 + 1e-6).contains(&score));
        }
    }
}
