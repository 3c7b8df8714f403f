#![allow(dead_code)]

//! Shared text normalization used by every scorer.
//!
//! The baseline pipeline is lowercase → strip URLs → strip characters outside
//! the scorer's permitted set → collapse whitespace → drop stop-words and
//! short tokens → stem. Token order is preserved. Normalization is total: any
//! input produces a (possibly empty) string, never an error.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use tracing::debug;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("valid regex"));

/// Standard English stop-words (the NLTK list, apostrophe forms dropped since
/// cleaning strips apostrophes first).
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn",
    "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn", "needn", "shan",
    "shouldn", "wasn", "weren", "won", "wouldn",
];

/// Boilerplate terms that carry no signal in resumes.
const RESUME_NOISE_TERMS: &[&str] = &[
    "resume",
    "cv",
    "curriculum",
    "vitae",
    "profile",
    "summary",
    "objective",
    "references",
    "available",
    "upon",
    "request",
];

/// Minimum surviving token length (exclusive lower bound of 2).
const MIN_TOKEN_LEN: usize = 3;

pub struct TextNormalizer {
    stop_words: HashSet<&'static str>,
    stemmer: Stemmer,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let stop_words = ENGLISH_STOP_WORDS
            .iter()
            .chain(RESUME_NOISE_TERMS)
            .copied()
            .collect();
        Self {
            stop_words,
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Lexical-scorer cleaning: letters only.
    pub fn clean_lexical(&self, text: &str) -> String {
        let text = text.to_lowercase();
        let text = URL_PATTERN.replace_all(&text, "");
        let kept: String = text
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
            .collect();
        collapse_whitespace(&kept)
    }

    /// Embedding-scorer cleaning: keeps digits and sentence punctuation so the
    /// model sees near-natural text.
    pub fn clean_embedding(&self, text: &str) -> String {
        let text = text.to_lowercase();
        let kept: String = text
            .chars()
            .filter(|c| {
                c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '.' || *c == ','
            })
            .collect();
        collapse_whitespace(&kept)
    }

    /// Keyword-scorer cleaning: non-letters become spaces so hyphenated and
    /// slash-joined terms split into separate tokens.
    pub fn clean_keyword(&self, text: &str) -> String {
        let text = text.to_lowercase();
        let kept: String = text
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();
        collapse_whitespace(&kept)
    }

    /// Cleans, drops stop-words and short tokens, and stems what survives.
    /// Output order matches input order.
    pub fn normalize_tokens(&self, text: &str) -> Vec<String> {
        self.clean_lexical(text)
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(token) && token.len() >= MIN_TOKEN_LEN)
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect()
    }

    /// Full normalization to a single space-joined string of stems.
    pub fn normalize(&self, text: &str) -> String {
        let normalized = self.normalize_tokens(text).join(" ");
        if normalized.is_empty() && !text.trim().is_empty() {
            debug!("Normalization produced empty output for non-empty input");
        }
        normalized
    }

    /// Keyword-variant normalization (no short-token filter, space-split
    /// punctuation), used before semantic skill comparison.
    pub fn normalize_for_semantic(&self, text: &str) -> String {
        self.clean_keyword(text)
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(token))
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_and_short_tokens_dropped() {
        let normalizer = TextNormalizer::new();
        let tokens = normalizer.normalize_tokens("I am a go developer with the skills");
        assert_eq!(tokens, vec!["develop", "skill"]);
    }

    #[test]
    fn test_resume_noise_terms_dropped() {
        let normalizer = TextNormalizer::new();
        let out = normalizer.normalize("curriculum vitae references available upon request");
        assert_eq!(out, "");
    }

    #[test]
    fn test_urls_stripped() {
        let normalizer = TextNormalizer::new();
        let out = normalizer.normalize("portfolio https://example.com/jane running fast");
        assert_eq!(out, "portfolio run fast");
    }

    #[test]
    fn test_token_order_preserved() {
        let normalizer = TextNormalizer::new();
        let tokens = normalizer.normalize_tokens("zulu alpha mike");
        assert_eq!(tokens, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_punctuation_only_input_is_empty_not_error() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("!!! ??? 123 --"), "");
        assert_eq!(normalizer.normalize(""), "");
    }

    #[test]
    fn test_clean_embedding_keeps_digits_and_sentence_punctuation() {
        let normalizer = TextNormalizer::new();
        let out = normalizer.clean_embedding("Shipped v2.1, cut latency 40%!");
        assert_eq!(out, "shipped v2.1, cut latency 40");
    }

    #[test]
    fn test_clean_keyword_splits_on_punctuation() {
        let normalizer = TextNormalizer::new();
        let out = normalizer.clean_keyword("ci/cd node.js");
        assert_eq!(out, "ci cd node js");
    }

    #[test]
    fn test_stemming_reduces_to_base_form() {
        let normalizer = TextNormalizer::new();
        let tokens = normalizer.normalize_tokens("running skills developers");
        assert_eq!(tokens, vec!["run", "skill", "develop"]);
    }
}
