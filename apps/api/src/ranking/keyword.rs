//! Keyword/skill ranking: exact keyword overlap against the job description,
//! exact overlap against an explicit skill list, and per-skill semantic
//! overlap through the embedding backend.

use std::cmp::Ordering;
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::embedder::{EmbedError, Embedder};
use crate::preprocess::TextNormalizer;
use crate::ranking::semantic::cosine_similarity;

/// Alphanumeric runs plus `_ # +`, so tokens like `c++` and `c#` survive.
static KEYWORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9_#+]+").expect("valid regex"));

/// Default minimum cosine similarity for a skill to count as a semantic match.
pub const DEFAULT_SEMANTIC_THRESHOLD: f32 = 0.7;

/// Component weights for the blended keyword score. Not required to sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordWeights {
    pub general: f32,
    pub skills: f32,
    pub semantic: f32,
}

impl Default for KeywordWeights {
    fn default() -> Self {
        Self {
            general: 0.2,
            skills: 0.4,
            semantic: 0.4,
        }
    }
}

pub struct KeywordMatcher {
    weights: KeywordWeights,
    semantic_threshold: f32,
    normalizer: TextNormalizer,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SEMANTIC_THRESHOLD)
    }
}

impl KeywordMatcher {
    pub fn new(semantic_threshold: f32) -> Self {
        Self {
            weights: KeywordWeights::default(),
            semantic_threshold,
            normalizer: TextNormalizer::new(),
        }
    }

    pub fn with_weights(mut self, weights: KeywordWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Fraction of the job description's keywords present in the resume.
    /// 0 when the job description has no keywords.
    pub fn general_overlap(&self, resume_text: &str, job_description: &str) -> f32 {
        let resume_keywords = extract_keywords(resume_text);
        let jd_keywords = extract_keywords(job_description);
        if jd_keywords.is_empty() {
            return 0.0;
        }
        let shared = resume_keywords.intersection(&jd_keywords).count();
        shared as f32 / jd_keywords.len() as f32
    }

    /// Fraction of the explicit skill list present in the resume. 0 when the
    /// skill list is empty.
    pub fn skill_overlap(&self, resume_text: &str, skills: &[String]) -> f32 {
        if skills.is_empty() {
            return 0.0;
        }
        let resume_keywords = extract_keywords(resume_text);
        let skill_set: HashSet<String> = skills.iter().map(|s| s.to_lowercase()).collect();
        let shared = resume_keywords.intersection(&skill_set).count();
        shared as f32 / skill_set.len() as f32
    }

    /// Fraction of skills whose embedding lands within the semantic threshold
    /// of the normalized resume text. One embedding call per skill.
    pub async fn semantic_overlap(
        &self,
        embedder: &dyn Embedder,
        resume_text: &str,
        skills: &[String],
    ) -> Result<f32, EmbedError> {
        if skills.is_empty() {
            return Ok(0.0);
        }

        let resume_embedding = embedder
            .embed(&self.normalizer.normalize_for_semantic(resume_text))
            .await?;

        let mut matches = 0usize;
        for skill in skills {
            let skill_embedding = embedder.embed(&skill.to_lowercase()).await?;
            if cosine_similarity(&resume_embedding, &skill_embedding) >= self.semantic_threshold {
                matches += 1;
            }
        }
        Ok(matches as f32 / skills.len() as f32)
    }

    /// Weighted blend of the three overlap components for one resume.
    pub async fn score(
        &self,
        embedder: &dyn Embedder,
        resume_text: &str,
        job_description: &str,
        skills: &[String],
    ) -> Result<f32, EmbedError> {
        let general = self.general_overlap(resume_text, job_description);
        let skill = self.skill_overlap(resume_text, skills);
        let semantic = self.semantic_overlap(embedder, resume_text, skills).await?;

        Ok(self.weights.general * general
            + self.weights.skills * skill
            + self.weights.semantic * semantic)
    }

    /// Ranks resumes by blended keyword score, descending. Ties keep input
    /// order.
    pub async fn rank(
        &self,
        embedder: &dyn Embedder,
        resumes: &[(String, String)],
        job_description: &str,
        skills: &[String],
    ) -> Result<Vec<(String, f32)>, EmbedError> {
        let mut ranked = Vec::with_capacity(resumes.len());
        for (name, text) in resumes {
            let score = self.score(embedder, text, job_description, skills).await?;
            ranked.push((name.clone(), score));
        }

        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Ok(ranked)
    }
}

/// Case-insensitive keyword set for a text.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    let text = text.to_lowercase();
    KEYWORD_PATTERN
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StubEmbedder;

    const RESUME_A: &str = "Experienced Python developer using Flask and NLP techniques";
    const RESUME_B: &str = "Java Spring developer";
    const JD: &str = "python flask nlp";

    fn skills() -> Vec<String> {
        vec!["Python".to_string(), "Flask".to_string(), "NLP".to_string()]
    }

    #[test]
    fn test_keywords_capture_symbol_suffixed_tokens() {
        let keywords = extract_keywords("Expert in C++, C# and .NET");
        assert!(keywords.contains("c++"));
        assert!(keywords.contains("c#"));
        assert!(keywords.contains("net"));
    }

    #[test]
    fn test_general_overlap_full_and_zero() {
        let matcher = KeywordMatcher::default();
        assert_eq!(matcher.general_overlap(RESUME_A, JD), 1.0);
        assert_eq!(matcher.general_overlap(RESUME_B, JD), 0.0);
    }

    #[test]
    fn test_general_overlap_empty_jd_is_zero() {
        let matcher = KeywordMatcher::default();
        assert_eq!(matcher.general_overlap(RESUME_A, ""), 0.0);
    }

    #[test]
    fn test_skill_overlap_is_case_insensitive() {
        let matcher = KeywordMatcher::default();
        assert_eq!(matcher.skill_overlap(RESUME_A, &skills()), 1.0);
        assert_eq!(matcher.skill_overlap(RESUME_B, &skills()), 0.0);
    }

    #[test]
    fn test_skill_overlap_empty_list_is_zero() {
        let matcher = KeywordMatcher::default();
        assert_eq!(matcher.skill_overlap(RESUME_A, &[]), 0.0);
    }

    #[tokio::test]
    async fn test_semantic_overlap_counts_close_skills() {
        let embedder = StubEmbedder::new();
        let matcher = KeywordMatcher::default();

        // Single-token resume embeds onto exactly the skill's vector.
        let overlap = matcher
            .semantic_overlap(&embedder, "python python python", &["Python".to_string()])
            .await
            .unwrap();
        assert_eq!(overlap, 1.0);
    }

    #[tokio::test]
    async fn test_semantic_overlap_empty_skills_is_zero() {
        let embedder = StubEmbedder::new();
        let matcher = KeywordMatcher::default();
        let overlap = matcher
            .semantic_overlap(&embedder, RESUME_A, &[])
            .await
            .unwrap();
        assert_eq!(overlap, 0.0);
    }

    #[tokio::test]
    async fn test_matching_resume_outranks_mismatch() {
        let embedder = StubEmbedder::new();
        let matcher = KeywordMatcher::default();
        let resumes = vec![
            ("b.pdf".to_string(), RESUME_B.to_string()),
            ("a.pdf".to_string(), RESUME_A.to_string()),
        ];

        let ranked = matcher
            .rank(&embedder, &resumes, JD, &skills())
            .await
            .unwrap();
        assert_eq!(ranked[0].0, "a.pdf");
        assert!(ranked[0].1 > ranked[1].1);
        // general and skill components both saturate for the matching resume
        assert!(ranked[0].1 >= 0.2 * 1.0 + 0.4 * 1.0);
    }

    #[tokio::test]
    async fn test_custom_weights_rescale_components() {
        let embedder = StubEmbedder::new();
        let matcher = KeywordMatcher::default().with_weights(KeywordWeights {
            general: 1.0,
            skills: 0.0,
            semantic: 0.0,
        });

        let score = matcher
            .score(&embedder, RESUME_A, JD, &skills())
            .await
            .unwrap();
        assert_eq!(score, 1.0); // pure general overlap
    }

    #[tokio::test]
    async fn test_tied_scores_keep_input_order() {
        let embedder = StubEmbedder::new();
        let matcher = KeywordMatcher::default();
        let resumes = vec![
            ("first".to_string(), "golang kubernetes".to_string()),
            ("second".to_string(), "golang kubernetes".to_string()),
        ];

        let ranked = matcher.rank(&embedder, &resumes, JD, &[]).await.unwrap();
        assert_eq!(ranked[0].0, "first");
        assert_eq!(ranked[1].0, "second");
    }
}
