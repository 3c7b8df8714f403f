//! Hybrid ranking pipeline: prepare resumes once, run the three scorers,
//! max-normalize each signal, and blend into a single fused score.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::embedder::{EmbedError, Embedder};
use crate::ranking::keyword::KeywordMatcher;
use crate::ranking::semantic::SemanticRanker;
use crate::ranking::tfidf::TfidfMatcher;
use crate::sections::SectionExtractor;

/// Signal weights for the fused score. Not required to sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridWeights {
    pub tfidf: f32,
    pub semantic: f32,
    pub keyword: f32,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            tfidf: 0.4,
            semantic: 0.4,
            keyword: 0.2,
        }
    }
}

/// Per-signal normalized scores, kept for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalBreakdown {
    pub tfidf: f32,
    pub semantic: f32,
    pub keyword: f32,
}

/// One resume's fused result. `score` is on a 0-100 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResume {
    pub name: String,
    pub score: f32,
    pub breakdown: SignalBreakdown,
}

pub struct ResumePipeline {
    section_extractor: SectionExtractor,
    tfidf: TfidfMatcher,
    semantic: SemanticRanker,
    keyword: KeywordMatcher,
    weights: HybridWeights,
    embedder: Arc<dyn Embedder>,
}

impl ResumePipeline {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            section_extractor: SectionExtractor::default(),
            tfidf: TfidfMatcher::new(),
            semantic: SemanticRanker::new(),
            keyword: KeywordMatcher::default(),
            weights: HybridWeights::default(),
            embedder,
        }
    }

    pub fn with_thresholds(
        embedder: Arc<dyn Embedder>,
        fuzzy_threshold: f64,
        semantic_threshold: f32,
    ) -> Self {
        Self {
            section_extractor: SectionExtractor::new(fuzzy_threshold),
            keyword: KeywordMatcher::new(semantic_threshold),
            ..Self::new(embedder)
        }
    }

    /// Segments each resume and keeps the important sections' content as its
    /// scoring document. Done once; every scorer sees the same prepared text.
    pub fn prepare(&self, resumes: &[(String, String)]) -> Vec<(String, String)> {
        let prepared: Vec<(String, String)> = resumes
            .iter()
            .map(|(name, text)| (name.clone(), self.section_extractor.important_text(text)))
            .collect();
        info!("Prepared {} resumes for ranking", prepared.len());
        prepared
    }

    /// TF-IDF ranking over prepared resumes, max-normalized.
    pub fn rank_tfidf(&self, prepared: &[(String, String)], job_description: &str) -> Vec<(String, f32)> {
        let fitted = self.tfidf.fit(prepared);
        let mut ranked = fitted.rank(job_description);
        max_normalize(&mut ranked);
        ranked
    }

    /// Semantic ranking over prepared resumes, max-normalized.
    pub async fn rank_semantic(
        &self,
        prepared: &[(String, String)],
        job_description: &str,
    ) -> Result<Vec<(String, f32)>, EmbedError> {
        let mut ranked = self
            .semantic
            .rank(self.embedder.as_ref(), job_description, prepared)
            .await?;
        max_normalize(&mut ranked);
        Ok(ranked)
    }

    /// Keyword ranking over prepared resumes, max-normalized.
    pub async fn rank_keyword(
        &self,
        prepared: &[(String, String)],
        job_description: &str,
        skills: &[String],
    ) -> Result<Vec<(String, f32)>, EmbedError> {
        let mut ranked = self
            .keyword
            .rank(self.embedder.as_ref(), prepared, job_description, skills)
            .await?;
        max_normalize(&mut ranked);
        Ok(ranked)
    }

    /// Full hybrid ranking: all three signals blended per resume, scaled to
    /// 0-100, descending. Ties keep the input order of the resume list.
    pub async fn rank_hybrid(
        &self,
        resumes: &[(String, String)],
        job_description: &str,
        skills: &[String],
    ) -> Result<Vec<RankedResume>, EmbedError> {
        let prepared = self.prepare(resumes);

        let tfidf_results = self.rank_tfidf(&prepared, job_description);
        debug!("TF-IDF ranking complete");
        let semantic_results = self.rank_semantic(&prepared, job_description).await?;
        debug!("Semantic ranking complete");
        let keyword_results = self
            .rank_keyword(&prepared, job_description, skills)
            .await?;
        debug!("Keyword ranking complete");

        let fused = fuse(
            &prepared,
            &tfidf_results,
            &semantic_results,
            &keyword_results,
            &self.weights,
        );
        info!("Ranked {} resumes", fused.len());
        Ok(fused)
    }
}

/// Divides every score by the list's maximum. A maximum of zero (or below)
/// leaves scores untouched, so nothing divides by zero and a negative maximum
/// never flips signs.
pub fn max_normalize(scores: &mut [(String, f32)]) {
    let max = scores
        .iter()
        .map(|(_, score)| *score)
        .fold(f32::NEG_INFINITY, f32::max);
    if max > 0.0 {
        for (_, score) in scores.iter_mut() {
            *score /= max;
        }
    }
}

/// Blends normalized per-signal scores into the final ranking. Resumes
/// missing from a signal's list default to 0 for that signal; fused scores
/// are clamped at 0 before the 0-100 scale.
fn fuse(
    resumes: &[(String, String)],
    tfidf_results: &[(String, f32)],
    semantic_results: &[(String, f32)],
    keyword_results: &[(String, f32)],
    weights: &HybridWeights,
) -> Vec<RankedResume> {
    let tfidf_by_name: HashMap<&str, f32> = score_map(tfidf_results);
    let semantic_by_name: HashMap<&str, f32> = score_map(semantic_results);
    let keyword_by_name: HashMap<&str, f32> = score_map(keyword_results);

    let mut fused: Vec<RankedResume> = resumes
        .iter()
        .map(|(name, _)| {
            let breakdown = SignalBreakdown {
                tfidf: *tfidf_by_name.get(name.as_str()).unwrap_or(&0.0),
                semantic: *semantic_by_name.get(name.as_str()).unwrap_or(&0.0),
                keyword: *keyword_by_name.get(name.as_str()).unwrap_or(&0.0),
            };
            let score = (weights.tfidf * breakdown.tfidf
                + weights.semantic * breakdown.semantic
                + weights.keyword * breakdown.keyword)
                .max(0.0)
                * 100.0;
            RankedResume {
                name: name.clone(),
                score,
                breakdown,
            }
        })
        .collect();

    fused.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    fused
}

fn score_map(results: &[(String, f32)]) -> HashMap<&str, f32> {
    results
        .iter()
        .map(|(name, score)| (name.as_str(), *score))
        .collect()
}
