//! Axum route handlers for the Ranking API.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::extract::extract_text_from_bytes;
use crate::ranking::pipeline::{ResumePipeline, SignalBreakdown};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RankedResult {
    pub name: String,
    /// Fused hybrid score on a 0-100 scale, rounded to 3 decimals.
    pub score: f32,
    pub breakdown: SignalBreakdown,
}

/// An upload that could not be ranked; the rest of the batch proceeds.
#[derive(Debug, Serialize)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub results: Vec<RankedResult>,
    pub skipped: Vec<SkippedFile>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rank
///
/// Multipart form: repeated `files` parts (.pdf/.docx/.txt resumes), a
/// `job_description` text part, and an optional comma-separated `jd_skills`
/// part. Returns the hybrid ranking with per-signal breakdowns.
pub async fn handle_rank(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RankResponse>, AppError> {
    let mut job_description = String::new();
    let mut jd_skills: Vec<String> = Vec::new();
    let mut resumes: Vec<(String, String)> = Vec::new();
    let mut skipped: Vec<SkippedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(e.to_string()))?
    {
        // Copied out before `text()`/`bytes()` consume the field.
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "job_description" => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Multipart(e.to_string()))?;
            }
            "jd_skills" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Multipart(e.to_string()))?;
                jd_skills = parse_skills(&raw);
            }
            "files" => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Multipart(e.to_string()))?;
                match extract_text_from_bytes(&filename, &bytes) {
                    Ok(text) => resumes.push((filename, text)),
                    Err(e) => {
                        warn!("Skipping {filename}: {e}");
                        skipped.push(SkippedFile {
                            name: filename,
                            reason: e.to_string(),
                        });
                    }
                }
            }
            other => debug!("Ignoring unknown multipart field {other:?}"),
        }
    }

    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    if resumes.is_empty() && skipped.is_empty() {
        return Err(AppError::Validation(
            "at least one resume file is required".to_string(),
        ));
    }

    let pipeline = ResumePipeline::with_thresholds(
        state.embedder.clone(),
        state.config.fuzzy_threshold,
        state.config.semantic_threshold,
    );
    let ranked = pipeline
        .rank_hybrid(&resumes, &job_description, &jd_skills)
        .await?;

    let results = ranked
        .into_iter()
        .map(|resume| RankedResult {
            name: resume.name,
            score: round3(resume.score),
            breakdown: SignalBreakdown {
                tfidf: round3(resume.breakdown.tfidf),
                semantic: round3(resume.breakdown.semantic),
                keyword: round3(resume.breakdown.keyword),
            },
        })
        .collect();

    Ok(Json(RankResponse { results, skipped }))
}

/// Splits a comma-separated skill string, trimming blanks away.
fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}
