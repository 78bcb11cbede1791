//! Axum route handlers for the Matching API.

use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::config::SkillMode;
use crate::engine::models::QualityResult;
use crate::engine::{BatchReport, CandidateText, MatchEngine};
use crate::errors::AppError;
use crate::ingest::extract_upload;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TextMatchRequest {
    #[serde(default)]
    pub job_description: String,
    pub candidates: Vec<CandidateText>,
}

#[derive(Debug, Deserialize)]
pub struct QualityRequest {
    #[serde(default)]
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
pub struct QualityResponse {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub word_count: usize,
    pub skills: Vec<String>,
    pub quality: QualityResult,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillPreviewRequest {
    #[serde(default)]
    pub text: String,
    /// Defaults to the configured mode.
    pub mode: Option<SkillMode>,
}

#[derive(Debug, Serialize)]
pub struct SkillPreviewResponse {
    pub mode: SkillMode,
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Multipart upload: one `job_description` part (text field or `.txt` file) and one or
/// more `resumes` parts (files, or text fields without a filename). A resume whose text
/// cannot be extracted is still ranked, with empty text, and reported in `warnings` ahead of
/// any scoring warnings.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchReport>, AppError> {
    let mut jd_text: Option<String> = None;
    let mut candidates = Vec::new();
    let mut warnings = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let part = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(String::from);

        match part.as_str() {
            "job_description" => {
                let text = match file_name {
                    Some(name) => extract_upload(&name, field.bytes().await?).await?,
                    None => field.text().await?,
                };
                jd_text = Some(text);
            }
            "resumes" | "resume" => {
                let extracted = match file_name {
                    Some(name) => {
                        let bytes = field.bytes().await?;
                        let result = extract_upload(&name, bytes).await;
                        (name, result)
                    }
                    // A part without a filename is a plain text field.
                    None => (format!("resume-{}", Uuid::new_v4()), Ok(field.text().await?)),
                };
                let (file_id, raw_text) = match extracted {
                    (file_id, Ok(text)) => {
                        if text.trim().is_empty() {
                            warnings.push(format!("{file_id}: no extractable text"));
                        }
                        (file_id, text)
                    }
                    (file_id, Err(e)) => {
                        warn!("Extraction failed for {file_id}: {e}");
                        warnings.push(format!("{file_id}: {e}"));
                        (file_id, String::new())
                    }
                };
                candidates.push(CandidateText { file_id, raw_text });
            }
            other => debug!("Ignoring multipart part '{other}'"),
        }
    }

    let jd_text = jd_text
        .ok_or_else(|| AppError::Validation("job_description part is required".to_string()))?;
    if candidates.is_empty() {
        return Err(AppError::Validation(
            "at least one resumes part is required".to_string(),
        ));
    }

    info!("Matching {} uploaded resume(s)", candidates.len());
    let mut report = run_batch(state.engine.clone(), jd_text, candidates).await?;
    warnings.append(&mut report.warnings);
    report.warnings = warnings;
    Ok(Json(report))
}

/// POST /api/v1/match/text
///
/// Same as the upload endpoint for callers that already hold extracted text.
/// An empty job description is valid and scores every candidate 0.
pub async fn handle_match_text(
    State(state): State<AppState>,
    Json(request): Json<TextMatchRequest>,
) -> Result<Json<BatchReport>, AppError> {
    if request.candidates.is_empty() {
        return Err(AppError::Validation(
            "candidates cannot be empty".to_string(),
        ));
    }

    info!("Matching {} resume text(s)", request.candidates.len());
    let report = run_batch(
        state.engine.clone(),
        request.job_description,
        request.candidates,
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/v1/quality
pub async fn handle_quality(
    State(state): State<AppState>,
    Json(request): Json<QualityRequest>,
) -> Result<Json<QualityResponse>, AppError> {
    let engine = &state.engine;
    let document = engine.build_document("document", &request.raw_text);
    let quality = engine.assess_quality(&document);

    Ok(Json(QualityResponse {
        name: document.display_name().to_string(),
        word_count: document.word_count(),
        summary: quality.summary(),
        email: document.email,
        phone: document.phone,
        skills: document.skills,
        quality,
    }))
}

/// POST /api/v1/skills
///
/// Previews what the extractor pulls out of a text, in either mode.
pub async fn handle_skill_preview(
    State(state): State<AppState>,
    Json(request): Json<SkillPreviewRequest>,
) -> Result<Json<SkillPreviewResponse>, AppError> {
    let engine = &state.engine;
    let mode = request.mode.unwrap_or(engine.config().skill_mode);
    let extractor = engine.skill_extractor();

    let skills = match mode {
        SkillMode::Open => extractor.extract_open(&request.text),
        SkillMode::Vocabulary => {
            extractor.extract_with_vocabulary(&request.text, &engine.config().vocabulary)
        }
    };

    Ok(Json(SkillPreviewResponse { mode, skills }))
}

/// Runs the CPU-bound batch on the blocking pool.
async fn run_batch(
    engine: Arc<MatchEngine>,
    jd_text: String,
    candidates: Vec<CandidateText>,
) -> Result<BatchReport, AppError> {
    tokio::task::spawn_blocking(move || engine.run_batch(&jd_text, &candidates))
        .await
        .map_err(|e| AppError::Internal(anyhow!("Batch scoring task failed: {e}")))
}
