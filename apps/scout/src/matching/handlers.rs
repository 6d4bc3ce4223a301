//! Axum route handlers for match scoring and the candidate profile.

use std::collections::BTreeSet;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::profile::CandidateProfile;
use crate::matching::scorer::MatchScore;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub job_description: String,
    /// Falls back to the stored profile when absent.
    pub resume_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub score: MatchScore,
    pub scorer_backend: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub characters: usize,
    pub skills: BTreeSet<String>,
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let resume_text = match request.resume_text.filter(|t| !t.trim().is_empty()) {
        Some(text) => text,
        None => state
            .profile
            .read()
            .await
            .as_ref()
            .map(|p| p.resume_text.clone())
            .ok_or_else(|| {
                AppError::Validation(
                    "resume_text is required when no resume has been uploaded".to_string(),
                )
            })?,
    };

    let score = state
        .scorer
        .score(&request.job_description, &resume_text)
        .await;

    Ok(Json(MatchResponse {
        score,
        scorer_backend: state.scorer.backend().to_string(),
    }))
}

/// POST /api/v1/profile/resume
///
/// Multipart upload with a `resume` PDF field. Replaces the stored profile.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProfileSummary>, AppError> {
    let mut pdf: Option<Bytes> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(RESUME_FIELD) {
            pdf = Some(field.bytes().await?);
        }
    }
    let pdf = pdf.ok_or_else(|| {
        AppError::Validation(format!("multipart field '{RESUME_FIELD}' is required"))
    })?;

    let profile =
        CandidateProfile::from_pdf_bytes(pdf.to_vec(), state.pipeline.skill_extractor()).await?;
    let summary = ProfileSummary {
        characters: profile.resume_text.chars().count(),
        skills: profile.skills.clone(),
    };
    info!(
        "Resume uploaded: {} chars, {} catalog skills",
        summary.characters,
        summary.skills.len()
    );

    *state.profile.write().await = Some(profile);
    Ok(Json(summary))
}
