//! Axum route handlers for extraction and batch processing.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::pipeline::ExtractedRecord;
use crate::jobs::export::{export_filename, save_to_json};
use crate::jobs::models::{JobResult, SearchParams};
use crate::jobs::processor::{filter_recent, search_all, sort_newest_first, JobProcessor};
use crate::jobs::source::{PostingPayload, StaticJobSource};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    /// Raw postings; entries that are not postings at all are skipped individually.
    pub postings: Vec<Value>,
    /// When empty, every supplied posting is processed.
    #[serde(default)]
    pub searches: Vec<SearchParams>,
    pub max_age_days: Option<i64>,
    /// Overrides the configured blacklist for this batch.
    pub blacklist: Option<Vec<String>>,
    #[serde(default)]
    pub export: bool,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub run_id: Uuid,
    pub processed: usize,
    pub results: Vec<JobResult>,
    pub export_path: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/extract
///
/// Runs the extraction pipeline over raw posting text. Nothing is cached.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractedRecord>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    Ok(Json(state.pipeline.process(&request.text)))
}

/// POST /api/v1/jobs/process
///
/// search (optional) → recency filter (optional) → concurrent processing →
/// newest-first ordering → JSON export (optional).
pub async fn handle_process(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, AppError> {
    if request.postings.is_empty() {
        return Err(AppError::Validation("postings cannot be empty".to_string()));
    }

    let run_id = Uuid::new_v4();
    let config = &state.config;
    let source = Arc::new(StaticJobSource::new(PostingPayload::parse_all(
        request.postings,
    )));

    let mut hits = if request.searches.is_empty() {
        source.hits().to_vec()
    } else {
        search_all(source.as_ref(), &request.searches, config.max_search_workers).await
    };
    if let Some(days) = request.max_age_days {
        hits = filter_recent(hits, days, Utc::now());
    }
    info!("Run {run_id}: {} postings to process", hits.len());

    let blacklist: HashSet<String> = match request.blacklist {
        Some(list) => list.into_iter().collect(),
        None => config.blacklist.clone(),
    };

    let processor = JobProcessor::new(source, state.cache.clone(), state.pipeline.clone());
    let mut results = processor
        .process_all(hits, Arc::new(blacklist), config.max_process_workers)
        .await;
    sort_newest_first(&mut results);

    let export_path = if request.export {
        let path = save_to_json(&results, &config.output_dir, &export_filename(run_id)).await?;
        Some(path.display().to_string())
    } else {
        None
    };

    Ok(Json(ProcessResponse {
        run_id,
        processed: results.len(),
        results,
        export_path,
    }))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobResult>, AppError> {
    state
        .cache
        .get(&job_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} has not been processed")))
}

/// DELETE /api/v1/jobs/:id
///
/// Evicts the cached result so the next batch reprocesses the posting.
pub async fn handle_forget_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> StatusCode {
    state.cache.forget(&job_id).await;
    StatusCode::NO_CONTENT
}
