pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction
        .route("/api/v1/extract", post(jobs::handle_extract))
        // Batch processing and the processed-job cache
        .route("/api/v1/jobs/process", post(jobs::handle_process))
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job).delete(jobs::handle_forget_job),
        )
        // Matching
        .route("/api/v1/match", post(matching::handle_match))
        .route("/api/v1/profile/resume", post(matching::handle_upload_resume))
        .with_state(state)
}
