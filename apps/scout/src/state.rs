use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::ProcessedCache;
use crate::config::Config;
use crate::extraction::pipeline::ExtractionPipeline;
use crate::matching::profile::CandidateProfile;
use crate::matching::scorer::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Redis-backed when `REDIS_URL` is set, in-memory otherwise.
    pub cache: ProcessedCache,
    pub pipeline: Arc<ExtractionPipeline>,
    /// Pluggable match scorer. Default: KeywordMatchScorer. LLM when an API key is configured.
    pub scorer: Arc<dyn MatchScorer>,
    /// Resume used by /match when the request carries none.
    pub profile: Arc<RwLock<Option<CandidateProfile>>>,
    pub config: Config,
}
