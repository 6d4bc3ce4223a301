mod cache;
mod config;
mod errors;
mod extraction;
mod jobs;
mod llm_client;
mod matching;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::{CacheStore, MemoryStore, ProcessedCache, RedisStore};
use crate::config::Config;
use crate::extraction::catalog::ExtractionCatalog;
use crate::extraction::pipeline::ExtractionPipeline;
use crate::llm_client::LlmClient;
use crate::matching::profile::CandidateProfile;
use crate::matching::scorer::{KeywordMatchScorer, LlmMatchScorer, MatchScorer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scout v{}", env!("CARGO_PKG_VERSION"));

    // Extraction catalog and pipeline
    let catalog = match &config.catalog_path {
        Some(path) => ExtractionCatalog::from_json_file(path)?,
        None => ExtractionCatalog::default(),
    };
    let pipeline = Arc::new(ExtractionPipeline::new(&catalog)?);
    info!(
        "Extraction pipeline ready: {} header keywords, {} skills",
        catalog.header_keywords().len(),
        catalog.technical_skills.len()
    );

    // Processed-job cache
    let store: Arc<dyn CacheStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            let store = RedisStore::connect(&client).await?;
            info!("Redis cache connected");
            Arc::new(store)
        }
        None => {
            info!("REDIS_URL not set, using in-memory cache");
            Arc::new(MemoryStore::new())
        }
    };
    let cache = ProcessedCache::new(store, config.cache_ttl);

    // Match scorer (keyword by default, LLM when ANTHROPIC_API_KEY is set)
    let scorer: Arc<dyn MatchScorer> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM match scorer initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmMatchScorer(llm))
        }
        None => Arc::new(KeywordMatchScorer::new(Arc::new(
            pipeline.skill_extractor().clone(),
        ))),
    };

    // Candidate profile from RESUME_PATH, if any
    let profile = match &config.resume_path {
        Some(path) => match CandidateProfile::from_pdf_path(path, pipeline.skill_extractor()).await {
            Ok(profile) => {
                info!("Candidate profile ready: {} catalog skills", profile.skills.len());
                Some(profile)
            }
            Err(e) => {
                warn!("Could not load resume from {}: {e}", path.display());
                None
            }
        },
        None => None,
    };

    let state = AppState {
        cache,
        pipeline,
        scorer,
        profile: Arc::new(RwLock::new(profile)),
        config: config.clone(),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
