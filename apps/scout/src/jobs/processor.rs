//! Concurrent job processing: fans postings out to the extraction pipeline.
//!
//! Flow per posting: derive id → cache check → fetch details → blacklist filter →
//! extract → assemble `JobResult` → mark processed.
//!
//! Results are collected in completion order. A posting that fails for any reason
//! is logged and contributes nothing; the rest of the batch continues.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::cache::ProcessedCache;
use crate::extraction::pipeline::ExtractionPipeline;
use crate::jobs::models::{JobResult, PostingMetadata, SearchHit, SearchParams, NOT_AVAILABLE};
use crate::jobs::source::{details_or_none, search_or_empty, JobSource};

/// Default bound for the per-posting pool.
pub const MAX_PROCESS_WORKERS: usize = 20;
/// Default bound for the search pool. Kept small; sources rate-limit.
pub const MAX_SEARCH_WORKERS: usize = 3;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Search hit '{0}' has no posting id")]
    MissingIdentifier(String),

    #[error("Details unavailable for job {0}")]
    DetailsUnavailable(String),
}

#[derive(Clone)]
pub struct JobProcessor {
    source: Arc<dyn JobSource>,
    cache: ProcessedCache,
    pipeline: Arc<ExtractionPipeline>,
}

impl JobProcessor {
    pub fn new(
        source: Arc<dyn JobSource>,
        cache: ProcessedCache,
        pipeline: Arc<ExtractionPipeline>,
    ) -> Self {
        Self {
            source,
            cache,
            pipeline,
        }
    }

    /// Processes every hit on a pool of at most `max_workers` concurrent tasks.
    ///
    /// Output order is completion order, not input order.
    pub async fn process_all(
        &self,
        hits: Vec<SearchHit>,
        blacklist: Arc<HashSet<String>>,
        max_workers: usize,
    ) -> Vec<JobResult> {
        let hits = dedup_by_job_id(hits);
        let total = hits.len();
        let permits = Arc::new(Semaphore::new(max_workers.max(1)));
        let mut tasks = JoinSet::new();

        for hit in hits {
            let Ok(permit) = permits.clone().acquire_owned().await else {
                break;
            };
            let processor = self.clone();
            let blacklist = blacklist.clone();
            tasks.spawn(async move {
                let _permit = permit;
                processor.process_job(hit, &blacklist).await
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(Some(result))) => results.push(result),
                Ok(Ok(None)) => {}
                Ok(Err(e)) => warn!("Error processing job: {e}"),
                Err(e) => error!("Job processing task failed: {e}"),
            }
        }

        info!("Processed {} of {total} postings", results.len());
        results
    }

    /// Processes one hit. `Ok(None)` means skipped: already cached or blacklisted.
    pub async fn process_job(
        &self,
        hit: SearchHit,
        blacklist: &HashSet<String>,
    ) -> Result<Option<JobResult>, ProcessError> {
        let job_id = hit
            .job_id()
            .ok_or_else(|| ProcessError::MissingIdentifier(hit.entity_urn.clone()))?;

        if self.cache.is_processed(job_id).await {
            debug!("Job {job_id} already processed. Skipping...");
            return Ok(None);
        }

        let details = details_or_none(self.source.as_ref(), job_id)
            .await
            .ok_or_else(|| ProcessError::DetailsUnavailable(job_id.to_string()))?;
        let metadata = PostingMetadata::from_details(&details);

        if blacklist.contains(&metadata.company) {
            debug!("Job {job_id} from blacklisted company '{}'", metadata.company);
            return Ok(None);
        }

        let record = self.pipeline.process(&metadata.description);
        let result = JobResult::assemble(metadata, record);

        self.cache.mark_processed(job_id, &result).await;
        Ok(Some(result))
    }
}

/// Collapses repeated posting ids, keeping the first occurrence. Hits without an id
/// are kept so the processor reports them.
fn dedup_by_job_id(hits: Vec<SearchHit>) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|hit| match hit.job_id() {
            Some(id) => seen.insert(id.to_string()),
            None => true,
        })
        .collect()
}

/// Runs every search on a pool of at most `max_workers`, flattening in params order.
pub async fn search_all(
    source: &dyn JobSource,
    params_list: &[SearchParams],
    max_workers: usize,
) -> Vec<SearchHit> {
    let batches: Vec<Vec<SearchHit>> = stream::iter(params_list.iter().cloned())
        .map(|params| async move { search_or_empty(source, &params).await })
        .buffered(max_workers.max(1))
        .collect()
        .await;
    batches.into_iter().flatten().collect()
}

/// Keeps hits listed within the last `days` whole days. Undated hits are dropped.
pub fn filter_recent(hits: Vec<SearchHit>, days: i64, now: DateTime<Utc>) -> Vec<SearchHit> {
    hits.into_iter()
        .filter(|hit| {
            hit.listed_at
                .and_then(DateTime::from_timestamp_millis)
                .is_some_and(|listed| (now - listed).num_days() <= days)
        })
        .collect()
}

/// Orders results newest first by listed date; undated results go last.
pub fn sort_newest_first(results: &mut [JobResult]) {
    results.sort_by(|a, b| {
        let a_missing = a.listed_date == NOT_AVAILABLE;
        let b_missing = b.listed_date == NOT_AVAILABLE;
        a_missing
            .cmp(&b_missing)
            .then_with(|| b.listed_date.cmp(&a.listed_date))
    });
}
