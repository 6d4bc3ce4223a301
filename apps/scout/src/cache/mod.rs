//! Processed-posting cache: the idempotency guard for batch processing.
//!
//! `ProcessedCache` owns key formatting, serialization, and the TTL, and swallows
//! backend failures (logged, never raised) so a cache outage cannot abort a batch.
//! Backends implement `CacheStore`; `AppState` carries the cache with the backend
//! chosen at startup (Redis when `REDIS_URL` is set, in-memory otherwise).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::jobs::models::JobResult;

pub mod memory;
pub mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Every cache key is this prefix followed by the posting id, e.g. `job:3812345678`.
pub const JOB_KEY_PREFIX: &str = "job:";
/// Default entry lifetime: 24 hours.
pub const JOB_CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 24);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A keyed string store with per-entry expiry. Operations must be atomic per key.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration)
        -> Result<(), CacheError>;
    async fn exists(&self, key: &str) -> Result<bool, CacheError>;
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

#[derive(Clone)]
pub struct ProcessedCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl ProcessedCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn cache_key(job_id: &str) -> String {
        format!("{JOB_KEY_PREFIX}{job_id}")
    }

    /// True when a result for `job_id` is cached. Backend failures read as "not processed".
    pub async fn is_processed(&self, job_id: &str) -> bool {
        match self.store.exists(&Self::cache_key(job_id)).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!("Cache lookup failed for job {job_id}: {e}");
                false
            }
        }
    }

    /// Stores `result` under `job_id` for the configured TTL. Last write wins.
    pub async fn mark_processed(&self, job_id: &str, result: &JobResult) {
        if let Err(e) = self.try_mark_processed(job_id, result).await {
            warn!("Error caching job {job_id}: {e}");
        }
    }

    async fn try_mark_processed(&self, job_id: &str, result: &JobResult) -> Result<(), CacheError> {
        let value = serde_json::to_string(result)?;
        self.store
            .set_with_ttl(&Self::cache_key(job_id), &value, self.ttl)
            .await?;
        debug!("Cached job {job_id} for {}s", self.ttl.as_secs());
        Ok(())
    }

    pub async fn get(&self, job_id: &str) -> Option<JobResult> {
        let raw = match self.store.get(&Self::cache_key(job_id)).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Cache read failed for job {job_id}: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Cached entry for job {job_id} is not a valid job result: {e}");
                None
            }
        }
    }

    /// Drops the cached entry so the next batch reprocesses the posting.
    pub async fn forget(&self, job_id: &str) {
        if let Err(e) = self.store.delete(&Self::cache_key(job_id)).await {
            warn!("Failed to evict job {job_id} from cache: {e}");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn refused() -> CacheError {
        redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into()
    }

    /// A store whose every call fails, for exercising the swallow-and-log paths.
    pub(crate) struct BrokenStore;

    #[async_trait]
    impl CacheStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err(refused())
        }
        async fn set_with_ttl(
            &self,
            _key: &str,
            _value: &str,
            _ttl: Duration,
        ) -> Result<(), CacheError> {
            Err(refused())
        }
        async fn exists(&self, _key: &str) -> Result<bool, CacheError> {
            Err(refused())
        }
        async fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Err(refused())
        }
    }

    pub(crate) fn sample_result(title: &str) -> JobResult {
        JobResult {
            listed_date: "2025-03-01 12:00".to_string(),
            job_title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            workplace_type: "Remote".to_string(),
            skills: vec!["Go".to_string(), "SQL".to_string()],
            experience_level: "Not specified".to_string(),
            salary: "$120,000 - $150,000".to_string(),
            apply_url: "https://acme.example/apply".to_string(),
        }
    }

    fn memory_cache() -> ProcessedCache {
        ProcessedCache::new(Arc::new(MemoryStore::new()), JOB_CACHE_TTL)
    }

    #[test]
    fn test_cache_key_uses_prefix() {
        assert_eq!(ProcessedCache::cache_key("1234567890"), "job:1234567890");
    }

    #[tokio::test]
    async fn test_mark_then_is_processed_and_get() {
        let cache = memory_cache();
        assert!(!cache.is_processed("42").await);

        cache.mark_processed("42", &sample_result("Engineer")).await;

        assert!(cache.is_processed("42").await);
        assert_eq!(cache.get("42").await, Some(sample_result("Engineer")));
        assert_eq!(cache.get("43").await, None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache = memory_cache();
        cache.mark_processed("7", &sample_result("First")).await;
        cache.mark_processed("7", &sample_result("Second")).await;
        assert_eq!(cache.get("7").await.unwrap().job_title, "Second");
    }

    #[tokio::test]
    async fn test_forget_removes_entry() {
        let cache = memory_cache();
        cache.mark_processed("9", &sample_result("Engineer")).await;
        cache.forget("9").await;
        assert!(!cache.is_processed("9").await);
    }

    #[tokio::test]
    async fn test_backend_failures_are_swallowed() {
        let cache = ProcessedCache::new(Arc::new(BrokenStore), JOB_CACHE_TTL);
        cache.mark_processed("1", &sample_result("Engineer")).await;
        assert!(!cache.is_processed("1").await);
        assert_eq!(cache.get("1").await, None);
        cache.forget("1").await;
    }

    #[tokio::test]
    async fn test_undecodable_entry_reads_as_none() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_with_ttl("job:5", "not json", JOB_CACHE_TTL)
            .await
            .unwrap();
        let cache = ProcessedCache::new(store, JOB_CACHE_TTL);
        assert!(cache.is_processed("5").await);
        assert_eq!(cache.get("5").await, None);
    }
}
