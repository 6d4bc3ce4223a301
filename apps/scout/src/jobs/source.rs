//! Job source: the external posting collaborator.
//!
//! `JobSource` is the seam for whatever job board client is wired in. The service
//! itself ships `StaticJobSource`, an in-memory source built from postings supplied
//! in a request payload.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::jobs::models::{SearchHit, SearchParams};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Posting {0} not found")]
    NotFound(String),

    #[error("Posting {0} has no detail document")]
    MissingDetails(String),
}

#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search_jobs(&self, params: &SearchParams) -> Result<Vec<SearchHit>, SourceError>;

    /// Full detail document for one posting.
    async fn get_job(&self, job_id: &str) -> Result<Value, SourceError>;
}

/// Runs a search, logging a failure and treating it as no results.
pub async fn search_or_empty(source: &dyn JobSource, params: &SearchParams) -> Vec<SearchHit> {
    match source.search_jobs(params).await {
        Ok(hits) => hits,
        Err(e) => {
            warn!("Error searching for jobs ({}): {e}", params.keywords);
            Vec::new()
        }
    }
}

/// Fetches a detail document, logging a failure and returning `None`.
pub async fn details_or_none(source: &dyn JobSource, job_id: &str) -> Option<Value> {
    match source.get_job(job_id).await {
        Ok(details) => Some(details),
        Err(e) => {
            warn!("Error getting job details for {job_id}: {e}");
            None
        }
    }
}

/// A posting as supplied by a caller: the search hit plus its detail document.
#[derive(Debug, Clone, Deserialize)]
pub struct PostingPayload {
    #[serde(flatten)]
    pub hit: SearchHit,
    #[serde(default)]
    pub details: Value,
}

impl PostingPayload {
    /// Converts raw postings one by one. An entry that is not a posting at all is
    /// logged and dropped; the rest are kept.
    pub fn parse_all(raw: Vec<Value>) -> Vec<Self> {
        raw.into_iter()
            .enumerate()
            .filter_map(|(idx, value)| match serde_json::from_value(value) {
                Ok(posting) => Some(posting),
                Err(e) => {
                    warn!("Skipping malformed posting at index {idx}: {e}");
                    None
                }
            })
            .collect()
    }
}

/// In-memory source over a fixed set of postings.
#[derive(Debug, Default)]
pub struct StaticJobSource {
    hits: Vec<SearchHit>,
    details: HashMap<String, Value>,
}

impl StaticJobSource {
    pub fn new(postings: Vec<PostingPayload>) -> Self {
        let mut source = Self::default();
        for posting in postings {
            if let Some(id) = posting.hit.job_id() {
                source.details.insert(id.to_string(), posting.details);
            }
            source.hits.push(posting.hit);
        }
        source
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }
}

#[async_trait]
impl JobSource for StaticJobSource {
    /// Hits whose detail title contains `keywords` (case-insensitive), up to `limit`.
    async fn search_jobs(&self, params: &SearchParams) -> Result<Vec<SearchHit>, SourceError> {
        let needle = params.keywords.to_lowercase();
        let location = params.location_name.as_deref().map(str::to_lowercase);

        let matches = self
            .hits
            .iter()
            .filter(|hit| {
                let Some(details) = hit.job_id().and_then(|id| self.details.get(id)) else {
                    return false;
                };
                let field = |name: &str| {
                    details
                        .get(name)
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_lowercase()
                };
                field("title").contains(&needle)
                    && location
                        .as_deref()
                        .map_or(true, |loc| field("formattedLocation").contains(loc))
            })
            .take(params.limit)
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn get_job(&self, job_id: &str) -> Result<Value, SourceError> {
        match self.details.get(job_id) {
            Some(details) if details.is_object() => Ok(details.clone()),
            Some(_) => Err(SourceError::MissingDetails(job_id.to_string())),
            None => Err(SourceError::NotFound(job_id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn posting(id: &str, title: &str, location: &str) -> PostingPayload {
        PostingPayload {
            hit: SearchHit {
                entity_urn: format!("urn:li:fsd_jobPosting:{id}"),
                listed_at: None,
            },
            details: json!({ "title": title, "formattedLocation": location }),
        }
    }

    fn params(keywords: &str, location: Option<&str>, limit: usize) -> SearchParams {
        SearchParams {
            keywords: keywords.to_string(),
            location_name: location.map(str::to_string),
            limit,
        }
    }

    fn source() -> StaticJobSource {
        StaticJobSource::new(vec![
            posting("1", "Senior Software Engineer", "Austin, TX"),
            posting("2", "Backend Developer", "Remote, US"),
            posting("3", "Software Engineer II", "Seattle, WA"),
        ])
    }

    #[tokio::test]
    async fn test_search_matches_title_case_insensitively() {
        let hits = source()
            .search_jobs(&params("software engineer", None, 10))
            .await
            .unwrap();
        let ids: Vec<_> = hits.iter().filter_map(|h| h.job_id()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_search_respects_limit_and_location() {
        let src = source();
        let limited = src.search_jobs(&params("engineer", None, 1)).await.unwrap();
        assert_eq!(limited.len(), 1);

        let located = src
            .search_jobs(&params("engineer", Some("seattle"), 10))
            .await
            .unwrap();
        assert_eq!(located.len(), 1);
        assert_eq!(located[0].job_id(), Some("3"));
    }

    #[tokio::test]
    async fn test_get_job_unknown_id_is_not_found() {
        let err = source().get_job("999").await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(id) if id == "999"));
    }

    #[tokio::test]
    async fn test_details_or_none_swallows_errors() {
        let src = source();
        assert!(details_or_none(&src, "2").await.is_some());
        assert!(details_or_none(&src, "missing").await.is_none());
    }

    #[tokio::test]
    async fn test_posting_without_details_is_missing_details() {
        let src = StaticJobSource::new(PostingPayload::parse_all(vec![
            json!({ "entityUrn": "urn:li:fsd_jobPosting:8" }),
        ]));
        let err = src.get_job("8").await.unwrap_err();
        assert!(matches!(err, SourceError::MissingDetails(id) if id == "8"));
    }

    #[test]
    fn test_parse_all_drops_only_unusable_entries() {
        let parsed = PostingPayload::parse_all(vec![
            json!({ "entityUrn": "urn:li:fsd_jobPosting:1", "details": { "title": "SRE" } }),
            json!(42),
            json!({ "details": { "title": "No urn" } }),
            json!({ "entityUrn": "urn:li:fsd_jobPosting:3", "listedAt": "1700000000000" }),
        ]);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[1].hit.job_id(), None);
        assert_eq!(parsed[2].hit.listed_at, Some(1_700_000_000_000));
        assert!(parsed[2].details.is_null());
    }

    #[test]
    fn test_payload_flattens_search_hit() {
        let payload: PostingPayload = serde_json::from_value(json!({
            "entityUrn": "urn:li:fsd_jobPosting:77",
            "listedAt": 1700000000000i64,
            "details": { "title": "SRE" }
        }))
        .unwrap();
        assert_eq!(payload.hit.job_id(), Some("77"));
        assert_eq!(payload.hit.listed_at, Some(1_700_000_000_000));
        assert_eq!(payload.details["title"], "SRE");
    }
}
