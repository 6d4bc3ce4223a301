//! Match scoring: pluggable, trait-based scorer for a posting against a resume.
//!
//! Default: `KeywordMatchScorer` (catalog skill overlap, deterministic, no network).
//! With `ANTHROPIC_API_KEY` set: `LlmMatchScorer`.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, chosen at startup.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extraction::skills::SkillExtractor;
use crate::llm_client::prompts::INTEGER_ONLY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::matching::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM};

/// Outcome of one scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "percent", rename_all = "snake_case")]
pub enum MatchScore {
    /// 0 – 100
    Percent(u8),
    /// The scorer answered, but not with a usable number.
    Unknown,
    /// The scorer could not be reached.
    Failed,
}

impl MatchScore {
    /// Parses a bare integer answer; anything else is `Unknown`.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().parse::<u8>() {
            Ok(percent) if percent <= 100 => MatchScore::Percent(percent),
            _ => MatchScore::Unknown,
        }
    }
}

#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, job_description: &str, resume_text: &str) -> MatchScore;

    /// "keyword" or "llm", echoed in match responses.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer
// ────────────────────────────────────────────────────────────────────────────

/// Share of the posting's catalog skills that also appear in the resume.
pub struct KeywordMatchScorer {
    skills: Arc<SkillExtractor>,
}

impl KeywordMatchScorer {
    pub fn new(skills: Arc<SkillExtractor>) -> Self {
        Self { skills }
    }
}

#[async_trait]
impl MatchScorer for KeywordMatchScorer {
    async fn score(&self, job_description: &str, resume_text: &str) -> MatchScore {
        let wanted = self.skills.extract_from_text(job_description);
        if wanted.is_empty() {
            return MatchScore::Unknown;
        }
        let held = self.skills.extract_from_text(resume_text);
        let covered = wanted.intersection(&held).count();
        let percent = (covered as f64 / wanted.len() as f64 * 100.0).round() as u8;
        MatchScore::Percent(percent)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmMatchScorer
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmMatchScorer(pub LlmClient);

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn score(&self, job_description: &str, resume_text: &str) -> MatchScore {
        let prompt = MATCH_PROMPT_TEMPLATE
            .replace("{job_description}", job_description)
            .replace("{resume_text}", resume_text);
        let system = format!("{MATCH_SYSTEM} {INTEGER_ONLY_INSTRUCTION}");

        match self.0.complete(&prompt, &system).await {
            Ok(answer) => MatchScore::from_answer(&answer),
            Err(e) => {
                warn!("Error calculating match percentage: {e}");
                MatchScore::Failed
            }
        }
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword_scorer(skills: &[&str]) -> KeywordMatchScorer {
        let skills: Vec<String> = skills.iter().map(|s| s.to_string()).collect();
        KeywordMatchScorer::new(Arc::new(SkillExtractor::new(&skills).unwrap()))
    }

    #[test]
    fn test_from_answer_accepts_bare_integers() {
        assert_eq!(MatchScore::from_answer("87"), MatchScore::Percent(87));
        assert_eq!(MatchScore::from_answer(" 0\n"), MatchScore::Percent(0));
        assert_eq!(MatchScore::from_answer("100"), MatchScore::Percent(100));
    }

    #[test]
    fn test_from_answer_rejects_everything_else() {
        for answer in ["87%", "101", "-5", "about 80", "", "4.5"] {
            assert_eq!(MatchScore::from_answer(answer), MatchScore::Unknown, "{answer:?}");
        }
    }

    #[test]
    fn test_match_score_serialization() {
        assert_eq!(
            serde_json::to_value(MatchScore::Percent(70)).unwrap(),
            serde_json::json!({"status": "percent", "percent": 70})
        );
        assert_eq!(
            serde_json::to_value(MatchScore::Failed).unwrap(),
            serde_json::json!({"status": "failed"})
        );
    }

    #[tokio::test]
    async fn test_keyword_scorer_full_coverage() {
        let scorer = keyword_scorer(&["Rust", "Kafka"]);
        let score = scorer
            .score("We need Rust and Kafka.", "Built Kafka consumers in Rust")
            .await;
        assert_eq!(score, MatchScore::Percent(100));
    }

    #[tokio::test]
    async fn test_keyword_scorer_partial_coverage_rounds() {
        let scorer = keyword_scorer(&["Rust", "Kafka", "AWS"]);
        let score = scorer.score("Rust, Kafka, AWS", "Rust only").await;
        assert_eq!(score, MatchScore::Percent(33));
    }

    #[tokio::test]
    async fn test_keyword_scorer_no_skills_in_posting_is_unknown() {
        let scorer = keyword_scorer(&["Rust"]);
        assert_eq!(
            scorer.score("Friendly team, great snacks", "Rust").await,
            MatchScore::Unknown
        );
        assert_eq!(scorer.backend(), "keyword");
    }
}
