//! Extraction pipeline: segment → (skills, experience) over sections, salary over raw text.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extraction::catalog::ExtractionCatalog;
use crate::extraction::experience::extract_experience_level;
use crate::extraction::salary::extract_salary;
use crate::extraction::sections::SectionSegmenter;
use crate::extraction::skills::SkillExtractor;

/// Structured fields pulled out of one posting description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub skills: BTreeSet<String>,
    pub experience_level: String,
    pub salary: String,
}

/// Built once from a catalog and shared read-only across workers.
#[derive(Debug, Clone)]
pub struct ExtractionPipeline {
    segmenter: SectionSegmenter,
    skills: SkillExtractor,
}

impl ExtractionPipeline {
    pub fn new(catalog: &ExtractionCatalog) -> Result<Self, regex::Error> {
        Ok(Self {
            segmenter: SectionSegmenter::new(catalog),
            skills: SkillExtractor::new(&catalog.technical_skills)?,
        })
    }

    pub fn process(&self, raw_text: &str) -> ExtractedRecord {
        let sections = self.segmenter.segment(raw_text);
        if sections.is_empty() {
            debug!("No section headers found");
        } else {
            debug!("Segmented posting into {} sections", sections.len());
        }
        ExtractedRecord {
            skills: self.skills.extract(&sections),
            experience_level: extract_experience_level(&sections),
            salary: extract_salary(raw_text),
        }
    }

    pub fn skill_extractor(&self) -> &SkillExtractor {
        &self.skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Fixture: a typical sectioned posting
    const SECTIONED_JD: &str = r#"
        Tailscale is hiring a Software Engineer.
        Key Responsibilities:
        • Work with CI/CD, Secrets Management, and Observability tools.
        • Build infrastructure as code solutions.
        • Work with Go, SQL, and Networking, Distributed Systems, and Cloud.

        Qualifications:
        - 5+ years of experience in software engineering.
        - Experience with SQL, Go, and Networking.

        Preferred Qualifications:
        - Experience with CI/CD, Secrets Management, and Observability tools.
        - Experience with infrastructure as code solutions.

        US Pay Ranges:
        $163k - $204k USD
        US citizen only
        Must be authorized to work in the US.
    "#;

    // Fixture: a single run-on paragraph with inline headers
    const RUN_ON_JD: &str = "A leading firm is seeking a Java Developer.ResponsibilitiesDevelop \
        low-latency systems.RequirementsMust have 3+ years of experience.Strong Java 8+ skills, \
        with proficiency in SQL and Python.";

    fn pipeline() -> ExtractionPipeline {
        ExtractionPipeline::new(&ExtractionCatalog::default()).unwrap()
    }

    #[test]
    fn test_sectioned_posting_extracts_all_fields() {
        let record = pipeline().process(SECTIONED_JD);
        for skill in ["Go", "SQL", "CI/CD", "Distributed Systems", "Cloud"] {
            assert!(record.skills.contains(skill), "missing {skill}");
        }
        assert!(!record.skills.contains("Golang"));
        assert_eq!(record.experience_level, "5+ years of experience");
        assert_eq!(record.salary, "$163k - $204k");
    }

    #[test]
    fn test_run_on_paragraph_is_one_section() {
        let record = pipeline().process(RUN_ON_JD);
        assert!(record.skills.contains("Java"));
        assert!(record.skills.contains("Python"));
        assert!(record.skills.contains("SQL"));
        assert_eq!(record.experience_level, "3+ years of experience");
        assert_eq!(record.salary, "Not specified");
    }

    #[test]
    fn test_process_is_deterministic() {
        let p = pipeline();
        let first = p.process(SECTIONED_JD);
        let second = p.process(SECTIONED_JD);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_empty_description_yields_sentinels() {
        let record = pipeline().process("");
        assert!(record.skills.is_empty());
        assert_eq!(record.experience_level, "Not specified");
        assert_eq!(record.salary, "Not specified");
    }

    #[test]
    fn test_salary_found_outside_any_section() {
        let record = pipeline().process("Pay: $90,000 - $110,000\nNo headers here.");
        assert_eq!(record.salary, "$90,000 - $110,000");
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_small_synthetic_catalog() {
        let catalog = ExtractionCatalog {
            responsibilities_headers: vec!["Tasks".to_string()],
            qualifications_headers: vec![],
            preferred_headers: vec![],
            technical_skills: vec!["Zig".to_string()],
        };
        let record = ExtractionPipeline::new(&catalog)
            .unwrap()
            .process("Tasks\n- Write Zig and Rust");
        assert_eq!(record.skills.into_iter().collect::<Vec<_>>(), vec!["Zig"]);
    }
}
