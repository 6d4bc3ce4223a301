use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::sections::SectionMap;
use crate::extraction::NOT_SPECIFIED;

/// Year-requirement patterns, highest priority first.
static EXPERIENCE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // "5+ years experience", "2-4 yrs of work"
        r"(?i)(\d+\s*-\s*\d+|\d+\+?)\s*(?:years|yrs)\s*(?:of\s+)?(?:experience|exp|work)?",
        // "Experience: 3-5 years"
        r"(?i)(?:experience|exp|work)\s*:\s*(\d+\s*-\s*\d+|\d+\+?)\s*(?:years|yrs)?",
        // "at least 3+ years of experience"
        r"(?i)(?:at least|minimum of|requires)\s*(\d+\+?)\s*(?:years|yrs)\s*(?:of\s+)?(?:experience|exp|work)?",
    ]
    .map(|p| Regex::new(p).expect("experience pattern is valid"))
});

/// Finds a stated experience requirement in the section keys.
///
/// Only the header keys are searched, never the section bodies. Each pattern is
/// tried against every key before the next pattern is tried.
pub fn extract_experience_level(sections: &SectionMap) -> String {
    EXPERIENCE_PATTERNS
        .iter()
        .find_map(|pattern| sections.keys().find_map(|key| pattern.find(key)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}
