use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::NOT_SPECIFIED;

/// Salary patterns, highest priority first. Amounts stay opaque text.
static SALARY_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        // "$120,000 - $150,000", "$163k – $204k"
        r"(?i)\$\s*(?:\d{2,3},?\d{3}|\d{2,3}K)\s*[–—-]\s*\$\s*(?:\d{2,3},?\d{3}|\d{2,3}K)",
        // "$120,000 - 150,000"
        r"(?i)\$\s*\d{2,3},?\d{3}\s*[–—-]\s*\d{2,3},?\d{3}",
        // "USD $120,000"
        r"(?i)(?:USD|CAD)?\s*\$\s*\d{2,3},?\d{3}",
        // "salary up to $120,000"
        r"(?i)(?:salary|compensation|pay).{0,20}\$\s*\d{2,3},?\d{3}",
    ]
    .map(|p| Regex::new(p).expect("salary pattern is valid"))
});

/// Returns the first salary-looking substring of the raw posting text.
pub fn extract_salary(text: &str) -> String {
    SALARY_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}
