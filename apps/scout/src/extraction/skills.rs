use std::collections::BTreeSet;

use regex::{RegexSet, RegexSetBuilder};

use crate::extraction::sections::SectionMap;

/// Whole-word, case-insensitive matcher over the skill catalog.
///
/// Every catalog entry compiles to `\b<escaped entry>\b`, so "Go" matches "Go-based"
/// and "Go," but not "Google", "Django" or "Golang".
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    names: Vec<String>,
    patterns: RegexSet,
}

impl SkillExtractor {
    pub fn new(skills: &[String]) -> Result<Self, regex::Error> {
        let patterns = RegexSetBuilder::new(
            skills
                .iter()
                .map(|skill| format!(r"\b{}\b", regex::escape(skill))),
        )
        .case_insensitive(true)
        .build()?;

        Ok(Self {
            names: skills.to_vec(),
            patterns,
        })
    }

    /// Catalog skills mentioned on any line of any section.
    pub fn extract(&self, sections: &SectionMap) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        for section in sections.iter() {
            for line in &section.lines {
                self.collect_into(line, &mut found);
            }
        }
        found
    }

    /// Catalog skills mentioned anywhere in free text.
    pub fn extract_from_text(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        for line in text.lines() {
            self.collect_into(line, &mut found);
        }
        found
    }

    fn collect_into(&self, line: &str, found: &mut BTreeSet<String>) {
        for idx in self.patterns.matches(line).into_iter() {
            found.insert(self.names[idx].clone());
        }
    }
}
