//! Section segmentation: splits posting text into header-labelled runs of lines.

use serde::Serialize;

use crate::extraction::catalog::ExtractionCatalog;

/// One detected section: the lower-cased header line and the lines attributed to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub key: String,
    pub lines: Vec<String>,
}

/// Sections keyed by their lower-cased header line, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Starts a section under `key` and returns its index. A repeated key is
    /// emptied in place rather than appended again.
    fn open(&mut self, key: String) -> usize {
        match self.sections.iter().position(|s| s.key == key) {
            Some(idx) => {
                self.sections[idx].lines.clear();
                idx
            }
            None => {
                self.sections.push(Section {
                    key,
                    lines: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }
}

/// Detects section headers by case-insensitive keyword containment.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    header_keywords: Vec<String>,
}

impl SectionSegmenter {
    pub fn new(catalog: &ExtractionCatalog) -> Self {
        Self {
            header_keywords: catalog.header_keywords(),
        }
    }

    /// Splits `text` into sections.
    ///
    /// A trimmed, non-blank line whose lower-cased form contains any header keyword
    /// opens a section keyed by that whole lower-cased line; the header line is the
    /// section's first entry. Lines before the first header are dropped.
    pub fn segment(&self, text: &str) -> SectionMap {
        let mut map = SectionMap::default();
        let mut current: Option<usize> = None;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let lowered = line.to_lowercase();
            if self.is_header(&lowered) {
                let idx = map.open(lowered);
                map.sections[idx].lines.push(line.to_string());
                current = Some(idx);
            } else if let Some(idx) = current {
                map.sections[idx].lines.push(line.to_string());
            }
        }

        map
    }

    fn is_header(&self, lowered_line: &str) -> bool {
        self.header_keywords
            .iter()
            .any(|keyword| lowered_line.contains(keyword.as_str()))
    }
}

#[cfg(test)]
impl SectionMap {
    pub(crate) fn get(&self, key: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.lines.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> SectionSegmenter {
        SectionSegmenter::new(&ExtractionCatalog::default())
    }

    #[test]
    fn test_two_headers_produce_two_sections() {
        let text = "Key Responsibilities:\n- Build APIs\n\nQualifications:\n- 5+ years Python";
        let map = segmenter().segment(text);

        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("key responsibilities:").unwrap(),
            ["Key Responsibilities:", "- Build APIs"]
        );
        assert_eq!(
            map.get("qualifications:").unwrap(),
            ["Qualifications:", "- 5+ years Python"]
        );
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["key responsibilities:", "qualifications:"]);
    }

    #[test]
    fn test_no_headers_yields_empty_map() {
        let map = segmenter().segment("We are a company.\nWe build things.\n");
        assert!(map.is_empty());
    }

    #[test]
    fn test_lines_before_first_header_are_dropped() {
        let text = "Acme is hiring.\nGreat culture.\nRequirements\n- Rust";
        let map = segmenter().segment(text);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("requirements").unwrap(), ["Requirements", "- Rust"]);
    }

    #[test]
    fn test_key_is_full_line_not_matched_keyword() {
        let text = "Core Skills\n- Go\nSkills we value\n- Rust";
        let map = segmenter().segment(text);
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["core skills", "skills we value"]);
    }

    #[test]
    fn test_synonym_headers_are_not_merged() {
        let text = "Requirements:\n- A\nQualifications:\n- B";
        let map = segmenter().segment(text);
        assert_eq!(map.len(), 2);
        assert!(map.get("requirements:").is_some());
        assert!(map.get("qualifications:").is_some());
    }

    #[test]
    fn test_repeated_header_resets_section_in_place() {
        let text = "Duties\n- first\nSkills\n- middle\nDuties\n- second";
        let map = segmenter().segment(text);
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["duties", "skills"]);
        assert_eq!(map.get("duties").unwrap(), ["Duties", "- second"]);
    }

    #[test]
    fn test_lines_are_trimmed_and_blank_lines_skipped() {
        let text = "   Responsibilities:   \n\n     \n    - Ship code   ";
        let map = segmenter().segment(text);
        assert_eq!(
            map.get("responsibilities:").unwrap(),
            ["Responsibilities:", "- Ship code"]
        );
    }

    #[test]
    fn test_custom_catalog_headers() {
        let catalog = ExtractionCatalog {
            responsibilities_headers: vec!["Mission".to_string()],
            qualifications_headers: vec![],
            preferred_headers: vec![],
            technical_skills: vec![],
        };
        let map = SectionSegmenter::new(&catalog).segment("Responsibilities\n- x\nOUR MISSION\n- y");
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["our mission"]);
    }

    #[test]
    fn test_output_never_exceeds_line_count() {
        let text = "Skills\nSkills 2\nSkills 3\nplain";
        let map = segmenter().segment(text);
        let total: usize = map.iter().map(|s| s.lines.len()).sum();
        assert!(total <= text.lines().count());
    }
}
