use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Section number used for the single whole-document section.
pub const FALLBACK_NUMBER: &str = "0";

/// Title given to the fallback section unless overridden.
pub const DEFAULT_FALLBACK_TITLE: &str = "전체 문서";

/// One page of extracted text, in reading order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub fragments: Vec<String>,
}

impl Page {
    pub fn new<I, S>(index: usize, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Page {
            index,
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub number: String,
    pub title: String,
}

/// Table of contents recovered from the document, keyed by numbering token.
///
/// Keeps insertion order; the first occurrence of a numbering token wins.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Toc {
    entries: IndexMap<String, String>,
}

impl Toc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry. Returns `false` when the number was already present.
    pub fn insert(&mut self, number: impl Into<String>, title: impl Into<String>) -> bool {
        let number = number.into();
        if self.entries.contains_key(&number) {
            return false;
        }
        self.entries.insert(number, title.into());
        true
    }

    pub fn get(&self, number: &str) -> Option<&str> {
        self.entries.get(number).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(number, title)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(number, title)| (number.as_str(), title.as_str()))
    }

    pub fn to_entries(&self) -> Vec<TocEntry> {
        self.iter()
            .map(|(number, title)| TocEntry {
                number: number.to_string(),
                title: title.to_string(),
            })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub number: String,
    pub title: String,
    pub content: Vec<String>,
    pub start_page: usize,
    pub end_page: usize,
}

impl Section {
    pub fn is_fallback(&self) -> bool {
        self.number == FALLBACK_NUMBER
    }
}

/// Pages missing between two adjacent sections.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PageGap {
    pub after: String,
    pub before: String,
    pub missing_pages: Vec<usize>,
}

/// Two adjacent sections whose page ranges cross.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RangeOverlap {
    pub first: String,
    pub second: String,
    pub first_end: usize,
    pub second_start: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InvertedRange {
    pub number: String,
    pub start_page: usize,
    pub end_page: usize,
}

/// Diagnostic summary of a section list. Never feeds back into segmentation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub section_count: usize,
    pub is_fallback: bool,
    pub empty_sections: Vec<String>,
    pub gaps: Vec<PageGap>,
    pub inverted_ranges: Vec<InvertedRange>,
    pub overlaps: Vec<RangeOverlap>,
    pub passed: bool,
}

impl ValidationReport {
    pub fn empty_count(&self) -> usize {
        self.empty_sections.len()
    }

    pub fn has_problems(&self) -> bool {
        !self.empty_sections.is_empty()
            || !self.gaps.is_empty()
            || !self.inverted_ranges.is_empty()
            || !self.overlaps.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SegmentOptions {
    pub fallback_title: String,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        SegmentOptions {
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
        }
    }
}

/// Output of one pipeline run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub toc: Toc,
    pub sections: Vec<Section>,
    pub report: ValidationReport,
    pub used_fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toc_first_occurrence_wins() {
        let mut toc = Toc::new();
        assert!(toc.insert("1", "개요"));
        assert!(!toc.insert("1", "다른 제목"));
        assert_eq!(toc.get("1"), Some("개요"));
        assert_eq!(toc.len(), 1);
    }

    #[test]
    fn test_toc_keeps_insertion_order() {
        let mut toc = Toc::new();
        toc.insert("2", "목표");
        toc.insert("1", "개요");
        toc.insert("가", "세부");
        let numbers: Vec<&str> = toc.iter().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec!["2", "1", "가"]);
    }

    #[test]
    fn test_toc_serializes_as_ordered_object() {
        let mut toc = Toc::new();
        toc.insert("3", "결론");
        toc.insert("1", "개요");
        let json = serde_json::to_string(&toc).unwrap();
        assert_eq!(json, r#"{"3":"결론","1":"개요"}"#);
        let back: Toc = serde_json::from_str(&json).unwrap();
        assert_eq!(back, toc);
    }

    #[test]
    fn test_section_json_field_names() {
        let section = Section {
            number: "1.1".to_string(),
            title: "연구 배경".to_string(),
            content: vec!["a".to_string()],
            start_page: 2,
            end_page: 3,
        };
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["number"], "1.1");
        assert_eq!(value["start_page"], 2);
        assert_eq!(value["end_page"], 3);
        assert_eq!(value["content"][0], "a");
    }

    #[test]
    fn test_default_options() {
        assert_eq!(SegmentOptions::default().fallback_title, "전체 문서");
    }

    #[test]
    fn test_report_has_problems() {
        let mut report = ValidationReport::default();
        assert!(!report.has_problems());
        report.empty_sections.push("1".to_string());
        assert!(report.has_problems());
        assert_eq!(report.empty_count(), 1);
    }
}
