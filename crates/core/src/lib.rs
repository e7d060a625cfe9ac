//! Core library for tocsplit
//!
//! This crate is the **Functional Core** of tocsplit: it splits a document
//! that has already been extracted into pages of text fragments into logical
//! sections, using the document's own table of contents as ground truth.
//!
//! - Pure functions only, no I/O. The `tocsplit` binary reads files and
//!   prints results.
//! - Every call builds fresh state; nothing is shared between documents.
//!
//! # Pipeline
//!
//! 1. [`toc::build_toc`] scans every fragment for a TOC caption and collects
//!    `number -> title` entries until a page-number line closes the block.
//! 2. If entries were found, [`sections::build_sections`] makes a second pass
//!    and cuts a new section at each body line matching an entry. Otherwise
//!    [`sections::build_fallback`] returns one whole-document section.
//! 3. [`validate::validate_with`] inspects the result for gaps, empty sections and
//!    inverted ranges, told whether the fallback path ran. The report never
//!    changes the sections.
//!
//! ```rust
//! use tocsplit_core::{segment, Page};
//!
//! let pages = vec![
//!     Page::new(0, ["목차", "1. 개요", "2. 목표", "- 1 -"]),
//!     Page::new(1, ["1. 개요", "배경 설명"]),
//!     Page::new(2, ["2. 목표", "목표 설명"]),
//! ];
//! let result = segment(&pages).unwrap();
//! assert_eq!(result.sections.len(), 2);
//! assert!(result.report.passed);
//! ```

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

pub mod normalize;
pub mod parser;
pub mod sections;
pub mod toc;
pub mod types;
pub mod validate;

pub use normalize::normalize;
pub use parser::{extract_numbering, is_page_number, is_toc_caption, Numbering, Scheme};
pub use sections::{build_fallback, build_sections, match_heading};
pub use toc::build_toc;
pub use types::*;
pub use validate::{validate, validate_with};

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Invalid page data: {0}")]
    Deserialize(String),
}

impl From<serde_json::Error> for SegmentError {
    fn from(e: serde_json::Error) -> Self {
        SegmentError::Deserialize(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Runs the segmentation pipeline with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    options: SegmentOptions,
}

impl Segmenter {
    pub fn new(options: SegmentOptions) -> Self {
        Segmenter { options }
    }

    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Split `pages` into sections and validate the result.
    ///
    /// Fails only when the page sequence itself is malformed. A document
    /// without a usable TOC yields the single fallback section.
    pub fn segment(&self, pages: &[Page]) -> Result<Segmentation, SegmentError> {
        check_pages(pages)?;

        let toc = build_toc(pages);
        let used_fallback = toc.is_empty();
        let sections = if used_fallback {
            build_fallback(pages, &self.options.fallback_title)
        } else {
            build_sections(pages, &toc)
        };
        let report = validate_with(&sections, used_fallback);

        info!(
            "Segmented {} pages: {} TOC entries, {} sections{}",
            pages.len(),
            toc.len(),
            sections.len(),
            if used_fallback { " (fallback)" } else { "" }
        );
        if !report.passed {
            warn!(
                "Validation failed: {} empty, {} gaps, {} inverted, {} overlapping",
                report.empty_sections.len(),
                report.gaps.len(),
                report.inverted_ranges.len(),
                report.overlaps.len()
            );
        }

        Ok(Segmentation {
            toc,
            sections,
            report,
            used_fallback,
        })
    }
}

/// Segment `pages` with default options.
pub fn segment(pages: &[Page]) -> Result<Segmentation, SegmentError> {
    Segmenter::default().segment(pages)
}

/// Parse a page sequence from JSON.
///
/// Accepts either a bare array of pages or an object with a `pages` field.
/// Pages missing `index` or `fragments` are rejected.
pub fn parse_pages(json: &str) -> Result<Vec<Page>, SegmentError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PageInput {
        Bare(Vec<Page>),
        Wrapped { pages: Vec<Page> },
    }

    let pages = match serde_json::from_str::<PageInput>(json) {
        Ok(PageInput::Bare(pages)) | Ok(PageInput::Wrapped { pages }) => pages,
        // Re-parse as the bare form so the error names the offending field.
        Err(_) => serde_json::from_str::<Vec<Page>>(json)?,
    };
    check_pages(&pages)?;
    Ok(pages)
}

/// Parse a previously serialized section list.
pub fn parse_sections(json: &str) -> Result<Vec<Section>, SegmentError> {
    Ok(serde_json::from_str(json)?)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Page indices must be strictly ascending.
fn check_pages(pages: &[Page]) -> Result<(), SegmentError> {
    match pages
        .windows(2)
        .find(|pair| pair[1].index <= pair[0].index)
    {
        Some(pair) => Err(SegmentError::MalformedInput(format!(
            "page index {} follows page index {}",
            pair[1].index, pair[0].index
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_pages_accepts_ascending() {
        let pages = vec![Page::new(0, ["a"]), Page::new(1, ["b"]), Page::new(4, ["c"])];
        assert!(check_pages(&pages).is_ok());
    }

    #[test]
    fn test_check_pages_rejects_duplicates() {
        let pages = vec![Page::new(0, ["a"]), Page::new(0, ["b"])];
        assert!(matches!(
            check_pages(&pages),
            Err(SegmentError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_segment_rejects_decreasing_indices() {
        let pages = vec![Page::new(2, ["a"]), Page::new(1, ["b"])];
        assert!(segment(&pages).is_err());
    }

    #[test]
    fn test_segment_empty_input() {
        let result = segment(&[]).unwrap();
        assert!(result.sections.is_empty());
        assert!(!result.report.passed);
        assert!(result.used_fallback);
    }

    #[test]
    fn test_segment_uses_fallback_title_option() {
        let segmenter = Segmenter::new(SegmentOptions {
            fallback_title: "whole document".to_string(),
        });
        let result = segmenter.segment(&[Page::new(0, ["text"])]).unwrap();
        assert!(result.used_fallback);
        assert_eq!(result.sections[0].title, "whole document");
        assert!(result.report.passed);
    }

    #[test]
    fn test_parse_pages_bare_array() {
        let pages = parse_pages(r#"[{"index":0,"fragments":["a","b"]}]"#).unwrap();
        assert_eq!(pages, vec![Page::new(0, ["a", "b"])]);
    }

    #[test]
    fn test_parse_pages_wrapped() {
        let pages = parse_pages(r#"{"pages":[{"index":0,"fragments":[]}]}"#).unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_parse_pages_missing_field() {
        let err = parse_pages(r#"[{"index":0}]"#).unwrap_err();
        assert!(matches!(err, SegmentError::Deserialize(_)));
        assert!(err.to_string().contains("fragments"));
    }

    #[test]
    fn test_parse_pages_negative_index() {
        assert!(parse_pages(r#"[{"index":-1,"fragments":[]}]"#).is_err());
    }

    #[test]
    fn test_parse_pages_out_of_order() {
        let err = parse_pages(
            r#"[{"index":1,"fragments":[]},{"index":0,"fragments":[]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, SegmentError::MalformedInput(_)));
    }

    #[test]
    fn test_parse_sections_round_trip() {
        let sections = vec![Section {
            number: "1".to_string(),
            title: "개요".to_string(),
            content: vec!["a".to_string(), "b".to_string()],
            start_page: 3,
            end_page: 4,
        }];
        let json = serde_json::to_string(&sections).unwrap();
        assert_eq!(parse_sections(&json).unwrap(), sections);
    }
}
