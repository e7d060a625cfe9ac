use crate::types::{InvertedRange, PageGap, RangeOverlap, Section, ValidationReport};

/// Inspect a section list for segmentation defects.
///
/// The list is taken to be the whole-document fallback when it holds exactly
/// one section numbered [`FALLBACK_NUMBER`](crate::FALLBACK_NUMBER). Use
/// [`validate_with`] when the caller knows whether the fallback path ran.
pub fn validate(sections: &[Section]) -> ValidationReport {
    let is_fallback = sections.len() == 1 && sections[0].is_fallback();
    validate_with(sections, is_fallback)
}

/// Inspect a section list whose fallback status is already known.
///
/// Reports empty sections, pages missing between adjacent sections, adjacent
/// ranges that cross, and sections whose start lies after their end. The
/// report passes when the list is non-empty and either is the whole-document
/// fallback or shows none of those defects.
pub fn validate_with(sections: &[Section], is_fallback: bool) -> ValidationReport {
    let empty_sections = sections
        .iter()
        .filter(|s| s.content.is_empty())
        .map(|s| s.number.clone())
        .collect();

    let gaps = sections
        .windows(2)
        .filter(|pair| pair[1].start_page > pair[0].end_page.saturating_add(1))
        .map(|pair| PageGap {
            after: pair[0].number.clone(),
            before: pair[1].number.clone(),
            missing_pages: (pair[0].end_page.saturating_add(1)..pair[1].start_page).collect(),
        })
        .collect();

    let overlaps = sections
        .windows(2)
        .filter(|pair| pair[0].end_page > pair[1].start_page)
        .map(|pair| RangeOverlap {
            first: pair[0].number.clone(),
            second: pair[1].number.clone(),
            first_end: pair[0].end_page,
            second_start: pair[1].start_page,
        })
        .collect();

    let inverted_ranges = sections
        .iter()
        .filter(|s| s.start_page > s.end_page)
        .map(|s| InvertedRange {
            number: s.number.clone(),
            start_page: s.start_page,
            end_page: s.end_page,
        })
        .collect();

    let mut report = ValidationReport {
        section_count: sections.len(),
        is_fallback: is_fallback && !sections.is_empty(),
        empty_sections,
        gaps,
        inverted_ranges,
        overlaps,
        passed: false,
    };
    report.passed = !sections.is_empty() && (report.is_fallback || !report.has_problems());
    report
}
