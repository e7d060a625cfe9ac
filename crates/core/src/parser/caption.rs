use std::sync::OnceLock;

use regex::Regex;

/// True when the fragment is a "table of contents" caption.
///
/// Accepts `목차`, `차례`, `contents` and `table of contents`, case-insensitive,
/// with inner spacing (`목 차`) and optionally wrapped in square, angle or
/// corner brackets (`[목차]`, `<목차>`, `〈목차〉`, `【 목 차 】`).
pub fn is_toc_caption(fragment: &str) -> bool {
    static RE_CAPTION: OnceLock<Regex> = OnceLock::new();
    let re = RE_CAPTION.get_or_init(|| {
        Regex::new(
            r"(?i)^[\[<〈《【(（]?\s*(?:목\s*차|차\s*례|contents|table\s+of\s+contents)\s*[\]>〉》】)）]?$",
        )
        .unwrap()
    });
    re.is_match(fragment.trim())
}

/// True when the fragment is nothing but a page number, optionally wrapped in
/// dashes and spaces (`12`, `- 12 -`, `—3—`).
pub fn is_page_number(fragment: &str) -> bool {
    static RE_PAGE: OnceLock<Regex> = OnceLock::new();
    let re = RE_PAGE.get_or_init(|| Regex::new(r"^[-–—]?\s*\d+\s*[-–—]?$").unwrap());
    re.is_match(fragment.trim())
}
