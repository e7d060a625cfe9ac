use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Numbering convention a heading was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// `1`, `1.1`, `1-1-1` followed by a title.
    Decimal,
    /// `가.` / `가)`
    Hangul,
    /// `(가)`
    HangulParen,
    /// `IV.` / `iv)`
    Roman,
    /// `(IV)`
    RomanParen,
    /// `A.` / `a)`
    Latin,
    /// `(a)`
    LatinParen,
    /// `1-가`, `1-a`
    Hybrid,
    /// A multi-level decimal number alone on its line.
    BareDecimal,
}

/// A line split into its numbering token and the title that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numbering {
    pub scheme: Scheme,
    pub number: String,
    /// Empty when the line carries only the number.
    pub title: String,
}

impl Numbering {
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

struct Rule {
    scheme: Scheme,
    pattern: &'static str,
    extract: fn(Scheme, &Captures) -> Option<Numbering>,
}

const HANGUL_ENUM: &str = "가나다라마바사아자차카타파하";

/// Grammars in precedence order. The first rule whose extractor accepts the
/// line wins; reordering changes how ambiguous lines split.
const RULES: &[Rule] = &[
    Rule {
        scheme: Scheme::Decimal,
        pattern: r"^(\d+(?:[.\-]\d+)*)(?:[.)]\s*|\s+)(\D.*)$",
        extract: number_and_title,
    },
    // Multi-level numbers may run straight into the title (`1.1연구 배경`).
    // Single-level ones may not: `2024년 계획` is prose.
    Rule {
        scheme: Scheme::Decimal,
        pattern: r"^(\d+(?:[.\-]\d+)+)([^\d.\-)\s].*)$",
        extract: number_and_title,
    },
    Rule {
        scheme: Scheme::Hangul,
        pattern: r"^([{H}])[.)]\s*(.*)$",
        extract: number_and_title,
    },
    Rule {
        scheme: Scheme::HangulParen,
        pattern: r"^[(（]([{H}])[)）]\s*(.*)$",
        extract: number_and_title,
    },
    Rule {
        scheme: Scheme::Roman,
        pattern: r"^([IVX]+|[ivx]+)[.)]\s*(.*)$",
        extract: roman_and_title,
    },
    Rule {
        scheme: Scheme::RomanParen,
        pattern: r"^[(（]([IVX]+|[ivx]+)[)）]\s*(.*)$",
        extract: roman_and_title,
    },
    Rule {
        scheme: Scheme::Latin,
        pattern: r"^([A-Za-z])[.)]\s*(.*)$",
        extract: number_and_title,
    },
    Rule {
        scheme: Scheme::LatinParen,
        pattern: r"^[(（]([A-Za-z])[)）]\s*(.*)$",
        extract: number_and_title,
    },
    Rule {
        scheme: Scheme::Hybrid,
        pattern: r"^(\d+-(?:[{H}]|[A-Za-z]))(?:[.)]\s*|\s+|$)(.*)$",
        extract: number_and_title,
    },
    Rule {
        scheme: Scheme::BareDecimal,
        pattern: r"^(\d+(?:[.\-]\d+)*)[.)]?$",
        extract: number_only,
    },
];

struct CompiledRule {
    regex: Regex,
    rule: &'static Rule,
}

fn compiled_rules() -> &'static [CompiledRule] {
    static COMPILED: OnceLock<Vec<CompiledRule>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        RULES
            .iter()
            .map(|rule| CompiledRule {
                regex: Regex::new(&rule.pattern.replace("{H}", HANGUL_ENUM)).unwrap(),
                rule,
            })
            .collect()
    })
}

/// Split a line into `(number, title)` using the first grammar that accepts it.
///
/// Returns `None` when no grammar matches. A match whose title is empty is a
/// distinct outcome: the title is expected on the next line.
pub fn extract_numbering(line: &str) -> Option<Numbering> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    compiled_rules().iter().find_map(|compiled| {
        let caps = compiled.regex.captures(line)?;
        (compiled.rule.extract)(compiled.rule.scheme, &caps)
    })
}

fn number_and_title(scheme: Scheme, caps: &Captures) -> Option<Numbering> {
    Some(Numbering {
        scheme,
        number: caps.get(1)?.as_str().to_string(),
        title: caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
    })
}

fn number_only(scheme: Scheme, caps: &Captures) -> Option<Numbering> {
    Some(Numbering {
        scheme,
        number: caps.get(1)?.as_str().to_string(),
        title: String::new(),
    })
}

fn roman_and_title(scheme: Scheme, caps: &Captures) -> Option<Numbering> {
    let numeral = caps.get(1)?.as_str();
    if !is_roman_numeral(numeral) {
        return None;
    }
    number_and_title(scheme, caps)
}

/// Well-formed numerals from 1 to 39 (`VIIII` and `IIV` are rejected).
fn is_roman_numeral(token: &str) -> bool {
    static RE_ROMAN: OnceLock<Regex> = OnceLock::new();
    let re = RE_ROMAN.get_or_init(|| Regex::new(r"^X{0,3}(?:IX|IV|V?I{0,3})$").unwrap());
    !token.is_empty() && re.is_match(&token.to_ascii_uppercase())
}
