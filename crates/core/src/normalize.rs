use unicode_normalization::UnicodeNormalization;

/// Reduce text to a comparison key.
///
/// Applies NFC normalization (so decomposed jamo compose into syllables),
/// lower-cases Latin letters, and drops every character that is not an ASCII
/// digit, a Latin letter, or a Hangul syllable. Whitespace and punctuation
/// disappear entirely. The result is for equality/containment checks only and
/// is never shown to a reader.
pub fn normalize(text: &str) -> String {
    text.nfc()
        .filter(|c| is_kept(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_kept(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_alphabetic() || is_hangul_syllable(c)
}

#[inline]
pub(crate) fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// True when either normalized text contains the other.
pub fn loosely_equal(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    a.contains(&b) || b.contains(&a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_whitespace_and_punctuation() {
        assert_eq!(normalize("1. 연구  배경!"), "1연구배경");
    }

    #[test]
    fn test_lowercases_latin() {
        assert_eq!(normalize("Table Of Contents"), "tableofcontents");
    }

    #[test]
    fn test_drops_non_hangul_cjk() {
        assert_eq!(normalize("日本 abc 가"), "abc가");
    }

    #[test]
    fn test_composes_jamo() {
        // ᄀ + ᅡ composes to 가 under NFC
        assert_eq!(normalize("\u{1100}\u{1161}"), "가");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" - · - "), "");
    }

    #[test]
    fn test_loosely_equal_containment() {
        assert!(loosely_equal("연구 배경", "연구배경"));
        assert!(loosely_equal("연구 배경 및 목적", "연구 배경"));
        assert!(loosely_equal("배경", "연구 배경 및 목적"));
        assert!(!loosely_equal("결론", "개요"));
    }
}
