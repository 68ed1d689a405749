//! Character-class, pattern and telephone checks

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Splits an attribute list on commas, pipes and whitespace, dropping empty items
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c == '|' || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn matches_class(value: &str, class: &str, extra: &str) -> bool {
    let pattern = format!("^[{class}{}]+$", regex::escape(extra));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

/// ASCII letters plus any characters in `extra`
pub fn matches_letters(value: &str, extra: &str) -> bool {
    matches_class(value, "a-z", extra)
}

/// ASCII letters and digits plus any characters in `extra`
pub fn matches_alphanumeric(value: &str, extra: &str) -> bool {
    matches_class(value, "a-z0-9", extra)
}

/// Full match of `value` against `pattern`
///
/// `flags` uses the familiar single-letter switches: `i` case-insensitive,
/// `m` multi-line, `s` dot matches newline, `x` verbose, `U` lazy by
/// default. `g` and `u` are accepted and ignored.
pub fn matches_pattern(value: &str, pattern: &str, flags: &str) -> Result<bool, regex::Error> {
    let mut builder = RegexBuilder::new(&format!("^(?:{pattern})$"));
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'U' => builder.swap_greed(true),
            _ => &mut builder,
        };
    }
    Ok(builder.build()?.is_match(value))
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

/// Telephone formats keyed by region code
static TELEPHONE_FORMATS: Lazy<HashMap<&'static str, Vec<Regex>>> = Lazy::new(|| {
    let mut formats = HashMap::new();
    formats.insert(
        "ec",
        compile(&[
            r"^09[0-9]{8}$",
            r"^0[2-7][0-9]{7}$",
            r"^\+593\s?9[0-9]{8}$",
            r"^\+593\s?[2-7][0-9]{7}$",
        ]),
    );
    formats.insert(
        "us",
        compile(&[
            r"^\(?[2-9][0-9]{2}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}$",
            r"^\+1\s?\(?[2-9][0-9]{2}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}$",
        ]),
    );
    formats.insert(
        "es",
        compile(&[r"^[6-9][0-9]{8}$", r"^\+34\s?[6-9][0-9]{8}$"]),
    );
    formats.insert("intl", compile(&[r"^\+[1-9][0-9]{6,14}$"]));
    formats
});

/// Whether `value` matches one of the patterns of a telephone format
///
/// Returns `None` when `format` is not a known region code.
pub fn is_telephone(value: &str, format: &str) -> Option<bool> {
    let patterns = TELEPHONE_FORMATS.get(format.trim().to_ascii_lowercase().as_str())?;
    let value = value.trim();
    Some(patterns.iter().any(|re| re.is_match(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" image/png, image/jpeg|application/pdf  text/plain,"),
            vec!["image/png", "image/jpeg", "application/pdf", "text/plain"]
        );
        assert!(split_list(" , | ").is_empty());
    }

    #[rstest]
    #[case("Hello", "", true)]
    #[case("Hello World", "", false)]
    #[case("Hello World", " ", true)]
    #[case("O'Brien-Smith", "'-", true)]
    #[case("abc1", "", false)]
    #[case("", "", false)]
    #[case("a]b", "]", true)]
    fn test_letters(#[case] value: &str, #[case] extra: &str, #[case] expected: bool) {
        assert_eq!(matches_letters(value, extra), expected);
    }

    #[test]
    fn test_alphanumeric() {
        assert!(matches_alphanumeric("abc123XYZ", ""));
        assert!(!matches_alphanumeric("abc_123", ""));
        assert!(matches_alphanumeric("abc_123", "_"));
    }

    #[test]
    fn test_matches_pattern() {
        assert_eq!(matches_pattern("ABC-123", "[A-Z]{3}-[0-9]{3}", ""), Ok(true));
        assert_eq!(matches_pattern("abc-123", "[A-Z]{3}-[0-9]{3}", ""), Ok(false));
        assert_eq!(matches_pattern("abc-123", "[A-Z]{3}-[0-9]{3}", "gi"), Ok(true));
        // Full match only
        assert_eq!(matches_pattern("xABC-123", "[A-Z]{3}-[0-9]{3}", ""), Ok(false));
        assert_eq!(matches_pattern("a|b", "a|b", ""), Ok(false));
        assert!(matches_pattern("x", "(", "").is_err());
    }

    #[rstest]
    #[case("0991234567", "ec", Some(true))]
    #[case("022345678", "ec", Some(true))]
    #[case("+593 991234567", "ec", Some(true))]
    #[case("0891234567", "ec", Some(false))]
    #[case("(212) 555-0100", "us", Some(true))]
    #[case("+1 212.555.0100", "US", Some(true))]
    #[case("612345678", "es", Some(true))]
    #[case("+442071838750", "intl", Some(true))]
    #[case("0991234567", "zz", None)]
    fn test_telephone(#[case] value: &str, #[case] format: &str, #[case] expected: Option<bool>) {
        assert_eq!(is_telephone(value, format), expected);
    }
}
