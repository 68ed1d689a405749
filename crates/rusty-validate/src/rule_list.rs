//! Rule list attribute syntax
//!
//! A field lists its rules in one attribute, separated by any mix of `,`,
//! `|`, `-` and whitespace: `required, email`, `required|length`,
//! `trim-lowercase`. Order is execution order.

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,|\-\s]+").unwrap());

/// Rule names in order; empty tokens from stray separators are dropped
pub fn parse_rule_list(value: &str) -> Vec<String> {
    SEPARATORS
        .split(value)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("required", &["required"])]
    #[case("required,email", &["required", "email"])]
    #[case(" required | email ", &["required", "email"])]
    #[case("trim-lowercase", &["trim", "lowercase"])]
    #[case("required, length|numbers - ec_cedula", &["required", "length", "numbers", "ec_cedula"])]
    #[case(",|-required--email,,", &["required", "email"])]
    #[case("", &[])]
    #[case(" ,| - ", &[])]
    fn test_parse_rule_list(#[case] value: &str, #[case] expected: &[&str]) {
        assert_eq!(parse_rule_list(value), expected);
    }
}
