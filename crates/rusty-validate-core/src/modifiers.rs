//! String transforms behind the built-in modifiers

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn lowercase(value: &str) -> String {
    value.to_lowercase()
}

pub fn uppercase(value: &str) -> String {
    value.to_uppercase()
}

/// Sentence case: `hELLO wORLD` -> `Hello world`
pub fn capitalize(value: &str) -> String {
    upper_first(value)
}

/// `hello big world` -> `Hello Big World`, whitespace kept as is
pub fn capitalize_words(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut word_start = true;
    for c in value.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// `hello big world` -> `HelloBigWorld`
pub fn pascal_case(value: &str) -> String {
    value.split_whitespace().map(upper_first).collect()
}

/// `hello big world` -> `helloBigWorld`
pub fn camel_case(value: &str) -> String {
    let pascal = pascal_case(value);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

pub fn trim_start(value: &str) -> String {
    value.trim_start().to_string()
}

pub fn trim_end(value: &str) -> String {
    value.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_case_transforms() {
        assert_eq!(lowercase("HeLLo"), "hello");
        assert_eq!(uppercase("straße"), "STRASSE");
        assert_eq!(capitalize("hELLO wORLD"), "Hello world");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize_words("hello  big\tworld"), "Hello  Big\tWorld");
    }

    #[test]
    fn test_joined_cases() {
        assert_eq!(pascal_case("  hello big world "), "HelloBigWorld");
        assert_eq!(camel_case("Hello big WORLD"), "helloBigWorld");
        assert_eq!(camel_case("   "), "");
    }

    #[test]
    fn test_trims() {
        assert_eq!(trim("  a b  "), "a b");
        assert_eq!(trim_start("  a b  "), "a b  ");
        assert_eq!(trim_end("  a b  "), "  a b");
    }
}
