//! Password strength scoring

/// Characters counted as "special" unless configured otherwise
pub const DEFAULT_SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?`~";

/// Scores a password from 0 to 5
///
/// One point each for an uppercase letter, a lowercase letter, a digit and
/// a character from `special_chars`; one point off below 8 characters and
/// one point more from 12. Any whitespace caps the score at 1.
///
/// # Examples
/// ```
/// use rusty_validate_core::password::{password_score, DEFAULT_SPECIAL_CHARS};
/// assert_eq!(password_score("Sup3r$ecretPass", DEFAULT_SPECIAL_CHARS), 5);
/// assert_eq!(password_score("abc", DEFAULT_SPECIAL_CHARS), 0);
/// ```
pub fn password_score(password: &str, special_chars: &str) -> u8 {
    if password.chars().any(char::is_whitespace) {
        return 1;
    }

    let classes = [
        password.chars().any(char::is_uppercase),
        password.chars().any(char::is_lowercase),
        password.chars().any(|c| special_chars.contains(c)),
        password.chars().any(|c| c.is_ascii_digit()),
    ];
    let mut score = classes.iter().filter(|&&present| present).count() as i8;

    let length = password.chars().count();
    if length < 8 {
        score -= 1;
    }
    if length >= 12 {
        score += 1;
    }

    score.clamp(0, 5) as u8
}

/// Human readable name for a score
pub fn strength_label(score: u8) -> &'static str {
    match score {
        0 | 1 => "very weak",
        2 => "weak",
        3 => "medium",
        4 => "strong",
        _ => "very strong",
    }
}
