//! Identity numbers: Ecuadorian cedula/RUC and payment cards

use serde::{Deserialize, Serialize};

use crate::checksum::{digits, is_luhn_valid, luhn_check_digit, module11};

/// Province codes 01-24, plus 30 for nationals registered abroad
fn is_province(d: &[u8]) -> bool {
    let code = d[0] * 10 + d[1];
    (1..=24).contains(&code) || code == 30
}

/// Modulo-11 check digit; `None` when the remainder leaves no valid digit
fn module11_check_digit(payload: &[u8]) -> Option<u8> {
    match module11(payload) {
        0 => Some(0),
        1 => None,
        r => Some(11 - r),
    }
}

fn cedula_digits(d: &[u8]) -> bool {
    d.len() == 10 && d[2] < 6 && is_province(d) && luhn_check_digit(&d[..9]) == d[9]
}

/// Ecuadorian national identity number (cedula)
///
/// Ten digits: a province code, a third digit below 6, and a Luhn check
/// digit over the first nine.
///
/// # Examples
/// ```
/// use rusty_validate_core::identity::is_ec_cedula;
/// assert!(is_ec_cedula("1710034065"));
/// assert!(!is_ec_cedula("1712345678"));
/// ```
pub fn is_ec_cedula(value: &str) -> bool {
    digits(value).is_some_and(|d| cedula_digits(&d))
}

/// Ecuadorian taxpayer number (RUC)
///
/// Thirteen digits. The third digit selects the taxpayer class:
/// - `0`-`5` natural person: a valid cedula followed by an establishment
///   number other than `000`
/// - `6` public sector: Modulo-11 check digit in position 9 over the first
///   eight digits, establishment other than `0000`
/// - `9` private company: Modulo-11 check digit in position 10 over the
///   first nine digits, establishment other than `000`
pub fn is_ec_ruc(value: &str) -> bool {
    let Some(d) = digits(value) else {
        return false;
    };
    if d.len() != 13 || !is_province(&d) {
        return false;
    }

    match d[2] {
        0..=5 => cedula_digits(&d[..10]) && d[10..] != [0, 0, 0],
        6 => module11_check_digit(&d[..8]) == Some(d[8]) && d[9..] != [0, 0, 0, 0],
        9 => module11_check_digit(&d[..9]) == Some(d[9]) && d[10..] != [0, 0, 0],
        _ => false,
    }
}

/// Payment card networks the `credit_card` rule recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Amex,
    Visa,
    Mastercard,
    Discover,
}

impl CardBrand {
    pub const ALL: [CardBrand; 4] = [
        CardBrand::Amex,
        CardBrand::Visa,
        CardBrand::Mastercard,
        CardBrand::Discover,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CardBrand::Amex => "amex",
            CardBrand::Visa => "visa",
            CardBrand::Mastercard => "mastercard",
            CardBrand::Discover => "discover",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|brand| brand.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Leading digits that identify the brand
    pub fn prefixes(self) -> &'static [u8] {
        match self {
            CardBrand::Amex => &[3],
            CardBrand::Visa => &[4],
            CardBrand::Mastercard => &[2, 5],
            CardBrand::Discover => &[6],
        }
    }

    /// Accepted card number lengths (inclusive)
    pub fn lengths(self) -> (usize, usize) {
        match self {
            CardBrand::Amex => (15, 15),
            CardBrand::Visa => (13, 16),
            CardBrand::Mastercard | CardBrand::Discover => (16, 16),
        }
    }

    pub fn cvv_len(self) -> usize {
        match self {
            CardBrand::Amex => 4,
            _ => 3,
        }
    }
}

impl std::fmt::Display for CardBrand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Brand whose prefix matches the first digit, among `allowed` (empty = all)
pub fn detect_card_brand(digits: &[u8], allowed: &[CardBrand]) -> Option<CardBrand> {
    let first = *digits.first()?;
    let candidates: &[CardBrand] = if allowed.is_empty() {
        &CardBrand::ALL
    } else {
        allowed
    };
    candidates
        .iter()
        .copied()
        .find(|brand| brand.prefixes().contains(&first))
}

/// Outcome of a card number check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardCheck {
    Valid(CardBrand),
    /// Digits only, but no allowed brand claims the prefix
    UnknownBrand,
    /// Brand detected, but the length or check digit is wrong
    Invalid(CardBrand),
    /// Not a digit string
    Malformed,
}

impl CardCheck {
    pub fn brand(&self) -> Option<CardBrand> {
        match self {
            CardCheck::Valid(brand) | CardCheck::Invalid(brand) => Some(*brand),
            _ => None,
        }
    }
}

/// Checks a card number; spaces and hyphens between digit groups are ignored
pub fn check_credit_card(value: &str, allowed: &[CardBrand]) -> CardCheck {
    let compact: String = value
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();
    let Some(d) = digits(&compact) else {
        return CardCheck::Malformed;
    };
    let Some(brand) = detect_card_brand(&d, allowed) else {
        return CardCheck::UnknownBrand;
    };

    let (min, max) = brand.lengths();
    if (min..=max).contains(&d.len()) && is_luhn_valid(&d) {
        CardCheck::Valid(brand)
    } else {
        CardCheck::Invalid(brand)
    }
}

/// Card verification value: exactly the brand's length, or 3-4 digits when
/// the brand is unknown
pub fn check_cvv(value: &str, brand: Option<CardBrand>) -> bool {
    let Some(d) = digits(value.trim()) else {
        return false;
    };
    match brand {
        Some(brand) => d.len() == brand.cvv_len(),
        None => matches!(d.len(), 3 | 4),
    }
}
