//! Currency formatting

use serde::{Deserialize, Serialize};

use crate::patterns::NUMBER;

/// How currency values are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimals: u8,
    pub thousands_separator: String,
    pub decimal_separator: String,
    /// Write the symbol after the amount (`1.234,50 €`) instead of before it
    pub symbol_after: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            decimals: 2,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            symbol_after: false,
        }
    }
}

/// Formats a number as currency: `1234.5` -> `$1,234.50`
pub fn format_currency(number: f64, format: &CurrencyFormat) -> String {
    let fixed = format!("{:.*}", usize::from(format.decimals), number.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push_str(&format.thousands_separator);
        }
        grouped.push(c);
    }

    let mut amount = grouped;
    if !frac.is_empty() {
        amount.push_str(&format.decimal_separator);
        amount.push_str(frac);
    }

    let sign = if number < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    if format.symbol_after {
        format!("{sign}{amount} {}", format.symbol)
    } else {
        format!("{sign}{}{amount}", format.symbol)
    }
}

/// Strips currency formatting back to a plain numeral (`$1,234.50` -> `1234.50`)
///
/// Returns `None` when what remains is not a number.
pub fn unformat_currency(text: &str, format: &CurrencyFormat) -> Option<String> {
    let mut plain = text.trim().to_string();
    if !format.symbol.is_empty() {
        plain = plain.replace(&format.symbol, "");
    }
    if !format.thousands_separator.is_empty() {
        plain = plain.replace(&format.thousands_separator, "");
    }
    if !format.decimal_separator.is_empty() && format.decimal_separator != "." {
        plain = plain.replace(&format.decimal_separator, ".");
    }
    plain.retain(|c| !c.is_whitespace());

    NUMBER.is_match(&plain).then_some(plain)
}
