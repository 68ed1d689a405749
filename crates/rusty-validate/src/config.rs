// File: src/config.rs
// Purpose: Engine options parsed from validate.toml

use anyhow::{Context, Result};
use rusty_validate_core::{CurrencyFormat, DEFAULT_SPECIAL_CHARS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Engine options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    /// Names of the attributes the engine and built-in rules read
    #[serde(default)]
    pub attributes: AttributeNames,

    /// Validate hidden inputs in whole-form passes (default: false)
    #[serde(default = "default_false")]
    pub validate_hidden: bool,

    /// Upper bound for one async rule, in milliseconds. `0` or `None` waits forever.
    #[serde(default = "default_async_timeout_ms")]
    pub async_timeout_ms: Option<u64>,

    #[serde(default = "default_special_chars")]
    pub password_special_chars: String,

    /// Minimum password score when the field does not set one
    #[serde(default = "default_password_strength")]
    pub default_password_strength: u8,

    #[serde(default = "default_telephone_format")]
    pub default_telephone_format: String,

    #[serde(default = "default_date_format")]
    pub default_date_format: String,

    #[serde(default = "default_time_format")]
    pub default_time_format: String,

    #[serde(default)]
    pub currency: CurrencyFormat,
}

/// Attribute names, overridable for hosts with their own prefix
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeNames {
    pub validators: String,
    pub modifiers: String,
    pub invalid_message: String,
    pub valid_message: String,
    pub label: String,
    pub depends_on: String,
    pub depends_on_value: String,
    pub optional: String,
    pub length: String,
    pub numbers_allow: String,
    pub numbers_range: String,
    pub numbers_step: String,
    pub letters_allow: String,
    pub alphanumeric_allow: String,
    pub regex_pattern: String,
    pub regex_flags: String,
    pub telephone_format: String,
    pub color_types: String,
    pub ipv6_canonical: String,
    pub credit_card_brands: String,
    pub cvv_target: String,
    pub confirmation_target: String,
    pub password_strength: String,
    pub date_format: String,
    pub time_format: String,
    pub file_size: String,
    pub file_types: String,
    pub file_extensions: String,
    pub image_dimension: String,
    pub image_max_height: String,
    pub image_max_width: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        let attr = |name: &str| format!("data-{name}");
        Self {
            validators: attr("validators"),
            modifiers: attr("modifiers"),
            invalid_message: attr("invalid-message"),
            valid_message: attr("valid-message"),
            label: attr("label"),
            depends_on: attr("depends-on"),
            depends_on_value: attr("depends-on-value"),
            optional: attr("optional"),
            length: attr("length"),
            numbers_allow: attr("numbers-allow"),
            numbers_range: attr("numbers-range"),
            numbers_step: attr("numbers-step"),
            letters_allow: attr("letters-allow"),
            alphanumeric_allow: attr("alphanumeric-allow"),
            regex_pattern: attr("regex-pattern"),
            regex_flags: attr("regex-flags"),
            telephone_format: attr("telephone-format"),
            color_types: attr("color-types"),
            ipv6_canonical: attr("ipv6-canonical"),
            credit_card_brands: attr("credit-card-brands"),
            cvv_target: attr("cvv-target"),
            confirmation_target: attr("confirmation-target"),
            password_strength: attr("password-strength"),
            date_format: attr("date-format"),
            time_format: attr("time-format"),
            file_size: attr("file-size"),
            file_types: attr("file-types"),
            file_extensions: attr("file-extensions"),
            image_dimension: attr("image-dimension"),
            image_max_height: attr("image-max-height"),
            image_max_width: attr("image-max-width"),
        }
    }
}

// Default values
fn default_false() -> bool {
    false
}

fn default_async_timeout_ms() -> Option<u64> {
    Some(10_000)
}

fn default_special_chars() -> String {
    DEFAULT_SPECIAL_CHARS.to_string()
}

fn default_password_strength() -> u8 {
    5
}

fn default_telephone_format() -> String {
    "ec".to_string()
}

fn default_date_format() -> String {
    "YYYY-MM-DD".to_string()
}

fn default_time_format() -> String {
    "HH:mm".to_string()
}

impl Default for Options {
    fn default() -> Self {
        Self {
            attributes: AttributeNames::default(),
            validate_hidden: false,
            async_timeout_ms: default_async_timeout_ms(),
            password_special_chars: default_special_chars(),
            default_password_strength: default_password_strength(),
            default_telephone_format: default_telephone_format(),
            default_date_format: default_date_format(),
            default_time_format: default_time_format(),
            currency: CurrencyFormat::default(),
        }
    }
}

impl Options {
    /// Timeout applied to each async rule, if any
    pub fn async_timeout(&self) -> Option<Duration> {
        self.async_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Load options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default options
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let options: Options = toml::from_str(&content)
            .with_context(|| format!("Failed to parse options file: {:?}", path))?;

        Ok(options)
    }

    /// Load options from default path (./validate.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("validate.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.attributes.validators, "data-validators");
        assert_eq!(options.attributes.depends_on_value, "data-depends-on-value");
        assert_eq!(options.async_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(options.default_date_format, "YYYY-MM-DD");
        assert!(!options.validate_hidden);
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
            validate_hidden = true
            async_timeout_ms = 0
            default_telephone_format = "us"

            [attributes]
            validators = "x-rules"

            [currency]
            symbol = "€"
            symbol_after = true
        "#;
        let options: Options = toml::from_str(toml).unwrap();
        assert!(options.validate_hidden);
        assert_eq!(options.async_timeout(), None);
        assert_eq!(options.default_telephone_format, "us");
        assert_eq!(options.attributes.validators, "x-rules");
        assert_eq!(options.attributes.modifiers, "data-modifiers");
        assert_eq!(options.currency.symbol, "€");
        assert_eq!(options.currency.decimals, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let options = Options::load("definitely/not/here.toml").unwrap();
        assert_eq!(options.default_time_format, "HH:mm");
    }
}
