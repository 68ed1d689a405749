//! Message templates
//!
//! Templates are looked up by rule name or message key and may contain
//! `{placeholder}` tokens. Keys missing from a loaded table fall back to the
//! built-in English messages.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const ENGLISH: &[(&str, &str)] = &[
    ("invalid", "This value is invalid"),
    ("unconfirmed", "This value could not be confirmed"),
    ("required", "This field is required"),
    ("required_choice", "Please select an option"),
    ("length_min", "{verb} at least {min} {unit}"),
    ("length_max", "{verb} no more than {max} {unit}"),
    ("length_range", "{verb} between {min} and {max} {unit}"),
    ("length_equal", "{verb} exactly {count} {unit}"),
    ("verb_enter", "Please enter"),
    ("verb_choose", "Please choose"),
    ("unit_character", "character"),
    ("unit_characters", "characters"),
    ("unit_file", "file"),
    ("unit_files", "files"),
    ("unit_option", "option"),
    ("unit_options", "options"),
    ("numbers", "Please enter a valid number"),
    ("numbers_negative", "Negative numbers are not allowed"),
    ("numbers_decimal", "Decimal numbers are not allowed"),
    ("numbers_positive", "Positive numbers are not allowed"),
    ("numbers_min", "Please enter a number greater than or equal to {min}"),
    ("numbers_max", "Please enter a number less than or equal to {max}"),
    ("numbers_range", "Please enter a number between {min} and {max}"),
    ("numbers_equal", "Please enter {value}"),
    ("numbers_step", "Please enter a multiple of {step}"),
    ("letters", "Only letters are allowed"),
    ("alphanumeric", "Only letters and numbers are allowed"),
    ("regex", "This value does not match the required format"),
    ("telephone", "Please enter a valid telephone number"),
    ("color", "Please enter a valid color"),
    ("ipv4", "Please enter a valid IPv4 address"),
    ("ipv6", "Please enter a valid IPv6 address"),
    ("domain", "Please enter a valid domain"),
    ("email", "Please enter a valid email address"),
    ("url", "Please enter a valid URL"),
    ("ec_cedula", "Please enter a valid cedula"),
    ("ec_ruc", "Please enter a valid RUC"),
    ("credit_card", "Please enter a valid card number"),
    ("credit_card_brand", "This card type is not accepted"),
    ("cvv", "Please enter a valid security code"),
    ("confirmation", "This value must match {field}"),
    ("password", "Password strength is {strength}, {required} is required"),
    ("date", "Please enter a valid date ({format})"),
    ("time", "Please enter a valid time ({format})"),
    ("file_size", "Each file must be {size} or smaller"),
    ("file_type", "This file type is not allowed"),
    ("file_extension", "This file extension is not allowed"),
    ("image_dimension", "Images must be exactly {width}x{height} pixels"),
    ("image_height", "Images must be at most {height} pixels tall"),
    ("image_width", "Images must be at most {width} pixels wide"),
];

/// Replace `{key}` tokens in `template`
pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{key}}}"), value)
    })
}

/// Message table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lang {
    /// Overrides keyed by rule name or message key
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

impl Lang {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override one template
    pub fn with_message(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }

    /// Template for `key`: an override, else the built-in English text
    pub fn template(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str).or_else(|| {
            ENGLISH
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, template)| *template)
        })
    }

    /// Filled template for `key`, or the generic invalid message
    pub fn message(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = self
            .template(key)
            .or_else(|| self.template("invalid"))
            .unwrap_or_default();
        fill(template, args)
    }

    /// Load a `[messages]` table from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read language file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&content).with_context(|| format!("Failed to parse language file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fill() {
        assert_eq!(
            fill("{verb} at least {min} {unit}", &[("verb", "Please enter"), ("min", "3"), ("unit", "characters")]),
            "Please enter at least 3 characters"
        );
        assert_eq!(fill("no tokens", &[("x", "y")]), "no tokens");
    }

    #[test]
    fn test_overrides_fall_back_to_english() {
        let lang: Lang = toml::from_str(
            r#"
            [messages]
            required = "Campo obligatorio"
            "#,
        )
        .unwrap();

        assert_eq!(lang.message("required", &[]), "Campo obligatorio");
        assert_eq!(lang.message("email", &[]), "Please enter a valid email address");
        assert_eq!(lang.message("no_such_key", &[]), "This value is invalid");
        assert_eq!(lang.template("no_such_key"), None);
    }

    #[test]
    fn test_every_builtin_key_is_unique() {
        let mut keys: Vec<&str> = ENGLISH.iter().map(|(k, _)| *k).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ENGLISH.len());
    }
}
