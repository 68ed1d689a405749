//! Date and time format grammars
//!
//! Date formats are built from the `YYYY`, `MM` and `DD` tokens joined by a
//! single non-alphanumeric separator (`YYYY-MM-DD`, `DD/MM/YYYY`, `MM.YYYY`).
//! Time formats follow the fixed grammar `HH:mm[:ss[.sss]][ A]`.

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};

use crate::patterns::TIME_FORMAT;

/// Result of checking a value against a date or time format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCheck {
    /// Value matches the format and every component is in range
    Ok,
    /// Value does not match, or a component is out of range
    Invalid,
    /// The format string itself cannot be used
    MalformedFormat,
}

impl FormatCheck {
    pub fn is_ok(self) -> bool {
        matches!(self, FormatCheck::Ok)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatePart {
    Year,
    Month,
    Day,
}

/// Parsed date format: the ordered parts and the separator joining them
#[derive(Debug, Clone, PartialEq, Eq)]
struct DateFormat {
    parts: Vec<DatePart>,
    separator: Option<char>,
}

fn parse_date_format(format: &str) -> Option<DateFormat> {
    let separator = format.chars().find(|c| !matches!(c, 'Y' | 'M' | 'D'));

    if let Some(sep) = separator {
        if sep.is_alphanumeric() {
            return None;
        }
        // Only the token letters and one kind of separator may appear
        if format.chars().any(|c| !matches!(c, 'Y' | 'M' | 'D') && c != sep) {
            return None;
        }
    }

    let groups: Vec<&str> = match separator {
        Some(sep) => format.split(sep).collect(),
        None => vec![format],
    };

    if groups.is_empty() || groups.len() > 3 {
        return None;
    }

    let mut parts = Vec::with_capacity(groups.len());
    for group in &groups {
        let part = match *group {
            "YYYY" => DatePart::Year,
            "MM" => DatePart::Month,
            "DD" => DatePart::Day,
            _ => return None,
        };
        if parts.contains(&part) {
            return None;
        }
        parts.push(part);
    }

    let has = |p: DatePart| parts.contains(&p);
    let usable = match parts.len() {
        1 => has(DatePart::Year),
        2 => has(DatePart::Year) && has(DatePart::Month),
        _ => true,
    };

    usable.then_some(DateFormat { parts, separator })
}

/// Checks `date` against a `YYYY`/`MM`/`DD` format
///
/// # Examples
/// ```
/// use rusty_validate_core::date::{check_date_format, FormatCheck};
/// assert_eq!(check_date_format("2023-02-28", "YYYY-MM-DD"), FormatCheck::Ok);
/// assert_eq!(check_date_format("2024-02-30", "YYYY-MM-DD"), FormatCheck::Invalid);
/// assert_eq!(check_date_format("02-2024", "MM-DD"), FormatCheck::MalformedFormat);
/// ```
pub fn check_date_format(date: &str, format: &str) -> FormatCheck {
    let Some(format) = parse_date_format(format) else {
        return FormatCheck::MalformedFormat;
    };

    let sep = format
        .separator
        .map(|c| regex::escape(&c.to_string()))
        .unwrap_or_default();
    let body: Vec<&str> = format
        .parts
        .iter()
        .map(|p| match p {
            DatePart::Year => "([0-9]{4})",
            _ => "([0-9]{2})",
        })
        .collect();
    let pattern = format!("^{}$", body.join(&sep));

    let Ok(re) = Regex::new(&pattern) else {
        return FormatCheck::MalformedFormat;
    };
    let Some(caps) = re.captures(date) else {
        return FormatCheck::Invalid;
    };

    let mut year = None;
    let mut month = None;
    let mut day = None;
    for (i, part) in format.parts.iter().enumerate() {
        let value: u32 = match caps.get(i + 1).and_then(|m| m.as_str().parse().ok()) {
            Some(v) => v,
            None => return FormatCheck::Invalid,
        };
        match part {
            DatePart::Year => year = Some(value),
            DatePart::Month => month = Some(value),
            DatePart::Day => day = Some(value),
        }
    }

    let Some(year) = year.filter(|y| *y <= 9999) else {
        return FormatCheck::Invalid;
    };
    if let Some(m) = month {
        if !(1..=12).contains(&m) {
            return FormatCheck::Invalid;
        }
    }
    if let (Some(m), Some(d)) = (month, day) {
        if NaiveDate::from_ymd_opt(year as i32, m, d).is_none() {
            return FormatCheck::Invalid;
        }
    }

    FormatCheck::Ok
}

/// Number of days in `month` of `year`, or `None` for an invalid month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Checks `time` against an `HH:mm[:ss[.sss]][ A]` format
pub fn check_time_format(time: &str, format: &str) -> FormatCheck {
    let Some(grammar) = TIME_FORMAT.captures(format) else {
        return FormatCheck::MalformedFormat;
    };
    let has_seconds = grammar.get(1).is_some();
    let has_millis = grammar.get(2).is_some();
    let meridiem = grammar.get(3).is_some();

    let mut pattern = String::from(r"^([0-9]{2}):([0-9]{2})");
    if has_seconds {
        pattern.push_str(r":([0-9]{2})");
    }
    if has_millis {
        pattern.push_str(r"\.([0-9]{3})");
    }
    if meridiem {
        pattern.push_str(r"\s*[ap]\.?\s*m\.?");
    }
    pattern.push('$');

    let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        return FormatCheck::MalformedFormat;
    };
    let Some(caps) = re.captures(time.trim()) else {
        return FormatCheck::Invalid;
    };

    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let max_hour = if meridiem { 12 } else { 23 };

    let in_range = number(1).is_some_and(|h| h <= max_hour)
        && number(2).is_some_and(|m| m <= 59)
        && (!has_seconds || number(3).is_some_and(|s| s <= 59))
        && (!has_millis || number(4).is_some_and(|ms| ms <= 999));

    if in_range {
        FormatCheck::Ok
    } else {
        FormatCheck::Invalid
    }
}
