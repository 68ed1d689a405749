//! Numeric range, step and length grammars
//!
//! A range spec is an optional `min`/`max` prefix followed by a number, or
//! two numbers joined by `::` for an inclusive range. A bare number means
//! exact equality:
//!
//! | spec        | meaning            |
//! |-------------|--------------------|
//! | `min3`      | value >= 3         |
//! | `max10`     | value <= 10        |
//! | `2::10`     | 2 <= value <= 10   |
//! | `5`         | value == 5         |
//!
//! `min2::10` (prefix together with `::`) is malformed.

use crate::patterns::{NUMBER, UNSIGNED};
use regex::Regex;

/// Outcome of a range or length check
///
/// Failures carry the bound(s) the value violated so callers can build a
/// message from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeCheck<T> {
    Ok,
    Min(T),
    Max(T),
    Range(T, T),
    Equal(T),
    Malformed,
}

impl<T> RangeCheck<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, RangeCheck::Ok)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, RangeCheck::Malformed)
    }
}

/// Outcome of a step check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepCheck {
    Ok,
    Step(f64),
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound<T> {
    Min(T),
    Max(T),
    Range(T, T),
    Equal(T),
}

fn parse_bound<T, F>(spec: &str, number: &Regex, parse: F) -> Option<Bound<T>>
where
    T: PartialOrd + Copy,
    F: Fn(&str) -> Option<T>,
{
    let spec = spec.trim();
    let (prefix, rest) = if let Some(rest) = spec.strip_prefix("min") {
        (Some("min"), rest)
    } else if let Some(rest) = spec.strip_prefix("max") {
        (Some("max"), rest)
    } else {
        (None, spec)
    };

    let read = |s: &str| -> Option<T> {
        let s = s.trim();
        if number.is_match(s) {
            parse(s)
        } else {
            None
        }
    };

    if let Some((lo, hi)) = rest.split_once("::") {
        if prefix.is_some() {
            return None;
        }
        let (lo, hi) = (read(lo)?, read(hi)?);
        if lo > hi {
            return None;
        }
        return Some(Bound::Range(lo, hi));
    }

    let n = read(rest)?;
    Some(match prefix {
        Some("min") => Bound::Min(n),
        Some(_) => Bound::Max(n),
        None => Bound::Equal(n),
    })
}

fn check_bound<T: PartialOrd + Copy>(value: T, bound: Option<Bound<T>>) -> RangeCheck<T> {
    match bound {
        None => RangeCheck::Malformed,
        Some(Bound::Min(min)) if value < min => RangeCheck::Min(min),
        Some(Bound::Max(max)) if value > max => RangeCheck::Max(max),
        Some(Bound::Range(lo, hi)) if value < lo || value > hi => RangeCheck::Range(lo, hi),
        Some(Bound::Equal(n)) if value != n => RangeCheck::Equal(n),
        Some(_) => RangeCheck::Ok,
    }
}

/// Checks a number against a signed range spec
///
/// # Examples
/// ```
/// use rusty_validate_core::range::{check_number_range, RangeCheck};
/// assert_eq!(check_number_range(5.0, "2::10"), RangeCheck::Ok);
/// assert_eq!(check_number_range(11.0, "2::10"), RangeCheck::Range(2.0, 10.0));
/// assert!(check_number_range(5.0, "min2::10").is_malformed());
/// ```
pub fn check_number_range(value: f64, spec: &str) -> RangeCheck<f64> {
    check_bound(value, parse_bound(spec, &NUMBER, |s| s.parse().ok()))
}

/// Checks a count (characters, files, options) against an unsigned range spec
pub fn check_string_length(length: usize, spec: &str) -> RangeCheck<usize> {
    check_bound(length, parse_bound(spec, &UNSIGNED, |s| s.parse().ok()))
}

/// Number of digits after the decimal point
fn decimals(s: &str) -> u32 {
    s.split_once('.').map_or(0, |(_, frac)| frac.len() as u32)
}

/// Parses a decimal numeral scaled by `10^scale` into an integer
fn scaled(s: &str, scale: u32) -> Option<i128> {
    let s = s.trim_start_matches('+');
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let mut text = String::with_capacity(int.len() + scale as usize);
    text.push_str(int);
    text.push_str(frac);
    for _ in frac.len() as u32..scale {
        text.push('0');
    }
    let magnitude: i128 = text.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Checks that `value` is a whole multiple of the step in `spec`
///
/// Both numerals are scaled to integers before taking the remainder, so
/// decimal steps such as `0.1` are exact.
pub fn check_number_step(value: &str, spec: &str) -> StepCheck {
    let (value, spec) = (value.trim(), spec.trim());
    if !NUMBER.is_match(value) || !NUMBER.is_match(spec) {
        return StepCheck::Malformed;
    }

    let scale = decimals(value).max(decimals(spec));
    let (Some(v), Some(step)) = (scaled(value, scale), scaled(spec, scale)) else {
        return StepCheck::Malformed;
    };
    if step == 0 {
        return StepCheck::Malformed;
    }

    if v % step.abs() == 0 {
        StepCheck::Ok
    } else {
        StepCheck::Step(spec.parse().unwrap_or_default())
    }
}
