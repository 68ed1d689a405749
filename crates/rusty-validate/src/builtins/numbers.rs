//! Numeric, date and time rules

use rusty_validate_core::patterns::NUMBER;
use rusty_validate_core::{
    check_date_format, check_number_range, check_number_step, check_time_format, split_list,
    FormatCheck, RangeCheck, StepCheck,
};

use crate::rule::{RuleContext, Validator, Verdict};

pub(super) fn validators() -> Vec<Validator> {
    vec![
        Validator::new("numbers", "Please enter a valid number", numbers),
        Validator::new("date", "Please enter a valid date", date),
        Validator::new("time", "Please enter a valid time", time),
    ]
}

/// What `data-numbers-allow` switches on
#[derive(Debug, Default, Clone, Copy)]
struct Allow {
    negative: bool,
    decimal: bool,
    no_positive: bool,
    range: bool,
    step: bool,
}

impl Allow {
    fn parse(list: &str) -> Self {
        let mut allow = Self::default();
        for token in split_list(list) {
            match token.to_ascii_lowercase().as_str() {
                "negative" => allow.negative = true,
                "decimal" => allow.decimal = true,
                "nopositive" => allow.no_positive = true,
                "range" => allow.range = true,
                "step" => allow.step = true,
                _ => {}
            }
        }
        allow
    }

    /// Language key of the first sign or fraction the settings forbid
    fn screen(self, numeral: &str) -> Option<&'static str> {
        let numeral = numeral.trim();
        if numeral.starts_with('-') && !self.negative {
            return Some("numbers_negative");
        }
        if numeral.contains('.') && !self.decimal {
            return Some("numbers_decimal");
        }
        if self.no_positive && numeral.parse::<f64>().is_ok_and(|n| n > 0.0) {
            return Some("numbers_positive");
        }
        None
    }

    /// Whether every numeral of a range spec passes the screen
    fn admits_range(self, spec: &str) -> bool {
        let spec = spec.trim();
        let bare = spec
            .strip_prefix("min")
            .or_else(|| spec.strip_prefix("max"))
            .unwrap_or(spec);
        bare.split("::").all(|part| self.screen(part).is_none())
    }
}

fn numbers(ctx: &RuleContext<'_>) -> Verdict {
    let attrs = &ctx.options.attributes;
    let allow = ctx
        .attr(&attrs.numbers_allow)
        .map(|list| Allow::parse(&list))
        .unwrap_or_default();
    let value = ctx.value.trim();

    if let Some(key) = allow.screen(value) {
        return ctx.fail_with(key, &[]);
    }
    if !NUMBER.is_match(value) {
        return Verdict::Fail;
    }

    if allow.range {
        let Some(spec) = ctx.attr(&attrs.numbers_range).filter(|spec| allow.admits_range(spec)) else {
            return Verdict::Unconfirmed;
        };
        let Ok(number) = value.parse::<f64>() else {
            return Verdict::Fail;
        };
        let verdict = match check_number_range(number, &spec) {
            RangeCheck::Ok => Verdict::Pass,
            RangeCheck::Malformed => Verdict::Unconfirmed,
            RangeCheck::Min(min) => ctx.fail_with("numbers_min", &[("min", min.to_string().as_str())]),
            RangeCheck::Max(max) => ctx.fail_with("numbers_max", &[("max", max.to_string().as_str())]),
            RangeCheck::Range(min, max) => ctx.fail_with(
                "numbers_range",
                &[("min", min.to_string().as_str()), ("max", max.to_string().as_str())],
            ),
            RangeCheck::Equal(n) => ctx.fail_with("numbers_equal", &[("value", n.to_string().as_str())]),
        };
        if !verdict.passed() {
            return verdict;
        }
    }

    if allow.step {
        let Some(spec) = ctx.attr(&attrs.numbers_step).filter(|spec| allow.screen(spec).is_none()) else {
            return Verdict::Unconfirmed;
        };
        return match check_number_step(value, &spec) {
            StepCheck::Ok => Verdict::Pass,
            StepCheck::Malformed => Verdict::Unconfirmed,
            StepCheck::Step(step) => ctx.fail_with("numbers_step", &[("step", step.to_string().as_str())]),
        };
    }

    Verdict::Pass
}

fn date(ctx: &RuleContext<'_>) -> Verdict {
    let format = ctx
        .attr(&ctx.options.attributes.date_format)
        .unwrap_or_else(|| ctx.options.default_date_format.clone());
    match check_date_format(ctx.value, &format) {
        FormatCheck::Ok => Verdict::Pass,
        FormatCheck::MalformedFormat => Verdict::Unconfirmed,
        FormatCheck::Invalid => ctx.fail_with("date", &[("format", format.as_str())]),
    }
}

fn time(ctx: &RuleContext<'_>) -> Verdict {
    let format = ctx
        .attr(&ctx.options.attributes.time_format)
        .unwrap_or_else(|| ctx.options.default_time_format.clone());
    match check_time_format(ctx.value, &format) {
        FormatCheck::Ok => Verdict::Pass,
        FormatCheck::MalformedFormat => Verdict::Unconfirmed,
        FormatCheck::Invalid => ctx.fail_with("time", &[("format", format.as_str())]),
    }
}
