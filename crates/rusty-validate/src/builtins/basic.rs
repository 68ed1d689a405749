//! Presence, length, character-class, pattern and cross-field rules

use rusty_validate_core::{
    check_string_length, is_color, is_telephone, matches_alphanumeric, matches_letters,
    matches_pattern, password_score, split_list, strength_label, ColorFamily, RangeCheck,
};

use crate::error::EngineError;
use crate::field::{effective_value, FieldKind};
use crate::rule::{RuleContext, Validator, Verdict};

pub(super) fn validators() -> Vec<Validator> {
    vec![
        Validator::new("required", "This field is required", required),
        Validator::new("length", "This value has the wrong length", length),
        Validator::new("letters", "Only letters are allowed", letters),
        Validator::new("alphanumeric", "Only letters and numbers are allowed", alphanumeric),
        Validator::new("regex", "This value does not match the required format", regex),
        Validator::new("telephone", "Please enter a valid telephone number", telephone),
        Validator::new("color", "Please enter a valid color", color),
        Validator::new("confirmation", "The values do not match", confirmation),
        Validator::new("password", "Password is too weak", password),
    ]
}

fn required(ctx: &RuleContext<'_>) -> Verdict {
    let field = ctx.field;
    match field.kind() {
        kind if kind.is_checkable() => {
            let checked = ctx
                .form
                .group(field.name())
                .iter()
                .any(|member| member.is_checked());
            if checked {
                Verdict::Pass
            } else {
                ctx.fail_with("required_choice", &[])
            }
        }
        FieldKind::File => Verdict::from_bool(!field.files().is_empty()),
        FieldKind::SelectMultiple => Verdict::from_bool(field.selected_count() > 0),
        _ => Verdict::from_bool(!ctx.value.trim().is_empty()),
    }
}

fn length(ctx: &RuleContext<'_>) -> Verdict {
    let Some(spec) = ctx.attr(&ctx.options.attributes.length) else {
        return Verdict::Unconfirmed;
    };

    let field = ctx.field;
    let (count, unit, verb) = match field.kind() {
        FieldKind::File => (field.files().len(), "file", "verb_choose"),
        FieldKind::SelectMultiple => (field.selected_count(), "option", "verb_choose"),
        FieldKind::Checkbox => {
            let checked = ctx
                .form
                .group(field.name())
                .iter()
                .filter(|member| member.is_checked())
                .count();
            (checked, "option", "verb_choose")
        }
        _ => (ctx.value.chars().count(), "character", "verb_enter"),
    };

    let verb = ctx.message(verb, &[]);
    let unit_for = |bound: usize| {
        let key = if bound == 1 {
            format!("unit_{unit}")
        } else {
            format!("unit_{unit}s")
        };
        ctx.message(&key, &[])
    };

    match check_string_length(count, &spec) {
        RangeCheck::Ok => Verdict::Pass,
        RangeCheck::Malformed => Verdict::Unconfirmed,
        RangeCheck::Min(min) => ctx.fail_with(
            "length_min",
            &[
                ("verb", verb.as_str()),
                ("min", min.to_string().as_str()),
                ("unit", unit_for(min).as_str()),
            ],
        ),
        RangeCheck::Max(max) => ctx.fail_with(
            "length_max",
            &[
                ("verb", verb.as_str()),
                ("max", max.to_string().as_str()),
                ("unit", unit_for(max).as_str()),
            ],
        ),
        RangeCheck::Range(min, max) => ctx.fail_with(
            "length_range",
            &[
                ("verb", verb.as_str()),
                ("min", min.to_string().as_str()),
                ("max", max.to_string().as_str()),
                ("unit", unit_for(max).as_str()),
            ],
        ),
        RangeCheck::Equal(n) => ctx.fail_with(
            "length_equal",
            &[
                ("verb", verb.as_str()),
                ("count", n.to_string().as_str()),
                ("unit", unit_for(n).as_str()),
            ],
        ),
    }
}

// Allow-lists are read raw, a space is a valid extra character
fn letters(ctx: &RuleContext<'_>) -> Verdict {
    let extra = ctx
        .field
        .attribute(&ctx.options.attributes.letters_allow)
        .unwrap_or_default();
    Verdict::from_bool(matches_letters(ctx.value, &extra))
}

fn alphanumeric(ctx: &RuleContext<'_>) -> Verdict {
    let extra = ctx
        .field
        .attribute(&ctx.options.attributes.alphanumeric_allow)
        .unwrap_or_default();
    Verdict::from_bool(matches_alphanumeric(ctx.value, &extra))
}

fn regex(ctx: &RuleContext<'_>) -> Verdict {
    let attrs = &ctx.options.attributes;
    // Whitespace in a pattern is significant, so no trimming here
    let Some(pattern) = ctx.field.attribute(&attrs.regex_pattern).filter(|p| !p.is_empty()) else {
        return Verdict::Fail;
    };
    let flags = ctx.attr(&attrs.regex_flags).unwrap_or_default();

    match matches_pattern(ctx.value, &pattern, &flags) {
        Ok(matched) => Verdict::from_bool(matched),
        Err(err) => {
            ctx.report(EngineError::InvalidPattern {
                field: ctx.field.id().to_string(),
                pattern,
                reason: err.to_string(),
            });
            Verdict::Unconfirmed
        }
    }
}

fn telephone(ctx: &RuleContext<'_>) -> Verdict {
    let format = ctx
        .attr(&ctx.options.attributes.telephone_format)
        .unwrap_or_else(|| ctx.options.default_telephone_format.clone());
    // Unknown format codes fail like a bad number
    Verdict::from_bool(is_telephone(ctx.value, &format).unwrap_or(false))
}

fn color(ctx: &RuleContext<'_>) -> Verdict {
    let families: Vec<ColorFamily> = ctx
        .attr(&ctx.options.attributes.color_types)
        .map(|list| split_list(&list))
        .unwrap_or_default()
        .iter()
        .filter_map(|name| ColorFamily::from_name(name))
        .collect();
    Verdict::from_bool(is_color(ctx.value, &families))
}

fn confirmation(ctx: &RuleContext<'_>) -> Verdict {
    let Some(target) = ctx.target(&ctx.options.attributes.confirmation_target) else {
        return Verdict::Unconfirmed;
    };
    if ctx.value == effective_value(ctx.form, target) {
        Verdict::Pass
    } else {
        ctx.fail_with("confirmation", &[("field", ctx.label_of(target).as_str())])
    }
}

fn password(ctx: &RuleContext<'_>) -> Verdict {
    let required = ctx
        .attr(&ctx.options.attributes.password_strength)
        .and_then(|strength| strength.parse::<u8>().ok())
        .unwrap_or(ctx.options.default_password_strength)
        .min(5);
    let score = password_score(ctx.value, &ctx.options.password_special_chars);

    if score >= required {
        Verdict::Pass
    } else {
        ctx.fail_with(
            "password",
            &[
                ("strength", strength_label(score)),
                ("required", strength_label(required)),
            ],
        )
    }
}
