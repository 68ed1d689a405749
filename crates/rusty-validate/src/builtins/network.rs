//! Address rules

use rusty_validate_core::{is_domain, is_email, is_ipv4, is_ipv6, is_url};

use crate::rule::{RuleContext, Validator, Verdict};

pub(super) fn validators() -> Vec<Validator> {
    vec![
        Validator::new("ipv4", "Please enter a valid IPv4 address", |ctx| {
            Verdict::from_bool(is_ipv4(ctx.value))
        }),
        Validator::new("ipv6", "Please enter a valid IPv6 address", ipv6),
        Validator::new("domain", "Please enter a valid domain", |ctx| {
            Verdict::from_bool(is_domain(ctx.value))
        }),
        Validator::new("email", "Please enter a valid email address", |ctx| {
            Verdict::from_bool(is_email(ctx.value))
        }),
        Validator::new("url", "Please enter a valid URL", |ctx| {
            Verdict::from_bool(is_url(ctx.value))
        }),
    ]
}

fn ipv6(ctx: &RuleContext<'_>) -> Verdict {
    let canonical = ctx.flag(&ctx.options.attributes.ipv6_canonical);
    Verdict::from_bool(is_ipv6(ctx.value, canonical))
}
