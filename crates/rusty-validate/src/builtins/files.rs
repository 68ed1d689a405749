//! File input rules
//!
//! Every selected file must satisfy the rule; an input with no files
//! passes (pair with `required` to demand one). Image rules decode the
//! files, so they are async validators.

use futures::future::{FutureExt, LocalBoxFuture};
use rusty_validate_core::{is_extension_allowed, is_mime_allowed, parse_dimension, parse_size, split_list};
use tracing::debug;

use crate::rule::{AsyncValidator, RuleContext, Validator, Verdict};

pub(super) fn validators() -> Vec<Validator> {
    vec![
        Validator::new("file_size", "File is too large", file_size),
        Validator::new("file_type", "This file type is not allowed", file_type),
        Validator::new("file_extension", "This file extension is not allowed", file_extension),
    ]
}

pub(super) fn async_validators() -> Vec<AsyncValidator> {
    vec![
        AsyncValidator::new("image_dimension", "Image has the wrong dimensions", image_dimension),
        AsyncValidator::new("image_height", "Image is too tall", image_height),
        AsyncValidator::new("image_width", "Image is too wide", image_width),
    ]
}

fn file_size(ctx: &RuleContext<'_>) -> Verdict {
    let Some(spec) = ctx.attr(&ctx.options.attributes.file_size) else {
        return Verdict::Unconfirmed;
    };
    let Some(limit) = parse_size(&spec) else {
        return Verdict::Unconfirmed;
    };

    if ctx.field.files().iter().all(|file| file.size() <= limit) {
        Verdict::Pass
    } else {
        ctx.fail_with("file_size", &[("size", spec.as_str())])
    }
}

fn listed(ctx: &RuleContext<'_>, attribute: &str) -> Vec<String> {
    ctx.attr(attribute).map(|list| split_list(&list)).unwrap_or_default()
}

fn file_type(ctx: &RuleContext<'_>) -> Verdict {
    let allowed = listed(ctx, &ctx.options.attributes.file_types);
    if allowed.is_empty() {
        return Verdict::Unconfirmed;
    }
    Verdict::from_bool(
        ctx.field
            .files()
            .iter()
            .all(|file| is_mime_allowed(file.mime_type(), &allowed)),
    )
}

fn file_extension(ctx: &RuleContext<'_>) -> Verdict {
    let allowed = listed(ctx, &ctx.options.attributes.file_extensions);
    if allowed.is_empty() {
        return Verdict::Unconfirmed;
    }
    Verdict::from_bool(
        ctx.field
            .files()
            .iter()
            .all(|file| is_extension_allowed(file.name(), &allowed)),
    )
}

/// Decoded `(width, height)` of every selected file
///
/// A file that is not an image, or does not decode, ends the rule with the
/// file type message.
async fn image_sizes(ctx: &RuleContext<'_>) -> Result<Vec<(u32, u32)>, Verdict> {
    let mut sizes = Vec::new();
    for file in ctx.field.files() {
        if !file.mime_type().trim().to_ascii_lowercase().starts_with("image/") {
            return Err(ctx.fail_with("file_type", &[]));
        }
        match file.decode_image_dimensions().await {
            Ok(size) => sizes.push(size),
            Err(error) => {
                debug!(field = ctx.field.id(), %error, "image decode failed");
                return Err(ctx.fail_with("file_type", &[]));
            }
        }
    }
    Ok(sizes)
}

fn image_dimension<'a>(ctx: &'a RuleContext<'a>) -> LocalBoxFuture<'a, Verdict> {
    async move {
        let Some(spec) = ctx.attr(&ctx.options.attributes.image_dimension) else {
            return Verdict::Unconfirmed;
        };
        let Some((width, height)) = parse_dimension(&spec) else {
            return Verdict::Unconfirmed;
        };
        match image_sizes(ctx).await {
            Err(verdict) => verdict,
            Ok(sizes) if sizes.iter().all(|size| *size == (width, height)) => Verdict::Pass,
            Ok(_) => ctx.fail_with(
                "image_dimension",
                &[
                    ("width", width.to_string().as_str()),
                    ("height", height.to_string().as_str()),
                ],
            ),
        }
    }
    .boxed_local()
}

fn max_pixels(ctx: &RuleContext<'_>, attribute: &str) -> Option<u32> {
    ctx.attr(attribute)?.parse().ok()
}

fn image_height<'a>(ctx: &'a RuleContext<'a>) -> LocalBoxFuture<'a, Verdict> {
    async move {
        let Some(max) = max_pixels(ctx, &ctx.options.attributes.image_max_height) else {
            return Verdict::Unconfirmed;
        };
        match image_sizes(ctx).await {
            Err(verdict) => verdict,
            Ok(sizes) if sizes.iter().all(|(_, height)| *height <= max) => Verdict::Pass,
            Ok(_) => ctx.fail_with("image_height", &[("height", max.to_string().as_str())]),
        }
    }
    .boxed_local()
}

fn image_width<'a>(ctx: &'a RuleContext<'a>) -> LocalBoxFuture<'a, Verdict> {
    async move {
        let Some(max) = max_pixels(ctx, &ctx.options.attributes.image_max_width) else {
            return Verdict::Unconfirmed;
        };
        match image_sizes(ctx).await {
            Err(verdict) => verdict,
            Ok(sizes) if sizes.iter().all(|(width, _)| *width <= max) => Verdict::Pass,
            Ok(_) => ctx.fail_with("image_width", &[("width", max.to_string().as_str())]),
        }
    }
    .boxed_local()
}
