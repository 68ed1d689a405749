//! CSS-style color notations

use once_cell::sync::Lazy;
use regex::Regex;

static FUNCTIONAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(rgba?|hsla?|cmyk)\(([^()]*)\)$").unwrap());

static HEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
});

static COMPONENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([0-9]+(?:\.[0-9]+)?|\.[0-9]+)(%|deg)?$").unwrap());

/// Color notation families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFamily {
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Cmyk,
    Hex,
}

impl ColorFamily {
    pub const ALL: [ColorFamily; 6] = [
        ColorFamily::Rgb,
        ColorFamily::Rgba,
        ColorFamily::Hsl,
        ColorFamily::Hsla,
        ColorFamily::Cmyk,
        ColorFamily::Hex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorFamily::Rgb => "rgb",
            ColorFamily::Rgba => "rgba",
            ColorFamily::Hsl => "hsl",
            ColorFamily::Hsla => "hsla",
            ColorFamily::Cmyk => "cmyk",
            ColorFamily::Hex => "hex",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    Plain,
    Percent,
    Degrees,
}

fn component(text: &str) -> Option<(f64, Unit)> {
    let caps = COMPONENT.captures(text.trim())?;
    let n: f64 = caps[1].parse().ok()?;
    let unit = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        None => Unit::Plain,
        Some(u) if u == "%" => Unit::Percent,
        Some(_) => Unit::Degrees,
    };
    Some((n, unit))
}

fn channel(text: &str) -> bool {
    match component(text) {
        Some((n, Unit::Plain)) => n <= 255.0,
        Some((n, Unit::Percent)) => n <= 100.0,
        _ => false,
    }
}

fn percent(text: &str, required: bool) -> bool {
    match component(text) {
        Some((n, Unit::Percent)) => n <= 100.0,
        Some((n, Unit::Plain)) if !required => n <= 100.0,
        _ => false,
    }
}

fn hue(text: &str) -> bool {
    matches!(component(text), Some((n, Unit::Plain | Unit::Degrees)) if n <= 360.0)
}

fn alpha(text: &str) -> bool {
    match component(text) {
        Some((n, Unit::Plain)) => n <= 1.0,
        Some((n, Unit::Percent)) => n <= 100.0,
        _ => false,
    }
}

fn family_of(value: &str) -> Option<ColorFamily> {
    if HEX.is_match(value) {
        return Some(ColorFamily::Hex);
    }

    let caps = FUNCTIONAL.captures(value)?;
    let args: Vec<&str> = caps[2].split(',').collect();
    let family = ColorFamily::from_name(&caps[1])?;

    let valid = match (family, args.as_slice()) {
        (ColorFamily::Rgb, [r, g, b]) => channel(r) && channel(g) && channel(b),
        (ColorFamily::Rgba, [r, g, b, a]) => channel(r) && channel(g) && channel(b) && alpha(a),
        (ColorFamily::Hsl, [h, s, l]) => hue(h) && percent(s, true) && percent(l, true),
        (ColorFamily::Hsla, [h, s, l, a]) => {
            hue(h) && percent(s, true) && percent(l, true) && alpha(a)
        }
        (ColorFamily::Cmyk, [c, m, y, k]) => {
            [c, m, y, k].iter().all(|part| percent(part, false))
        }
        _ => false,
    };
    valid.then_some(family)
}

/// Whether `value` is a color in one of `families` (empty = any family)
///
/// # Examples
/// ```
/// use rusty_validate_core::color::{is_color, ColorFamily};
/// assert!(is_color("#ff8800", &[]));
/// assert!(is_color("rgba(255, 136, 0, 0.5)", &[ColorFamily::Rgba]));
/// assert!(!is_color("rgb(256, 0, 0)", &[]));
/// ```
pub fn is_color(value: &str, families: &[ColorFamily]) -> bool {
    match family_of(value.trim()) {
        Some(family) => families.is_empty() || families.contains(&family),
        None => false,
    }
}
