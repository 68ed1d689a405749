//! File size, type and extension helpers

use crate::patterns::{DIMENSION, SIZE};

/// Converts a human readable size (`10mb`, `1.5GB`, `512b`) to bytes
///
/// Units are binary multiples: `1kb` is 1024 bytes.
pub fn parse_size(size: &str) -> Option<u64> {
    let caps = SIZE.captures(size.trim())?;
    let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
    let multiplier: f64 = match caps.get(2)?.as_str().to_ascii_lowercase().as_str() {
        "gb" => 1024.0 * 1024.0 * 1024.0,
        "mb" => 1024.0 * 1024.0,
        "kb" => 1024.0,
        _ => 1.0,
    };
    Some((amount * multiplier).round() as u64)
}

/// Parses a `WIDTHxHEIGHT` dimension spec
pub fn parse_dimension(spec: &str) -> Option<(u32, u32)> {
    let caps = DIMENSION.captures(spec.trim())?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// Whether `mime` is in `allowed`; entries may use a `type/*` wildcard
pub fn is_mime_allowed(mime: &str, allowed: &[String]) -> bool {
    let mime = mime.trim().to_ascii_lowercase();
    allowed.iter().any(|entry| {
        let entry = entry.trim().to_ascii_lowercase();
        match entry.strip_suffix("/*") {
            Some(family) => mime.split('/').next() == Some(family),
            None => entry == mime,
        }
    })
}

/// Lowercase extension of a file name, without the dot
pub fn file_extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether the file name's extension is in `allowed` (case-insensitive, dots optional)
pub fn is_extension_allowed(name: &str, allowed: &[String]) -> bool {
    let Some(ext) = file_extension(name) else {
        return false;
    };
    allowed
        .iter()
        .any(|entry| entry.trim().trim_start_matches('.').eq_ignore_ascii_case(&ext))
}
