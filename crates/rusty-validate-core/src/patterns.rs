//! Compiled pattern fragments shared by the validators
//!
//! Character classes follow RFC 3986 (URLs), RFC 5322 (email local parts)
//! and RFC 4291 / RFC 6874 (IPv6 groups and zone identifiers).

use once_cell::sync::Lazy;
use regex::Regex;

/// Signed decimal numeral: `-12`, `+3.5`, `42`
pub static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+(?:\.[0-9]+)?$").unwrap());

/// Unsigned integer numeral
pub static UNSIGNED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

const OCTET: &str = r"(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])";

/// Dotted quad without prefix
pub static IPV4: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(?:{OCTET}\.){{3}}{OCTET}$")).unwrap());

/// Dotted quad with an optional `/0`..`/32` prefix
pub static IPV4_CIDR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(?:{OCTET}\.){{3}}{OCTET}(?:/(?:3[0-2]|[12][0-9]|[0-9]))?$")).unwrap()
});

/// One IPv6 group
pub static HEXTET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{1,4}$").unwrap());

/// IPv6 zone identifier (the part after `%`)
pub static ZONE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Za-z._~-]+$").unwrap());

/// CIDR prefix digits, no leading zeros
pub static PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:0|[1-9][0-9]{0,2})$").unwrap());

/// Domain label after case folding
pub static DOMAIN_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$").unwrap());

/// Top-level domain: letters only
pub static TLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]{2,63}$").unwrap());

/// Unquoted email local part (dot-atom)
pub static LOCAL_DOT_ATOM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$").unwrap()
});

/// Quoted email local part
pub static LOCAL_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"(?:[\x20\x21\x23-\x5B\x5D-\x7E]|\\[\x20-\x7E])*"$"#).unwrap());

/// URL userinfo: unreserved, sub-delims, `:` and percent-encoded octets
pub static URL_USERINFO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9\-._~!$&'()*+,;=:]|%[0-9A-Fa-f]{2})*$").unwrap()
});

/// URL path: zero or more `/segment`
pub static URL_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:/(?:[A-Za-z0-9\-._~!$&'()*+,;=:@]|%[0-9A-Fa-f]{2})*)*$").unwrap()
});

/// URL query or fragment body
pub static URL_QUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9\-._~!$&'()*+,;=:@/?]|%[0-9A-Fa-f]{2})*$").unwrap()
});

/// Time format grammar: `HH:mm`, `HH:mm:ss`, `HH:mm:ss.sss`, each with optional `A`
pub static TIME_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^HH:mm(:ss(\.sss)?)?(\s?A)?$").unwrap());

/// Human readable size: `10mb`, `1.5 GB`, `512b`
pub static SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([0-9]+(?:\.[0-9]+)?)\s*(gb|mb|kb|b)$").unwrap());

/// Image dimension spec: `800x600`
pub static DIMENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)\s*[xX]\s*([0-9]+)$").unwrap());
