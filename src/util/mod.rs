//! Small utility helpers for encoding, JSON extraction, name matching, and config lines.
//!
//! The functions in this module are dependency-light and used by the wire
//! normalization, the query helpers, and the settings parser.

pub mod config;

use serde_json::Value;
use std::fmt::Write;

/// What: Percent-encode a string for use in URLs according to RFC 3986.
///
/// Inputs:
/// - `input`: String to encode.
///
/// Output:
/// - Returns a percent-encoded string where reserved characters are escaped.
///
/// Details:
/// - Unreserved characters (`A-Z`, `a-z`, `0-9`, `-`, `.`, `_`, `~`) are left as-is.
/// - Space is encoded as `%20` (not `+`).
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                let _ = write!(out, "{b:02X}");
            }
        }
    }
    out
}

/// What: Extract a string value from a JSON object by key, defaulting to empty string.
///
/// Inputs:
/// - `v`: JSON value to extract from.
/// - `key`: Key to look up in the JSON object.
///
/// Output:
/// - The string value if found, or an empty string if the key is missing or not a string.
#[must_use]
pub fn s(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// What: Extract an array of strings from a JSON object.
///
/// Inputs:
/// - `v`: JSON value to extract from.
/// - `key`: Key holding the array.
///
/// Output:
/// - The string elements of the array; non-string elements are dropped.
///
/// Details:
/// - A bare string under `key` is accepted as a one-element list (some
///   proxies flatten single capitals).
#[must_use]
pub fn arrs(v: &Value, key: &str) -> Vec<String> {
    match v.get(key) {
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|e| e.as_str().map(ToOwned::to_owned))
            .collect(),
        Some(Value::String(one)) if !one.trim().is_empty() => vec![one.clone()],
        _ => Vec::new(),
    }
}

/// What: Extract a non-negative integer from a number or numeric string.
///
/// Inputs:
/// - `v`: JSON value to extract from.
/// - `key`: Key to look up.
///
/// Output:
/// - `Some(u64)` for non-negative integers, finite non-negative floats (truncated),
///   or strings that parse as `u64`; `None` otherwise.
#[must_use]
pub fn u64_of(v: &Value, key: &str) -> Option<u64> {
    let n = v.get(key)?;
    if let Some(u) = n.as_u64() {
        return Some(u);
    }
    if let Some(f) = n.as_f64()
        && f.is_finite()
        && f >= 0.0
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return Some(f as u64);
    }
    n.as_str().and_then(|s| s.trim().parse::<u64>().ok())
}

/// What: Extract a finite, non-negative float from a number or numeric string.
#[must_use]
pub fn f64_of(v: &Value, key: &str) -> Option<f64> {
    let n = v.get(key)?;
    let f = n
        .as_f64()
        .or_else(|| n.as_str().and_then(|s| s.trim().parse::<f64>().ok()))?;
    (f.is_finite() && f >= 0.0).then_some(f)
}

/// What: Rank how well `name` matches a lower-cased query.
///
/// Inputs:
/// - `name`: Candidate name.
/// - `query_lower`: Query string (must be lowercase).
///
/// Output:
/// - 0 = exact match, 1 = prefix match, 2 = substring match, 3 = no match.
#[must_use]
pub fn match_rank(name: &str, query_lower: &str) -> u8 {
    let n = name.to_lowercase();
    if !query_lower.is_empty() {
        if n == query_lower {
            return 0;
        }
        if n.starts_with(query_lower) {
            return 1;
        }
        if n.contains(query_lower) {
            return 2;
        }
    }
    3
}

/// What: Check whether text looks like an alpha-3 country code.
///
/// Output:
/// - `true` for exactly three ASCII letters.
#[must_use]
pub fn is_country_code(text: &str) -> bool {
    text.len() == 3 && text.bytes().all(|b| b.is_ascii_alphabetic())
}

/// What: Pad `text` with spaces to `width` display columns.
///
/// Details:
/// - Uses Unicode display width so names with wide glyphs line up in tables.
/// - Text already wider than `width` is returned unchanged.
#[must_use]
pub fn pad_display(text: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    let w = UnicodeWidthStr::width(text);
    if w >= width {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + (width - w));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width - w));
    out
}

/// What: Format an integer with thousands separators (e.g., `1,234,567`).
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
