//! Line-level helpers for the `key = value` settings format.

/// What: Check if a line should be skipped (empty or comment).
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Split a settings line into a normalized key and a cleaned value.
///
/// Inputs:
/// - `line`: Line in `key = value` form
///
/// Output:
/// - `Some((key, value))` with the key lower-cased and `.`, `-`, spaces mapped to `_`;
///   `None` for comments, blank lines, or lines without `=`.
///
/// Details:
/// - Only the first `=` splits, so values may contain `=` (query strings).
/// - Inline comments start at a `#` preceded by whitespace; `//` is kept so URLs survive.
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    if skip_comment_or_empty(line) {
        return None;
    }
    let (raw_key, raw_val) = line.trim().split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    if key.is_empty() {
        return None;
    }
    Some((key, strip_inline_comment(raw_val).to_string()))
}

/// Cut a trailing ` # comment` from a value and trim it.
fn strip_inline_comment(val: &str) -> &str {
    let val = val.trim();
    let bytes = val.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return val[..i].trim();
        }
    }
    val.trim()
}

/// What: Interpret common boolean spellings.
///
/// Output:
/// - `Some(true)` for `true/1/yes/on`, `Some(false)` for `false/0/no/off`, else `None`.
#[must_use]
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
