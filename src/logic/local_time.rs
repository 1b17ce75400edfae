//! Local time for a country's timezone descriptor (e.g., `UTC+05:30`).

use chrono::{DateTime, FixedOffset, Utc};

/// What: Parse a `UTC`, `UTC±HH` or `UTC±HH:MM` descriptor.
///
/// Inputs:
/// - `descriptor`: Timezone text as published by the catalog
///
/// Output:
/// - `Some(FixedOffset)` for well-formed descriptors; `None` otherwise.
///
/// Details:
/// - Accepts ASCII `-` and the Unicode minus sign the catalog sometimes uses.
#[must_use]
pub fn parse_utc_offset(descriptor: &str) -> Option<FixedOffset> {
    let d = descriptor.trim();
    let rest = d
        .strip_prefix("UTC")
        .or_else(|| d.strip_prefix("GMT"))?;
    if rest.is_empty() {
        return FixedOffset::east_opt(0);
    }
    let (sign, body) = if let Some(b) = rest.strip_prefix('+') {
        (1, b)
    } else if let Some(b) = rest.strip_prefix('-').or_else(|| rest.strip_prefix('\u{2212}')) {
        (-1, b)
    } else {
        return None;
    };
    let (h, m) = match body.split_once(':') {
        Some((h, m)) => (h, m),
        None => (body, "0"),
    };
    let hours: i32 = h.parse().ok()?;
    let minutes: i32 = m.parse().ok()?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// What: Format `now` in the descriptor's offset as `HH:MM:SS`.
///
/// Output:
/// - `None` when the descriptor cannot be parsed.
#[must_use]
pub fn local_time_at(descriptor: &str, now: DateTime<Utc>) -> Option<String> {
    let offset = parse_utc_offset(descriptor)?;
    Some(now.with_timezone(&offset).format("%H:%M:%S").to_string())
}

/// Current local time for `descriptor`.
#[must_use]
pub fn local_time_now(descriptor: &str) -> Option<String> {
    local_time_at(descriptor, Utc::now())
}
