//! Normalization from the catalog service's JSON shape to [`CountryRecord`].
//!
//! Every defaulting rule lives here so the pipeline never sees a missing field.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::state::types::{CountryRecord, Currency, FlagImages, UNKNOWN_CODE};
use crate::util::{arrs, f64_of, s, u64_of};

/// What: Normalize one country object from the catalog service.
///
/// Inputs:
/// - `v`: JSON value for a single country
///
/// Output:
/// - `Some(CountryRecord)` for JSON objects (missing fields defaulted); `None` otherwise.
///
/// Details:
/// - Missing `cca3` becomes [`UNKNOWN_CODE`]; codes are upper-cased.
/// - `name` may be an object `{common, official}` or a bare string.
/// - Language values may be strings or `{name}` objects; blank names are dropped.
/// - Negative, non-finite, or non-numeric population/area fall back to 0/absent.
#[must_use]
pub fn normalize_country(v: &Value) -> Option<CountryRecord> {
    if !v.is_object() {
        return None;
    }
    let code = {
        let c = s(v, "cca3");
        let c = c.trim();
        if c.is_empty() {
            UNKNOWN_CODE.to_string()
        } else {
            c.to_ascii_uppercase()
        }
    };

    let (name_common, name_official) = match v.get("name") {
        Some(Value::String(n)) => (n.clone(), String::new()),
        Some(n) => (s(n, "common"), s(n, "official")),
        None => (String::new(), String::new()),
    };
    let name_common = if name_common.trim().is_empty() {
        "Unknown".to_string()
    } else {
        name_common
    };
    let name_official = if name_official.trim().is_empty() {
        name_common.clone()
    } else {
        name_official
    };

    let flag = v.get("flags").map_or_else(FlagImages::default, |f| FlagImages {
        png: s(f, "png"),
        svg: s(f, "svg"),
    });

    Some(CountryRecord {
        code,
        cca2: s(v, "cca2"),
        ccn3: s(v, "ccn3"),
        name_common,
        name_official,
        capitals: arrs(v, "capital"),
        population: u64_of(v, "population").unwrap_or(0),
        area: f64_of(v, "area"),
        region: s(v, "region"),
        subregion: s(v, "subregion"),
        languages: languages_of(v),
        currencies: currencies_of(v),
        timezones: arrs(v, "timezones"),
        borders: arrs(v, "borders")
            .into_iter()
            .map(|b| b.trim().to_ascii_uppercase())
            .filter(|b| !b.is_empty())
            .collect(),
        independent: v
            .get("independent")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        flag,
        latlng: latlng_of(v),
    })
}

/// Language code -> display name, skipping blank names.
fn languages_of(v: &Value) -> BTreeMap<String, String> {
    let Some(obj) = v.get("languages").and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    obj.iter()
        .filter_map(|(code, lang)| {
            let name = match lang {
                Value::String(n) => n.clone(),
                other => s(other, "name"),
            };
            (!name.trim().is_empty()).then(|| (code.clone(), name))
        })
        .collect()
}

/// Currency code -> `{name, symbol}`, skipping non-object entries.
fn currencies_of(v: &Value) -> BTreeMap<String, Currency> {
    let Some(obj) = v.get("currencies").and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    obj.iter()
        .filter(|(_, c)| c.is_object())
        .map(|(code, c)| {
            (
                code.clone(),
                Currency {
                    name: s(c, "name"),
                    symbol: s(c, "symbol"),
                },
            )
        })
        .collect()
}

/// `[lat, lng]` when both are finite numbers.
fn latlng_of(v: &Value) -> Option<(f64, f64)> {
    let arr = v.get("latlng")?.as_array()?;
    let lat = arr.first()?.as_f64()?;
    let lng = arr.get(1)?.as_f64()?;
    (lat.is_finite() && lng.is_finite()).then_some((lat, lng))
}

/// What: Normalize a full-collection payload.
///
/// Inputs:
/// - `v`: Response body of the full-collection endpoint
///
/// Output:
/// - `Ok(records)` in source order; non-object elements are skipped with a warning.
///
/// # Errors
/// - The payload is not a JSON array.
pub fn parse_catalog(v: &Value) -> super::Result<Vec<CountryRecord>> {
    let Some(arr) = v.as_array() else {
        return Err("unexpected catalog payload: expected a JSON array".into());
    };
    let mut out = Vec::with_capacity(arr.len());
    let mut skipped = 0usize;
    for item in arr {
        match normalize_country(item) {
            Some(rec) => out.push(rec),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "[Catalog] skipped malformed country entries");
    }
    Ok(out)
}

/// What: Normalize a single-country payload.
///
/// Output:
/// - The record for an object or the first element of an array; `None` for an
///   empty array or a non-country shape.
#[must_use]
pub fn parse_single(v: &Value) -> Option<CountryRecord> {
    match v {
        Value::Array(arr) => arr.first().and_then(normalize_country),
        other => normalize_country(other),
    }
}
