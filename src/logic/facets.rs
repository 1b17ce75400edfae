//! Facet extraction: distinct filterable values drawn from the whole catalog.

use std::collections::BTreeSet;

use crate::state::CountryRecord;

/// Distinct values available to each filter control, alphabetically sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    /// Region names.
    pub regions: Vec<String>,
    /// Subregion names.
    pub subregions: Vec<String>,
    /// Language display names.
    pub languages: Vec<String>,
    /// Currency names.
    pub currencies: Vec<String>,
    /// Timezone descriptors.
    pub timezones: Vec<String>,
}

/// Insert `value` unless it is blank.
fn insert_non_blank(set: &mut BTreeSet<String>, value: &str) {
    if !value.trim().is_empty() {
        set.insert(value.to_string());
    }
}

/// What: Derive the five facet lists from a set of records.
///
/// Inputs:
/// - `records`: The entire catalog (never the filtered subset, so that choosing
///   one filter does not prune the choices offered by the others)
///
/// Output:
/// - [`Facets`] with each list deduplicated, sorted, and free of blank entries.
#[must_use]
pub fn extract_facets(records: &[CountryRecord]) -> Facets {
    let mut regions = BTreeSet::new();
    let mut subregions = BTreeSet::new();
    let mut languages = BTreeSet::new();
    let mut currencies = BTreeSet::new();
    let mut timezones = BTreeSet::new();
    for r in records {
        insert_non_blank(&mut regions, &r.region);
        insert_non_blank(&mut subregions, &r.subregion);
        for name in r.languages.values() {
            insert_non_blank(&mut languages, name);
        }
        for c in r.currencies.values() {
            insert_non_blank(&mut currencies, &c.name);
        }
        for tz in &r.timezones {
            insert_non_blank(&mut timezones, tz);
        }
    }
    Facets {
        regions: regions.into_iter().collect(),
        subregions: subregions.into_iter().collect(),
        languages: languages.into_iter().collect(),
        currencies: currencies.into_iter().collect(),
        timezones: timezones.into_iter().collect(),
    }
}
