//! Search-box behaviour: suggestions while typing and resolution on submit.

use crate::state::{Catalog, CountryRecord, RecentSearch};
use crate::util::{is_country_code, match_rank};

/// Maximum number of suggestions shown under the search box.
pub const MAX_SUGGESTIONS: usize = 10;

/// Where a submitted search leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    /// Detail page of one country.
    Country(String),
    /// Result listing for free text.
    Results(String),
}

/// What: Suggest countries for partially typed text.
///
/// Inputs:
/// - `catalog`: Loaded catalog
/// - `text`: Raw search box contents
///
/// Output:
/// - Up to [`MAX_SUGGESTIONS`] records, in catalog order within each group.
///
/// Details:
/// - Blank text suggests nothing.
/// - Three ASCII letters match a country code exactly.
/// - A single character matches name prefixes only.
/// - Longer text lists name-prefix matches first, then substring matches.
#[must_use]
pub fn suggest<'a>(catalog: &'a Catalog, text: &str) -> Vec<&'a CountryRecord> {
    let q = text.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }
    let records = catalog.records();
    if is_country_code(text) {
        return records
            .iter()
            .filter(|r| r.code.eq_ignore_ascii_case(&q))
            .collect();
    }
    let ranked = records.iter().map(|r| (match_rank(&r.name_common, &q), r));
    if q.chars().count() == 1 {
        return ranked
            .filter(|(rank, _)| *rank <= 1)
            .map(|(_, r)| r)
            .take(MAX_SUGGESTIONS)
            .collect();
    }
    let (prefix, rest): (Vec<_>, Vec<_>) = ranked
        .filter(|(rank, _)| *rank <= 2)
        .partition(|(rank, _)| *rank <= 1);
    prefix
        .into_iter()
        .chain(rest)
        .map(|(_, r)| r)
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// What: Resolve submitted search text.
///
/// Inputs:
/// - `catalog`: Loaded catalog
/// - `text`: Raw search box contents
///
/// Output:
/// - `None` for blank text; otherwise the target and the recent-search entry to record.
///
/// Details:
/// - An exact (case-insensitive) name or code match opens that country.
/// - Other three-letter text is treated as a code even if the catalog lacks it.
/// - Anything else opens the result listing.
#[must_use]
pub fn resolve(catalog: &Catalog, text: &str) -> Option<(SearchTarget, RecentSearch)> {
    let query = text.trim();
    if query.is_empty() {
        return None;
    }
    let exact = catalog.records().iter().find(|r| {
        r.name_common.eq_ignore_ascii_case(query) || r.code.eq_ignore_ascii_case(query)
    });
    if let Some(r) = exact {
        return Some((
            SearchTarget::Country(r.code.clone()),
            RecentSearch::Country {
                query: query.to_string(),
                name: r.name_common.clone(),
                code: r.code.clone(),
            },
        ));
    }
    let recent = RecentSearch::Query(query.to_string());
    if is_country_code(query) {
        Some((SearchTarget::Country(query.to_ascii_uppercase()), recent))
    } else {
        Some((SearchTarget::Results(query.to_string()), recent))
    }
}

/// What: Recent-search entry for a clicked suggestion.
#[must_use]
pub fn pick_suggestion(record: &CountryRecord) -> RecentSearch {
    RecentSearch::Country {
        query: record.name_common.clone(),
        name: record.name_common.clone(),
        code: record.code.clone(),
    }
}

/// What: Target for a clicked recent-search entry.
#[must_use]
pub fn recent_target(entry: &RecentSearch) -> SearchTarget {
    match entry {
        RecentSearch::Country { code, .. } => SearchTarget::Country(code.clone()),
        RecentSearch::Query(q) if is_country_code(q) => {
            SearchTarget::Country(q.to_ascii_uppercase())
        }
        RecentSearch::Query(q) => SearchTarget::Results(q.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat() -> Catalog {
        Catalog::from_records(
            [
                ("USA", "United States"),
                ("GBR", "United Kingdom"),
                ("ARE", "United Arab Emirates"),
                ("TZA", "Tanzania"),
                ("FRA", "France"),
                ("MRT", "Mauritania"),
            ]
            .iter()
            .map(|(c, n)| CountryRecord::new(c, n))
            .collect(),
        )
    }

    fn codes(rs: &[&CountryRecord]) -> Vec<String> {
        rs.iter().map(|r| r.code.clone()).collect()
    }

    #[test]
    /// What: Suggestions follow the code / single-letter / prefix-then-substring rules
    fn suggest_rules() {
        let c = cat();
        assert!(suggest(&c, "   ").is_empty());
        assert_eq!(codes(&suggest(&c, "fra")), vec!["FRA"]);
        assert_eq!(codes(&suggest(&c, "t")), vec!["TZA"]);
        assert_eq!(codes(&suggest(&c, "ta")), vec!["TZA", "USA", "MRT"]);
        assert_eq!(codes(&suggest(&c, "unit")), vec!["USA", "GBR", "ARE"]);
    }

    #[test]
    /// What: Prefix matches come before substring matches
    fn suggest_prefix_first() {
        let c = cat();
        assert_eq!(codes(&suggest(&c, "an")), vec!["TZA", "FRA", "MRT"]);
        let c = Catalog::from_records(vec![
            CountryRecord::new("MRT", "Mauritania"),
            CountryRecord::new("TZA", "Tanzania"),
        ]);
        assert_eq!(codes(&suggest(&c, "ta")), vec!["TZA", "MRT"]);
    }

    #[test]
    /// What: Resolution prefers exact matches, then code-shaped text, then results
    fn resolve_targets() {
        let c = cat();
        let (t, r) = resolve(&c, " france ").expect("target");
        assert_eq!(t, SearchTarget::Country("FRA".into()));
        assert_eq!(r.code(), Some("FRA"));
        assert_eq!(r.query(), "france");

        let (t, r) = resolve(&c, "deu").expect("target");
        assert_eq!(t, SearchTarget::Country("DEU".into()));
        assert_eq!(r, RecentSearch::Query("deu".into()));

        let (t, _) = resolve(&c, "united").expect("target");
        assert_eq!(t, SearchTarget::Results("united".into()));
        assert!(resolve(&c, "  ").is_none());
    }

    #[test]
    /// What: Recent entries and suggestion clicks map to their targets
    fn recent_and_pick() {
        let fra = CountryRecord::new("FRA", "France");
        let entry = pick_suggestion(&fra);
        assert_eq!(recent_target(&entry), SearchTarget::Country("FRA".into()));
        assert_eq!(
            recent_target(&RecentSearch::Query("jpn".into())),
            SearchTarget::Country("JPN".into())
        );
        assert_eq!(
            recent_target(&RecentSearch::Query("island".into())),
            SearchTarget::Results("island".into())
        );
    }
}
