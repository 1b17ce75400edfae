use std::cmp::Ordering;

use crate::state::{CountryRecord, SortDirection, SortKey, SortSpec};

/// What: Compare two records by a sort key in ascending order.
///
/// Details:
/// - Names compare lower-cased; numbers compare with NaN-safe partial ordering.
#[must_use]
pub fn compare_by(key: SortKey, a: &CountryRecord, b: &CountryRecord) -> Ordering {
    match key {
        SortKey::Name => a
            .name_common
            .to_lowercase()
            .cmp(&b.name_common.to_lowercase()),
        SortKey::Population => a.population.cmp(&b.population),
        SortKey::Area => a
            .area_or_zero()
            .partial_cmp(&b.area_or_zero())
            .unwrap_or(Ordering::Equal),
    }
}

/// What: Sort records in place according to `spec`.
///
/// Inputs:
/// - `records`: Filtered list, still in catalog order
/// - `spec`: Key and direction
///
/// Details:
/// - Stable in both directions: descending flips the comparator rather than
///   reversing the output, so records with equal keys keep catalog order.
pub fn sort_records(records: &mut [CountryRecord], spec: SortSpec) {
    match spec.direction {
        SortDirection::Ascending => records.sort_by(|a, b| compare_by(spec.key, a, b)),
        SortDirection::Descending => records.sort_by(|a, b| compare_by(spec.key, b, a)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(code: &str, name: &str, pop: u64, area: Option<f64>) -> CountryRecord {
        let mut r = CountryRecord::new(code, name);
        r.population = pop;
        r.area = area;
        r
    }

    fn codes(rs: &[CountryRecord]) -> Vec<&str> {
        rs.iter().map(|r| r.code.as_str()).collect()
    }

    #[test]
    /// What: Name sort is case-insensitive
    fn sort_name_case_insensitive() {
        let mut v = vec![
            rec("USA", "United States", 0, None),
            rec("CAN", "canada", 0, None),
            rec("FRA", "France", 0, None),
        ];
        sort_records(&mut v, SortSpec::default());
        assert_eq!(codes(&v), vec!["CAN", "FRA", "USA"]);
    }

    #[test]
    /// What: Ascending then descending on distinct populations gives exactly reversed order
    fn sort_population_reverses() {
        let base = vec![
            rec("A", "a", 5, None),
            rec("B", "b", 1, None),
            rec("C", "c", 9, None),
        ];
        let mut asc = base.clone();
        sort_records(
            &mut asc,
            SortSpec {
                key: SortKey::Population,
                direction: SortDirection::Ascending,
            },
        );
        let mut desc = base;
        sort_records(
            &mut desc,
            SortSpec {
                key: SortKey::Population,
                direction: SortDirection::Descending,
            },
        );
        let mut rev = codes(&asc);
        rev.reverse();
        assert_eq!(codes(&desc), rev);
    }

    #[test]
    /// What: Equal keys keep input order in both directions; absent area counts as zero
    fn sort_stable_ties() {
        let base = vec![
            rec("X", "x", 0, Some(10.0)),
            rec("Y", "y", 0, None),
            rec("Z", "z", 0, Some(0.0)),
        ];
        let mut v = base.clone();
        sort_records(
            &mut v,
            SortSpec {
                key: SortKey::Area,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(codes(&v), vec!["X", "Y", "Z"]);
        let mut v = base;
        sort_records(
            &mut v,
            SortSpec {
                key: SortKey::Population,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(codes(&v), vec!["X", "Y", "Z"]);
    }
}
