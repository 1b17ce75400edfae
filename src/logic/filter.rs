//! Filtering stage of the listing pipeline.

use crate::state::{CountryRecord, FilterCriteria};

/// What: Decide whether one record passes every active filter.
///
/// Inputs:
/// - `record`: Normalized country record
/// - `criteria`: Active filters
/// - `search_lower`: Trimmed, lower-cased search text (empty for none)
///
/// Output:
/// - `true` when the record satisfies the conjunction of all active filters.
///
/// Details:
/// - Range filters use population/area with absent values counted as 0.
/// - Language and currency match on display names, not codes.
#[must_use]
pub fn matches(record: &CountryRecord, criteria: &FilterCriteria, search_lower: &str) -> bool {
    if !search_lower.is_empty() && !record.name_common.to_lowercase().contains(search_lower) {
        return false;
    }
    if !criteria.region.is_empty() && record.region != criteria.region {
        return false;
    }
    if !criteria.subregion.is_empty() && record.subregion != criteria.subregion {
        return false;
    }
    #[allow(clippy::cast_precision_loss)]
    let population = record.population as f64;
    if !criteria.population.contains(population) {
        return false;
    }
    if !criteria.area.contains(record.area_or_zero()) {
        return false;
    }
    if !criteria.language.is_empty()
        && !record.languages.values().any(|l| *l == criteria.language)
    {
        return false;
    }
    if !criteria.currency.is_empty()
        && !record.currencies.values().any(|c| c.name == criteria.currency)
    {
        return false;
    }
    if !criteria.timezone.is_empty() && !record.timezones.contains(&criteria.timezone) {
        return false;
    }
    criteria
        .independent
        .required()
        .is_none_or(|want| record.independent == want)
}

/// What: Filter records, preserving catalog order.
///
/// Inputs:
/// - `records`: Catalog in source order
/// - `criteria`: Active filters
/// - `search`: Free-text name search (blank for none)
///
/// Output:
/// - Clones of the passing records, in the same relative order as `records`.
#[must_use]
pub fn filter_records(
    records: &[CountryRecord],
    criteria: &FilterCriteria,
    search: &str,
) -> Vec<CountryRecord> {
    let search_lower = search.trim().to_lowercase();
    records
        .iter()
        .filter(|r| matches(r, criteria, &search_lower))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::{Currency, IndependenceFilter, RangeBound};

    fn sample() -> Vec<CountryRecord> {
        let mut usa = CountryRecord::new("USA", "United States");
        usa.population = 331_000_000;
        usa.region = "Americas".into();
        usa.area = Some(9_372_610.0);
        usa.languages.insert("eng".into(), "English".into());
        usa.currencies.insert(
            "USD".into(),
            Currency {
                name: "United States dollar".into(),
                symbol: "$".into(),
            },
        );
        usa.timezones = vec!["UTC-05:00".into(), "UTC-08:00".into()];
        let mut can = CountryRecord::new("CAN", "Canada");
        can.population = 38_000_000;
        can.region = "Americas".into();
        can.languages.insert("eng".into(), "English".into());
        can.languages.insert("fra".into(), "French".into());
        let mut fra = CountryRecord::new("FRA", "France");
        fra.population = 67_000_000;
        fra.region = "Europe".into();
        fra.subregion = "Western Europe".into();
        fra.independent = true;
        fra.languages.insert("fra".into(), "French".into());
        vec![usa, can, fra]
    }

    fn codes(rs: &[CountryRecord]) -> Vec<&str> {
        rs.iter().map(|r| r.code.as_str()).collect()
    }

    #[test]
    /// What: Each filter kind narrows the catalog, preserving order
    ///
    /// - Input: USA/CAN/FRA sample and one active filter at a time
    /// - Output: Expected subset in catalog order
    fn filter_single_criteria() {
        let all = sample();
        let mut c = FilterCriteria {
            region: "Americas".into(),
            ..Default::default()
        };
        assert_eq!(codes(&filter_records(&all, &c, "")), vec!["USA", "CAN"]);

        c = FilterCriteria::default();
        c.population.min = RangeBound::from("50000000");
        assert_eq!(codes(&filter_records(&all, &c, "")), vec!["USA", "FRA"]);

        c = FilterCriteria {
            language: "French".into(),
            ..Default::default()
        };
        assert_eq!(codes(&filter_records(&all, &c, "")), vec!["CAN", "FRA"]);

        c = FilterCriteria {
            currency: "United States dollar".into(),
            ..Default::default()
        };
        assert_eq!(codes(&filter_records(&all, &c, "")), vec!["USA"]);

        c = FilterCriteria {
            timezone: "UTC-08:00".into(),
            ..Default::default()
        };
        assert_eq!(codes(&filter_records(&all, &c, "")), vec!["USA"]);

        c = FilterCriteria {
            independent: IndependenceFilter::Independent,
            ..Default::default()
        };
        assert_eq!(codes(&filter_records(&all, &c, "")), vec!["FRA"]);

        c = FilterCriteria {
            independent: IndependenceFilter::Dependent,
            ..Default::default()
        };
        assert_eq!(codes(&filter_records(&all, &c, "")), vec!["USA", "CAN"]);
    }

    #[test]
    /// What: Absent area counts as zero and garbage bounds are ignored
    fn filter_area_and_lenient_bounds() {
        let all = sample();
        let mut c = FilterCriteria::default();
        c.area.max = RangeBound::from("1000");
        assert_eq!(codes(&filter_records(&all, &c, "")), vec!["CAN", "FRA"]);
        c.area.max = RangeBound::from("lots");
        c.population.min = RangeBound::from("");
        assert_eq!(filter_records(&all, &c, "").len(), 3);
    }

    #[test]
    /// What: Search text matches common names case-insensitively
    fn filter_search_text() {
        let all = sample();
        let c = FilterCriteria::default();
        assert_eq!(codes(&filter_records(&all, &c, "  AN ")), vec!["CAN", "FRA"]);
        assert_eq!(filter_records(&all, &c, "   ").len(), 3);
    }

    #[test]
    /// What: Filtering is idempotent and the "all" independence filter is neutral
    fn filter_idempotent_and_neutral() {
        let all = sample();
        let c = FilterCriteria {
            region: "Americas".into(),
            language: "English".into(),
            ..Default::default()
        };
        let once = filter_records(&all, &c, "");
        let twice = filter_records(&once, &c, "");
        assert_eq!(once, twice);
        assert_eq!(
            filter_records(&all, &FilterCriteria::default(), "").len(),
            all.len()
        );
    }
}
