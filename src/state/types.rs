//! Core value types used by the catalog, the listing pipeline, and the session.

use std::collections::BTreeMap;

/// Sentinel code given to records whose `cca3` is missing or blank.
pub const UNKNOWN_CODE: &str = "unknown";

/// A currency entry attached to a country.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Currency {
    /// Display name (e.g., "Euro").
    pub name: String,
    /// Symbol (e.g., "€"); empty when the source has none.
    pub symbol: String,
}

/// Flag image references.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FlagImages {
    /// Raster flag URL.
    pub png: String,
    /// Vector flag URL.
    pub svg: String,
}

/// Fully defaulted country record.
///
/// Records are produced once by the wire normalization step in
/// [`crate::sources`] and are never mutated afterwards, so the pipeline and
/// the front end can read every field without re-checking for absence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CountryRecord {
    /// Upper-case ISO 3166-1 alpha-3 code, or [`UNKNOWN_CODE`].
    pub code: String,
    /// Alpha-2 code (empty when absent).
    pub cca2: String,
    /// Numeric code (empty when absent).
    pub ccn3: String,
    /// Common name.
    pub name_common: String,
    /// Official name.
    pub name_official: String,
    /// Capital cities, possibly none.
    pub capitals: Vec<String>,
    /// Population; 0 when the source omitted it.
    pub population: u64,
    /// Area in km².
    pub area: Option<f64>,
    /// Region; empty when absent.
    pub region: String,
    /// Subregion; empty when absent.
    pub subregion: String,
    /// Language code to display name.
    pub languages: BTreeMap<String, String>,
    /// Currency code to currency.
    pub currencies: BTreeMap<String, Currency>,
    /// Timezone descriptors in source order (e.g., `UTC+01:00`).
    pub timezones: Vec<String>,
    /// Neighbouring country codes.
    pub borders: Vec<String>,
    /// Independence flag; absent in the source means `false`.
    pub independent: bool,
    /// Flag images.
    pub flag: FlagImages,
    /// Latitude/longitude pair.
    pub latlng: Option<(f64, f64)>,
}

impl CountryRecord {
    /// What: Build a minimal record with only identity and name populated.
    ///
    /// Inputs:
    /// - `code`: Alpha-3 code (upper-cased here)
    /// - `name`: Common name, also used as the official name
    ///
    /// Output:
    /// - Record with every other field at its default.
    #[must_use]
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_ascii_uppercase(),
            cca2: String::new(),
            ccn3: String::new(),
            name_common: name.to_string(),
            name_official: name.to_string(),
            capitals: Vec::new(),
            population: 0,
            area: None,
            region: String::new(),
            subregion: String::new(),
            languages: BTreeMap::new(),
            currencies: BTreeMap::new(),
            timezones: Vec::new(),
            borders: Vec::new(),
            independent: false,
            flag: FlagImages::default(),
            latlng: None,
        }
    }

    /// Region for display, `"Unknown"` when the source had none.
    #[must_use]
    pub fn display_region(&self) -> &str {
        if self.region.is_empty() {
            "Unknown"
        } else {
            &self.region
        }
    }

    /// Area used for filtering and sorting (absent counts as 0).
    #[must_use]
    pub fn area_or_zero(&self) -> f64 {
        self.area.unwrap_or(0.0)
    }
}

/// Key the listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Case-insensitive common name.
    #[default]
    Name,
    /// Population.
    Population,
    /// Area in km².
    Area,
}

impl SortKey {
    /// Return the string key used in persisted preferences.
    #[must_use]
    pub const fn as_config_key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Population => "population",
            Self::Area => "area",
        }
    }

    /// Parse a sort key from its persisted string (case-insensitive).
    ///
    /// Inputs: `s` stored or user-supplied value.
    ///
    /// Output: `Some(SortKey)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" | "alphabetical" => Some(Self::Name),
            "population" | "pop" => Some(Self::Population),
            "area" | "size" => Some(Self::Area),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Return the string key used in persisted preferences.
    #[must_use]
    pub const fn as_config_key(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Parse a direction from `asc`/`desc` (and long forms).
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// Combined sort configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    /// Sort key.
    pub key: SortKey,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Tri-state independence filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum IndependenceFilter {
    /// No constraint.
    #[default]
    #[serde(rename = "all")]
    Any,
    /// Independent countries only.
    #[serde(rename = "true")]
    Independent,
    /// Dependent territories only.
    #[serde(rename = "false")]
    Dependent,
}

impl IndependenceFilter {
    /// The flag value a record must carry, or `None` for [`Self::Any`].
    #[must_use]
    pub const fn required(&self) -> Option<bool> {
        match self {
            Self::Any => None,
            Self::Independent => Some(true),
            Self::Dependent => Some(false),
        }
    }

    /// Parse `all`/`true`/`false` (plus a few aliases).
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "any" | "" => Some(Self::Any),
            "true" | "yes" | "independent" => Some(Self::Independent),
            "false" | "no" | "dependent" => Some(Self::Dependent),
            _ => None,
        }
    }
}

/// One bound of a numeric range filter, kept as the text the user entered.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RangeBound(pub String);

impl RangeBound {
    /// What: Interpret the bound as a number.
    ///
    /// Output:
    /// - `Some(value)` for numeric text; `None` for empty, non-numeric or NaN
    ///   text, which then imposes no constraint.
    ///
    /// Details:
    /// - Infinity is spelled `Infinity` (optionally signed) or reached by an
    ///   overflowing numeral; `inf` and `infinity` are not numbers here.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        let t = self.0.trim();
        if t.is_empty() {
            return None;
        }
        let v = t.parse::<f64>().ok().filter(|v| !v.is_nan())?;
        if v.is_infinite() {
            let unsigned = t.trim_start_matches(['+', '-']);
            let numeral = unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.');
            if unsigned != "Infinity" && !numeral {
                return None;
            }
        }
        Some(v)
    }
}

impl From<&str> for RangeBound {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Inclusive numeric range filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct RangeFilter {
    /// Lower bound.
    #[serde(default)]
    pub min: RangeBound,
    /// Upper bound.
    #[serde(default)]
    pub max: RangeBound,
}

impl RangeFilter {
    /// Whether `value` satisfies every bound that parses as a number.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min.value()
            && value < min
        {
            return false;
        }
        if let Some(max) = self.max.value()
            && value > max
        {
            return false;
        }
        true
    }
}

/// User-adjustable filters.
///
/// The serde shape matches the persisted `countryFilters` object.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Exact region, empty for no filter.
    pub region: String,
    /// Exact subregion, empty for no filter.
    pub subregion: String,
    /// Population range.
    pub population: RangeFilter,
    /// Area range.
    pub area: RangeFilter,
    /// Language display name.
    pub language: String,
    /// Currency name.
    pub currency: String,
    /// Timezone descriptor.
    pub timezone: String,
    /// Independence tri-state.
    pub independent: IndependenceFilter,
}

impl FilterCriteria {
    /// True when no filter constrains the catalog.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A single entry in the recent-searches list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentSearch {
    /// Free-text query that did not resolve to one country.
    Query(String),
    /// Query that matched a specific country.
    Country {
        /// Text the user typed.
        query: String,
        /// Matched country's common name.
        name: String,
        /// Matched country's code.
        code: String,
    },
}

impl RecentSearch {
    /// Text the user typed.
    #[must_use]
    pub fn query(&self) -> &str {
        match self {
            Self::Query(q) | Self::Country { query: q, .. } => q,
        }
    }

    /// Matched code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Query(_) => None,
            Self::Country { code, .. } => Some(code),
        }
    }
}

/// Authenticated user as returned by the account service.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    /// Backend identifier.
    #[serde(default, alias = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default = "default_user_name")]
    pub name: String,
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// Favorite country codes.
    #[serde(default)]
    pub favorites: Vec<String>,
}

/// Fallback display name for users the backend returns without one.
fn default_user_name() -> String {
    "User".to_string()
}

impl User {
    /// Whether `code` is among the favorites (case-insensitive).
    #[must_use]
    pub fn has_favorite(&self, code: &str) -> bool {
        self.favorites.iter().any(|c| c.eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Range bounds ignore empty, garbage and NaN text
    ///
    /// - Input: Assorted bound strings
    /// - Output: Only numeric text yields a value
    fn range_bound_lenient_parsing() {
        assert_eq!(RangeBound::from("").value(), None);
        assert_eq!(RangeBound::from("   ").value(), None);
        assert_eq!(RangeBound::from("abc").value(), None);
        assert_eq!(RangeBound::from("NaN").value(), None);
        assert_eq!(RangeBound::from(" 42 ").value(), Some(42.0));
        assert_eq!(RangeBound::from("1e3").value(), Some(1000.0));
        assert_eq!(RangeBound::from("0").value(), Some(0.0));
        assert_eq!(RangeBound::from("inf").value(), None);
        assert_eq!(RangeBound::from("-infinity").value(), None);
        assert_eq!(RangeBound::from("Infinity").value(), Some(f64::INFINITY));
        assert_eq!(RangeBound::from("-Infinity").value(), Some(f64::NEG_INFINITY));
        assert_eq!(RangeBound::from("1e400").value(), Some(f64::INFINITY));
    }

    #[test]
    /// What: A misspelled infinity bound leaves every record in range
    fn range_filter_ignores_inf_spelling() {
        let r = RangeFilter {
            min: "inf".into(),
            max: RangeBound::default(),
        };
        assert!(r.contains(0.0));
        assert!(r.contains(331_000_000.0));
    }

    #[test]
    /// What: Range containment respects each bound independently
    fn range_filter_contains() {
        let r = RangeFilter {
            min: "10".into(),
            max: "x".into(),
        };
        assert!(!r.contains(9.0));
        assert!(r.contains(10.0));
        assert!(r.contains(1e12));
        let r = RangeFilter {
            min: RangeBound::default(),
            max: "5".into(),
        };
        assert!(r.contains(0.0));
        assert!(!r.contains(5.5));
    }

    #[test]
    /// What: Filter criteria JSON matches the persisted object shape
    ///
    /// - Input: Default criteria, then a legacy object with missing keys
    /// - Output: Expected keys and string bounds; missing keys default
    fn filter_criteria_serde_shape() {
        let v = serde_json::to_value(FilterCriteria::default()).expect("serialize");
        assert_eq!(v["independent"], "all");
        assert_eq!(v["population"]["min"], "");
        assert_eq!(v["area"]["max"], "");

        let parsed: FilterCriteria =
            serde_json::from_str(r#"{"region":"Europe","independent":"true"}"#).expect("parse");
        assert_eq!(parsed.region, "Europe");
        assert_eq!(parsed.independent, IndependenceFilter::Independent);
        assert!(parsed.population.min.value().is_none());
    }

    #[test]
    /// What: Sort keys and directions round-trip through their config strings
    fn sort_config_keys() {
        for k in [SortKey::Name, SortKey::Population, SortKey::Area] {
            assert_eq!(SortKey::from_config_key(k.as_config_key()), Some(k));
        }
        assert_eq!(SortKey::from_config_key("bogus"), None);
        assert_eq!(
            SortDirection::from_config_key("DESC"),
            Some(SortDirection::Descending)
        );
    }

    #[test]
    /// What: Users decoded without optional fields receive defaults
    fn user_defaults() {
        let u: User = serde_json::from_str(r#"{"email":"a@b.co"}"#).expect("parse");
        assert_eq!(u.name, "User");
        assert!(u.favorites.is_empty());
        let u: User =
            serde_json::from_str(r#"{"_id":"7","name":"Ann","favorites":["fra"]}"#).expect("parse");
        assert_eq!(u.id, "7");
        assert!(u.has_favorite("FRA"));
    }
}
