//! End-to-end filter and sort behaviour through `ListingView`.

use country_atlas as crate_root;

use crate_root::logic::{ListingView, PageContext, extract_facets};
use crate_root::state::{
    Catalog, CountryRecord, CriteriaStore, FilterUpdate, IndependenceFilter, SortDirection,
    SortKey,
};

fn country(code: &str, name: &str, population: u64, region: &str) -> CountryRecord {
    let mut r = CountryRecord::new(code, name);
    r.population = population;
    r.region = region.to_string();
    r
}

/// USA, Canada and France; only France is independent.
fn three_countries() -> Catalog {
    let mut fra = country("FRA", "France", 67_000_000, "Europe");
    fra.independent = true;
    Catalog::from_records(vec![
        country("USA", "United States", 331_000_000, "Americas"),
        country("CAN", "Canada", 38_000_000, "Americas"),
        fra,
    ])
}

fn view() -> ListingView {
    ListingView::new(
        three_countries(),
        CriteriaStore::default(),
        PageContext::Catalog,
    )
}

fn visible_codes(view: &ListingView) -> Vec<String> {
    view.visible().iter().map(|r| r.code.clone()).collect()
}

#[test]
/// What: Region filter with population descending keeps the Americas, largest first
///
/// - Input: region "Americas", sort population desc
/// - Output: [USA, CAN], no further page
fn region_filter_population_desc() {
    let mut v = view();
    assert!(v.apply(FilterUpdate::Region("Americas".into())));
    v.set_sort_key(SortKey::Population);
    v.set_sort_direction(SortDirection::Descending);
    assert_eq!(visible_codes(&v), vec!["USA", "CAN"]);
    assert_eq!(v.total(), 2);
    assert!(!v.has_more());
}

#[test]
/// What: Default sort is case-insensitive name ascending
fn default_sort_by_name() {
    let v = view();
    assert_eq!(visible_codes(&v), vec!["CAN", "FRA", "USA"]);
}

#[test]
/// What: A population lower bound drops Canada; results follow the name sort
fn population_minimum() {
    let mut v = view();
    v.apply(FilterUpdate::PopulationMin("50000000".into()));
    assert_eq!(visible_codes(&v), vec!["FRA", "USA"]);
}

#[test]
/// What: The independence filter keeps only independent records, and garbage bounds are ignored
fn independence_and_lenient_bounds() {
    let mut v = view();
    v.apply(FilterUpdate::Independence(IndependenceFilter::Independent));
    assert_eq!(visible_codes(&v), vec!["FRA"]);

    v.apply(FilterUpdate::Independence(IndependenceFilter::Any));
    v.apply(FilterUpdate::PopulationMax("lots".into()));
    assert_eq!(v.total(), 3);
}

#[test]
/// What: Resetting filters restores the full catalog but keeps the sort
fn reset_keeps_sort() {
    let mut v = view();
    v.set_sort_key(SortKey::Population);
    v.apply(FilterUpdate::Region("Europe".into()));
    assert_eq!(v.total(), 1);
    assert!(v.reset_filters());
    assert_eq!(visible_codes(&v), vec!["CAN", "FRA", "USA"]);
    assert_eq!(v.criteria().sort().key, SortKey::Population);
}

#[test]
/// What: Search narrows by name, and an empty catalog yields empty facets and listing
fn search_and_empty_catalog() {
    let mut v = view();
    v.set_search("  an ");
    assert_eq!(visible_codes(&v), vec!["CAN", "FRA"]);

    let empty = ListingView::new(
        Catalog::default(),
        CriteriaStore::default(),
        PageContext::Landing,
    );
    assert!(empty.visible().is_empty());
    assert!(!empty.has_more());
    let f = extract_facets(empty.catalog().records());
    assert!(f.regions.is_empty());
    assert!(f.timezones.is_empty());
}

#[test]
/// What: Facets are sorted and deduplicated across the catalog
fn facets_from_catalog() {
    let f = extract_facets(three_countries().records());
    assert_eq!(f.regions, vec!["Americas".to_string(), "Europe".to_string()]);
}
