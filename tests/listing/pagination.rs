//! Paging through a large listing.

use country_atlas as crate_root;

use crate_root::logic::{ListingView, PageContext};
use crate_root::state::{Catalog, CountryRecord, CriteriaStore, FilterUpdate};

fn numbered(n: usize) -> Catalog {
    let records = (0..n)
        .map(|i| {
            let mut r = CountryRecord::new(&format!("C{i:02}"), &format!("Country {i:02}"));
            r.region = if i % 2 == 0 { "Even" } else { "Odd" }.to_string();
            r
        })
        .collect();
    Catalog::from_records(records)
}

#[test]
/// What: Catalog pages grow by 20 until the list is exhausted
///
/// - Input: 45 records, three "load more" clicks
/// - Output: 20, 40, 45 visible; the last click is a no-op
fn catalog_pages_of_twenty() {
    let mut v = ListingView::new(numbered(45), CriteriaStore::default(), PageContext::Catalog);
    assert_eq!(v.visible().len(), 20);
    assert!(v.has_more());
    assert!(v.load_more());
    assert_eq!(v.visible().len(), 40);
    assert!(v.load_more());
    assert_eq!(v.visible().len(), 45);
    assert!(!v.has_more());
    assert!(!v.load_more());
    assert_eq!(v.visible().len(), 45);
}

#[test]
/// What: Landing pages hold 8 and a filter change returns to the first page
fn landing_resets_on_filter_change() {
    let mut v = ListingView::new(numbered(30), CriteriaStore::default(), PageContext::Landing);
    assert_eq!(v.visible().len(), 8);
    v.load_more();
    v.load_more();
    assert_eq!(v.visible().len(), 24);

    v.apply(FilterUpdate::Region("Even".into()));
    assert_eq!(v.total(), 15);
    assert_eq!(v.visible().len(), 8);
    assert!(v.has_more());
}

#[test]
/// What: Re-applying the same filter is not a change and keeps the page
fn unchanged_filter_keeps_page() {
    let mut v = ListingView::new(numbered(30), CriteriaStore::default(), PageContext::Landing);
    v.apply(FilterUpdate::Region("Odd".into()));
    v.load_more();
    assert_eq!(v.visible().len(), 15);
    assert!(!v.apply(FilterUpdate::Region("Odd".into())));
    assert_eq!(v.visible().len(), 15);
}
