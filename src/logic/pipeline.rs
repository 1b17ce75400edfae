//! Filter-sort-paginate pipeline and the listing view that drives it.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, error};

use crate::logic::facets::{Facets, extract_facets};
use crate::logic::filter::filter_records;
use crate::logic::paginate::{PageContext, Pagination};
use crate::logic::sort::sort_records;
use crate::state::{
    Catalog, CountryRecord, CriteriaStore, FilterCriteria, FilterUpdate, SortDirection, SortKey,
    SortSpec,
};

/// Output of one derivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derived {
    /// Filtered and sorted records.
    filtered: Vec<CountryRecord>,
    /// Length of the visible prefix of `filtered`.
    visible_len: usize,
    /// Whether records remain beyond the visible prefix.
    has_more: bool,
}

impl Derived {
    /// Every record passing the filters, in display order.
    #[must_use]
    pub fn filtered(&self) -> &[CountryRecord] {
        &self.filtered
    }

    /// The visible prefix.
    #[must_use]
    pub fn visible(&self) -> &[CountryRecord] {
        &self.filtered[..self.visible_len.min(self.filtered.len())]
    }

    /// Whether records remain beyond the visible prefix.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }
}

/// What: Derive the listing from the catalog and current criteria.
///
/// Inputs:
/// - `records`: Catalog in source order
/// - `criteria`: Active filters
/// - `search`: Free-text name search
/// - `sort`: Sort key and direction
/// - `displayed`: Current displayed count
///
/// Output:
/// - [`Derived`] with the filtered/sorted list, visible length and `has_more`.
///
/// Details:
/// - Pure: no I/O, no logging, inputs are only read.
#[must_use]
pub fn derive(
    records: &[CountryRecord],
    criteria: &FilterCriteria,
    search: &str,
    sort: SortSpec,
    displayed: usize,
) -> Derived {
    let mut filtered = filter_records(records, criteria, search);
    sort_records(&mut filtered, sort);
    let visible_len = displayed.min(filtered.len());
    let has_more = displayed < filtered.len();
    Derived {
        filtered,
        visible_len,
        has_more,
    }
}

/// A catalog listing with its criteria, search text and pagination.
///
/// Every mutating method recomputes the derived list synchronously. Any
/// change to filters, sort or search text resets pagination to one page.
#[derive(Debug)]
pub struct ListingView {
    /// Loaded catalog (immutable for the view's lifetime).
    catalog: Catalog,
    /// Facets drawn from the whole catalog.
    facets: Facets,
    /// Filters and sort, with persistence listeners attached.
    criteria: CriteriaStore,
    /// Free-text search (not persisted).
    search: String,
    /// Displayed-count cursor (not persisted).
    pagination: Pagination,
    /// Last derivation.
    derived: Derived,
}

impl ListingView {
    /// What: Create a view and compute its first derivation.
    ///
    /// Inputs:
    /// - `catalog`: Loaded (possibly empty) catalog
    /// - `criteria`: Store seeded from persisted preferences
    /// - `context`: Landing or catalog page, fixing the page size
    #[must_use]
    pub fn new(catalog: Catalog, criteria: CriteriaStore, context: PageContext) -> Self {
        let facets = extract_facets(catalog.records());
        let mut view = Self {
            catalog,
            facets,
            criteria,
            search: String::new(),
            pagination: Pagination::new(context),
            derived: Derived::default(),
        };
        view.recompute();
        view
    }

    /// Replace the catalog (e.g., when a load completes) and recompute facets.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.facets = extract_facets(catalog.records());
        self.catalog = catalog;
        self.pagination.reset();
        self.recompute();
    }

    /// Loaded catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Facets for the filter controls.
    #[must_use]
    pub const fn facets(&self) -> &Facets {
        &self.facets
    }

    /// Criteria store (read-only).
    #[must_use]
    pub const fn criteria(&self) -> &CriteriaStore {
        &self.criteria
    }

    /// Current search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current pagination cursor.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Last derivation.
    #[must_use]
    pub const fn derived(&self) -> &Derived {
        &self.derived
    }

    /// Visible slice.
    #[must_use]
    pub fn visible(&self) -> &[CountryRecord] {
        self.derived.visible()
    }

    /// Total number of matching records.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.derived.filtered.len()
    }

    /// Whether a load-more would reveal more records.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.derived.has_more
    }

    /// Apply a filter update. Returns `true` when the filters changed.
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        let changed = self.criteria.apply(update);
        self.after_criteria_change(changed)
    }

    /// Reset all filters. Returns `true` when any filter was active.
    pub fn reset_filters(&mut self) -> bool {
        let changed = self.criteria.reset_filters();
        self.after_criteria_change(changed)
    }

    /// Change the sort key. Returns `true` when it changed.
    pub fn set_sort_key(&mut self, key: SortKey) -> bool {
        let changed = self.criteria.set_sort_key(key);
        self.after_criteria_change(changed)
    }

    /// Change the sort direction. Returns `true` when it changed.
    pub fn set_sort_direction(&mut self, direction: SortDirection) -> bool {
        let changed = self.criteria.set_sort_direction(direction);
        self.after_criteria_change(changed)
    }

    /// Change the search text. Returns `true` when it changed.
    pub fn set_search(&mut self, text: &str) -> bool {
        if self.search == text {
            return false;
        }
        text.clone_into(&mut self.search);
        self.after_criteria_change(true)
    }

    /// What: Reveal one more page.
    ///
    /// Output:
    /// - `true` when the visible slice grew; a stale click is a no-op.
    pub fn load_more(&mut self) -> bool {
        if !self.pagination.load_more(self.total()) {
            return false;
        }
        self.refresh_window();
        true
    }

    /// Reset pagination and recompute after a real change.
    fn after_criteria_change(&mut self, changed: bool) -> bool {
        if changed {
            self.pagination.reset();
            self.recompute();
        }
        changed
    }

    /// Update the visible window without re-filtering.
    fn refresh_window(&mut self) {
        let total = self.derived.filtered.len();
        self.derived.visible_len = self.pagination.visible_len(total);
        self.derived.has_more = self.pagination.has_more(total);
    }

    /// Re-run the pipeline.
    fn recompute(&mut self) {
        self.recompute_with(derive);
    }

    /// Run `derivation` over the current inputs; a panic inside it degrades to
    /// an empty listing.
    fn recompute_with<F>(&mut self, derivation: F)
    where
        F: FnOnce(&[CountryRecord], &FilterCriteria, &str, SortSpec, usize) -> Derived,
    {
        let records = self.catalog.records();
        let filters = self.criteria.filters();
        let sort = self.criteria.sort();
        let search = self.search.as_str();
        let displayed = self.pagination.displayed();
        let result = catch_unwind(AssertUnwindSafe(|| {
            derivation(records, filters, search, sort, displayed)
        }));
        self.derived = result.unwrap_or_else(|_| {
            error!("[Listing] derivation failed; showing an empty list");
            Derived::default()
        });
        debug!(
            total = self.derived.filtered.len(),
            visible = self.derived.visible_len,
            has_more = self.derived.has_more,
            "[Listing] recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::IndependenceFilter;

    fn catalog(n: usize) -> Catalog {
        Catalog::from_records(
            (0..n)
                .map(|i| {
                    let mut r = CountryRecord::new(&format!("C{i:02}"), &format!("Country {i:02}"));
                    r.region = if i % 2 == 0 { "Even" } else { "Odd" }.into();
                    r.population = u64::try_from(i).unwrap_or(0) * 1000;
                    r
                })
                .collect(),
        )
    }

    #[test]
    /// What: derive returns the visible prefix and has_more flag
    fn derive_window() {
        let cat = catalog(5);
        let d = derive(cat.records(), &FilterCriteria::default(), "", SortSpec::default(), 3);
        assert_eq!(d.filtered.len(), 5);
        assert_eq!(d.visible().len(), 3);
        assert!(d.has_more);
        let d = derive(cat.records(), &FilterCriteria::default(), "", SortSpec::default(), 5);
        assert!(!d.has_more);
    }

    #[test]
    /// What: A visible length past the end is clamped instead of panicking
    fn derived_visible_clamps() {
        let d = Derived {
            filtered: vec![CountryRecord::new("FRA", "France")],
            visible_len: 5,
            has_more: false,
        };
        assert_eq!(d.visible().len(), 1);
        assert_eq!(d.filtered().len(), 1);
    }

    #[test]
    /// What: A panicking derivation leaves an empty listing and the view usable
    ///
    /// - Input: View over 30 records, derivation that panics
    /// - Output: Empty listing; the next real change derives normally again
    fn panicking_derivation_shows_empty_list() {
        let mut v = ListingView::new(catalog(30), CriteriaStore::default(), PageContext::Catalog);
        assert_eq!(v.total(), 30);
        v.recompute_with(|_, _, _, _, _| panic!("malformed record"));
        assert_eq!(v.total(), 0);
        assert!(v.visible().is_empty());
        assert!(!v.has_more());
        assert!(v.apply(FilterUpdate::Region("Odd".into())));
        assert_eq!(v.total(), 15);
    }

    #[test]
    /// What: Any criteria change resets the displayed count to one page
    ///
    /// - Input: 30 records, landing context, two load-more clicks, then a filter change
    /// - Output: Displayed count back to 8
    fn criteria_change_resets_pagination() {
        let mut v = ListingView::new(catalog(30), CriteriaStore::default(), PageContext::Landing);
        assert_eq!(v.visible().len(), 8);
        assert!(v.load_more());
        assert!(v.load_more());
        assert_eq!(v.visible().len(), 24);
        assert!(v.apply(FilterUpdate::Independence(IndependenceFilter::Dependent)));
        assert_eq!(v.pagination().displayed(), 8);
        assert!(v.load_more());
        assert!(v.set_sort_direction(SortDirection::Descending));
        assert_eq!(v.pagination().displayed(), 8);
        assert!(v.load_more());
        assert!(v.set_search("country"));
        assert_eq!(v.pagination().displayed(), 8);
    }

    #[test]
    /// What: No-op updates leave pagination alone
    fn unchanged_criteria_keep_pagination() {
        let mut v = ListingView::new(catalog(30), CriteriaStore::default(), PageContext::Catalog);
        assert!(v.load_more());
        assert!(!v.apply(FilterUpdate::Region(String::new())));
        assert!(!v.set_sort_key(SortKey::Name));
        assert_eq!(v.pagination().displayed(), 40);
        assert!(!v.has_more());
        assert!(!v.load_more());
    }

    #[test]
    /// What: Facets come from the whole catalog, unaffected by active filters
    fn facets_ignore_filters() {
        let mut v = ListingView::new(catalog(4), CriteriaStore::default(), PageContext::Catalog);
        assert!(v.apply(FilterUpdate::Region("Odd".into())));
        assert_eq!(v.total(), 2);
        assert_eq!(v.facets().regions, vec!["Even", "Odd"]);
    }

    #[test]
    /// What: An empty catalog yields an empty listing without errors
    fn empty_catalog_listing() {
        let mut v =
            ListingView::new(Catalog::default(), CriteriaStore::default(), PageContext::Catalog);
        assert!(v.visible().is_empty());
        assert!(!v.has_more());
        assert!(!v.load_more());
        v.set_catalog(catalog(2));
        assert_eq!(v.visible().len(), 2);
    }
}
