use serde_json::Value;

use super::storage::PreferenceStore;
use crate::state::{
    CriteriaListener, CriteriaStore, FilterCriteria, SortDirection, SortKey, SortSpec,
};

/// Key of the persisted filter object.
pub const FILTERS_KEY: &str = "countryFilters";
/// Key of the persisted sort key.
pub const SORT_BY_KEY: &str = "countrySortBy";
/// Key of the persisted sort direction.
pub const SORT_ORDER_KEY: &str = "countrySortOrder";

/// Criteria listener that writes filters and sort to a preference store.
#[derive(Debug)]
pub struct PersistCriteria<S> {
    /// Destination store.
    store: S,
}

impl<S: PreferenceStore> PersistCriteria<S> {
    /// Persist into `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: PreferenceStore> CriteriaListener for PersistCriteria<S> {
    /// What: Write the full filter object and both sort fields.
    ///
    /// Details:
    /// - The three keys are written independently, so a damaged one does not
    ///   affect the others when read back.
    fn on_change(&mut self, filters: &FilterCriteria, sort: SortSpec) {
        match serde_json::to_value(filters) {
            Ok(v) => self.store.set(FILTERS_KEY, v),
            Err(e) => tracing::warn!(error = %e, "[Persist] Failed to encode filters"),
        }
        self.store
            .set(SORT_BY_KEY, Value::from(sort.key.as_config_key()));
        self.store
            .set(SORT_ORDER_KEY, Value::from(sort.direction.as_config_key()));
        tracing::debug!(
            sort_by = sort.key.as_config_key(),
            order = sort.direction.as_config_key(),
            "[Persist] Criteria saved"
        );
    }
}

/// Decode the filter object, also accepting it double-encoded as a JSON string.
fn decode_filters(v: Value) -> Option<FilterCriteria> {
    match v {
        Value::String(s) => serde_json::from_str(&s).ok(),
        other => serde_json::from_value(other).ok(),
    }
}

/// What: Read persisted filters and sort, defaulting each independently.
///
/// Inputs:
/// - `store`: Preference store
///
/// Output:
/// - `(filters, sort)` where any absent or unparseable part is its default.
pub fn load_criteria<S: PreferenceStore + ?Sized>(store: &S) -> (FilterCriteria, SortSpec) {
    let filters = match store.get(FILTERS_KEY) {
        Some(v) => decode_filters(v).unwrap_or_else(|| {
            tracing::warn!("[Persist] Stored filters unreadable; using defaults");
            FilterCriteria::default()
        }),
        None => FilterCriteria::default(),
    };
    let key = store
        .get(SORT_BY_KEY)
        .and_then(|v| v.as_str().and_then(SortKey::from_config_key))
        .unwrap_or_default();
    let direction = store
        .get(SORT_ORDER_KEY)
        .and_then(|v| v.as_str().and_then(SortDirection::from_config_key))
        .unwrap_or_default();
    (filters, SortSpec { key, direction })
}

/// What: Build a criteria store seeded from `store` that persists back into it.
///
/// Inputs:
/// - `store`: Preference store (cloned into the listener, e.g. an `Arc`)
///
/// Output:
/// - [`CriteriaStore`] with a [`PersistCriteria`] listener attached.
pub fn persisted_criteria<S>(store: S) -> CriteriaStore
where
    S: PreferenceStore + 'static,
{
    let (filters, sort) = load_criteria(&store);
    let mut criteria = CriteriaStore::new(filters, sort);
    criteria.subscribe(Box::new(PersistCriteria::new(store)));
    criteria
}
