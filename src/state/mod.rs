//! Shared value types and the criteria store.
//!
//! Re-exports keep the common paths short (`crate::state::CountryRecord`).

pub mod catalog;
pub mod criteria;
pub mod types;

pub use catalog::Catalog;
pub use criteria::{CriteriaListener, CriteriaStore, FilterUpdate};
pub use types::{
    CountryRecord, Currency, FilterCriteria, FlagImages, IndependenceFilter, RangeBound,
    RangeFilter, RecentSearch, SortDirection, SortKey, SortSpec, UNKNOWN_CODE, User,
};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// Serialize tests that mutate process-wide environment variables.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
