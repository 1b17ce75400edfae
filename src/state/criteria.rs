//! Criteria store: the user's current filters and sort order.
//!
//! Changes are published to registered [`CriteriaListener`]s; persistence is
//! one such listener (see [`crate::app::persist::PersistCriteria`]), which
//! keeps the store itself free of I/O.

use crate::state::types::{
    FilterCriteria, IndependenceFilter, RangeBound, SortDirection, SortKey, SortSpec,
};

/// A partial update to the filter criteria.
///
/// Each variant touches exactly one field (or one bound of a range).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    /// Set the region filter (empty clears it).
    Region(String),
    /// Set the subregion filter.
    Subregion(String),
    /// Set the lower population bound.
    PopulationMin(String),
    /// Set the upper population bound.
    PopulationMax(String),
    /// Set the lower area bound.
    AreaMin(String),
    /// Set the upper area bound.
    AreaMax(String),
    /// Set the language filter.
    Language(String),
    /// Set the currency filter.
    Currency(String),
    /// Set the timezone filter.
    Timezone(String),
    /// Set the independence tri-state.
    Independence(IndependenceFilter),
}

/// Observer notified after every change to filters or sort.
pub trait CriteriaListener {
    /// Called with the full, updated criteria.
    fn on_change(&mut self, filters: &FilterCriteria, sort: SortSpec);
}

/// Holds current [`FilterCriteria`] and [`SortSpec`].
#[derive(Default)]
pub struct CriteriaStore {
    /// Active filters.
    filters: FilterCriteria,
    /// Active sort.
    sort: SortSpec,
    /// Change subscribers.
    listeners: Vec<Box<dyn CriteriaListener>>,
}

impl std::fmt::Debug for CriteriaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CriteriaStore")
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CriteriaStore {
    /// Create a store seeded with previously loaded criteria.
    #[must_use]
    pub fn new(filters: FilterCriteria, sort: SortSpec) -> Self {
        Self {
            filters,
            sort,
            listeners: Vec::new(),
        }
    }

    /// Register a change subscriber.
    pub fn subscribe(&mut self, listener: Box<dyn CriteriaListener>) {
        self.listeners.push(listener);
    }

    /// Current filters.
    #[must_use]
    pub const fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    /// Current sort.
    #[must_use]
    pub const fn sort(&self) -> SortSpec {
        self.sort
    }

    /// What: Merge a single-field update into the filters.
    ///
    /// Inputs:
    /// - `update`: Field to change
    ///
    /// Output:
    /// - `true` when the filters actually changed (listeners are notified only then).
    pub fn apply(&mut self, update: FilterUpdate) -> bool {
        let f = &mut self.filters;
        let changed = match update {
            FilterUpdate::Region(v) => replace(&mut f.region, v),
            FilterUpdate::Subregion(v) => replace(&mut f.subregion, v),
            FilterUpdate::PopulationMin(v) => replace(&mut f.population.min, RangeBound(v)),
            FilterUpdate::PopulationMax(v) => replace(&mut f.population.max, RangeBound(v)),
            FilterUpdate::AreaMin(v) => replace(&mut f.area.min, RangeBound(v)),
            FilterUpdate::AreaMax(v) => replace(&mut f.area.max, RangeBound(v)),
            FilterUpdate::Language(v) => replace(&mut f.language, v),
            FilterUpdate::Currency(v) => replace(&mut f.currency, v),
            FilterUpdate::Timezone(v) => replace(&mut f.timezone, v),
            FilterUpdate::Independence(v) => replace(&mut f.independent, v),
        };
        if changed {
            self.notify();
        }
        changed
    }

    /// What: Restore all filters to defaults, leaving sort untouched.
    ///
    /// Output:
    /// - `true` when any filter was active.
    pub fn reset_filters(&mut self) -> bool {
        let changed = replace(&mut self.filters, FilterCriteria::default());
        if changed {
            self.notify();
        }
        changed
    }

    /// Change the sort key. Returns `true` when it changed.
    pub fn set_sort_key(&mut self, key: SortKey) -> bool {
        let changed = replace(&mut self.sort.key, key);
        if changed {
            self.notify();
        }
        changed
    }

    /// Change the sort direction. Returns `true` when it changed.
    pub fn set_sort_direction(&mut self, direction: SortDirection) -> bool {
        let changed = replace(&mut self.sort.direction, direction);
        if changed {
            self.notify();
        }
        changed
    }

    /// Publish the current state to every listener.
    fn notify(&mut self) {
        tracing::trace!(
            listeners = self.listeners.len(),
            "[Criteria] change published"
        );
        for l in &mut self.listeners {
            l.on_change(&self.filters, self.sort);
        }
    }
}

/// Assign `new` into `slot`, reporting whether the value differed.
fn replace<T: PartialEq>(slot: &mut T, new: T) -> bool {
    if *slot == new {
        false
    } else {
        *slot = new;
        true
    }
}
