//! Pure listing logic: facets, filtering, sorting, pagination, search and validation.

pub mod facets;
pub mod filter;
pub mod local_time;
pub mod paginate;
pub mod pipeline;
pub mod query;
pub mod sort;
pub mod validation;

// Re-export the pipeline surface so callers can use crate::logic::...
pub use facets::{Facets, extract_facets};
pub use filter::filter_records;
pub use paginate::{PageContext, Pagination};
pub use pipeline::{Derived, ListingView, derive};
pub use query::{SearchTarget, resolve, suggest};
pub use sort::sort_records;
