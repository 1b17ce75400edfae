//! Application layer: durable preferences, criteria persistence, recent searches and the session.

pub mod persist;
pub mod recent;
pub mod session;
pub mod storage;

pub use persist::{PersistCriteria, load_criteria, persisted_criteria};
pub use recent::RecentSearches;
pub use session::Session;
pub use storage::{JsonFileStore, MemoryStore, PreferenceStore};
