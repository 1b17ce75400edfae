use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};

use super::storage::PreferenceStore;
use crate::state::RecentSearch;

/// Key of the persisted recent-search list.
pub const RECENT_KEY: &str = "recentSearches";

/// Maximum number of remembered searches.
pub const RECENT_CAPACITY: usize = 5;

/// Capacity of the recent-search cache as a `NonZeroUsize`.
#[must_use]
pub const fn recent_capacity() -> NonZeroUsize {
    match NonZeroUsize::new(RECENT_CAPACITY) {
        Some(n) => n,
        None => NonZeroUsize::MIN,
    }
}

/// Persisted shape of one entry: a legacy bare string or an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredSearch {
    /// Legacy entry written as a plain query string.
    Plain(String),
    /// Current entry.
    Entry {
        /// Text the user typed.
        query: String,
        /// Matched country name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Matched country code.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
}

impl From<StoredSearch> for RecentSearch {
    fn from(value: StoredSearch) -> Self {
        match value {
            StoredSearch::Plain(query)
            | StoredSearch::Entry {
                query, code: None, ..
            } => Self::Query(query),
            StoredSearch::Entry {
                query,
                name,
                code: Some(code),
            } => Self::Country {
                name: name.unwrap_or_else(|| query.clone()),
                query,
                code,
            },
        }
    }
}

impl From<&RecentSearch> for StoredSearch {
    fn from(value: &RecentSearch) -> Self {
        match value {
            RecentSearch::Query(q) => Self::Entry {
                query: q.clone(),
                name: None,
                code: None,
            },
            RecentSearch::Country { query, name, code } => Self::Entry {
                query: query.clone(),
                name: Some(name.clone()),
                code: Some(code.clone()),
            },
        }
    }
}

/// Most-recent-first list of up to five searches.
#[derive(Debug)]
pub struct RecentSearches {
    /// Entries keyed by an insertion counter; LRU order gives recency.
    entries: LruCache<u64, RecentSearch>,
    /// Next key.
    next: u64,
}

impl Default for RecentSearches {
    fn default() -> Self {
        Self {
            entries: LruCache::new(recent_capacity()),
            next: 0,
        }
    }
}

impl RecentSearches {
    /// What: Record a search at the front.
    ///
    /// Details:
    /// - Drops any entry with the same query text or the same matched code first.
    /// - The oldest entry falls off once more than five are held.
    pub fn record(&mut self, entry: RecentSearch) {
        let stale: Vec<u64> = self
            .entries
            .iter()
            .filter(|(_, e)| {
                e.query() == entry.query()
                    || matches!((e.code(), entry.code()), (Some(a), Some(b)) if a == b)
            })
            .map(|(k, _)| *k)
            .collect();
        for k in stale {
            self.entries.pop(&k);
        }
        self.entries.put(self.next, entry);
        self.next += 1;
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn values(&self) -> Vec<RecentSearch> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no searches are remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// What: Load the list from `store`, accepting legacy string entries.
    ///
    /// Output:
    /// - The stored entries (at most five); empty when absent or unreadable.
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        let mut out = Self::default();
        let Some(v) = store.get(RECENT_KEY) else {
            return out;
        };
        let stored: Vec<StoredSearch> = match serde_json::from_value(v) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "[Persist] Stored recent searches unreadable");
                return out;
            }
        };
        for entry in stored.into_iter().take(RECENT_CAPACITY).rev() {
            out.record(entry.into());
        }
        out
    }

    /// Write the list to `store` as objects.
    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &S) {
        let stored: Vec<StoredSearch> = self.entries.iter().map(|(_, v)| v.into()).collect();
        match serde_json::to_value(&stored) {
            Ok(v) => store.set(RECENT_KEY, v),
            Err(e) => tracing::warn!(error = %e, "[Persist] Failed to encode recent searches"),
        }
    }

    /// Forget every entry and remove the persisted key.
    pub fn clear<S: PreferenceStore + ?Sized>(&mut self, store: &S) {
        self.entries.clear();
        store.remove(RECENT_KEY);
    }
}
