//! Values written in one "run" are visible after reopening the store file.

use std::sync::Arc;

use country_atlas as crate_root;

use crate_root::app::{JsonFileStore, RecentSearches, Session, load_criteria, persisted_criteria};
use crate_root::state::{FilterUpdate, RecentSearch, SortDirection, SortKey};

#[test]
/// What: Criteria changes survive a restart
///
/// - Input: Region and sort changed through a persisted criteria store
/// - Output: A fresh store opened on the same file loads the same criteria
fn criteria_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("storage.json");
    {
        let store = Arc::new(JsonFileStore::open(&path));
        let mut criteria = persisted_criteria(Arc::clone(&store));
        criteria.apply(FilterUpdate::Region("Asia".into()));
        criteria.set_sort_key(SortKey::Area);
        criteria.set_sort_direction(SortDirection::Descending);
    }
    let reopened = JsonFileStore::open(&path);
    let (filters, sort) = load_criteria(&reopened);
    assert_eq!(filters.region, "Asia");
    assert_eq!(sort.key, SortKey::Area);
    assert_eq!(sort.direction, SortDirection::Descending);

    let raw = std::fs::read_to_string(&path).expect("read");
    assert!(raw.contains("countryFilters"));
    assert!(raw.contains("\"countrySortBy\""));
}

#[test]
/// What: Recent searches keep their order across restarts and accept legacy strings
fn recent_searches_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("storage.json");
    std::fs::write(&path, r#"{"recentSearches": ["old query"]}"#).expect("seed");
    {
        let store = JsonFileStore::open(&path);
        let mut recent = RecentSearches::load(&store);
        assert_eq!(recent.values(), vec![RecentSearch::Query("old query".into())]);
        recent.record(RecentSearch::Country {
            query: "fra".into(),
            name: "France".into(),
            code: "FRA".into(),
        });
        recent.save(&store);
    }
    let store = JsonFileStore::open(&path);
    let recent = RecentSearches::load(&store);
    let queries: Vec<String> = recent.values().iter().map(|e| e.query().to_string()).collect();
    assert_eq!(queries, vec!["fra", "old query"]);
}

#[test]
/// What: A stored token and user restore the session; a missing user logs out
fn session_loads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("storage.json");
    std::fs::write(
        &path,
        r#"{"token": "abc", "user": {"id": "u1", "name": "Ada", "email": "ada@example.com", "favorites": ["FRA"]}}"#,
    )
    .expect("seed");
    let session = Session::load(Arc::new(JsonFileStore::open(&path)));
    assert!(session.is_logged_in());
    assert_eq!(session.favorites(), ["FRA".to_string()]);

    std::fs::write(&path, r#"{"token": "abc"}"#).expect("seed");
    let session = Session::load(Arc::new(JsonFileStore::open(&path)));
    assert!(!session.is_logged_in());
    assert!(session.favorites().is_empty());
}

#[test]
/// What: A corrupt preferences file is treated as empty and rewritten on the next change
fn corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json").expect("seed");
    let store = Arc::new(JsonFileStore::open(&path));
    let (filters, _) = load_criteria(store.as_ref());
    assert!(filters.is_default());
    let mut criteria = persisted_criteria(Arc::clone(&store));
    criteria.apply(FilterUpdate::Language("French".into()));
    let reopened = JsonFileStore::open(&path);
    assert_eq!(load_criteria(&reopened).0.language, "French");
}
