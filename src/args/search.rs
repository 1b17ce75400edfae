//! Command-line search box: suggestions, submission and recent searches.

use crate::app::RecentSearches;
use crate::args::list::{listing_view, render_listing};
use crate::args::{Args, Context};
use crate::logic::local_time::local_time_now;
use crate::logic::query::{pick_suggestion, recent_target};
use crate::logic::{SearchTarget, resolve, suggest};
use crate::sources::{RestCatalog, load_catalog};
use crate::state::{Catalog, RecentSearch};

/// Load the catalog for search commands, reporting failures on stderr.
async fn search_catalog(ctx: &Context) -> Option<Catalog> {
    let src = match RestCatalog::from_settings(&ctx.settings) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("HTTP client unavailable: {e}");
            return None;
        }
    };
    let (catalog, errors) = load_catalog(&src).await;
    for e in &errors {
        eprintln!("{e}");
    }
    errors.is_empty().then_some(catalog)
}

/// What: Format a recent-search entry for display.
#[must_use]
pub fn describe_recent(entry: &RecentSearch) -> String {
    match entry {
        RecentSearch::Query(q) => q.clone(),
        RecentSearch::Country { query, name, code } if query == name => format!("{name} ({code})"),
        RecentSearch::Country { query, name, code } => format!("{query} -> {name} ({code})"),
    }
}

/// Record `entry` at the front of the persisted recent-search list.
fn remember(ctx: &Context, entry: RecentSearch) {
    let mut recent = RecentSearches::load(ctx.store.as_ref());
    recent.record(entry);
    recent.save(ctx.store.as_ref());
}

/// What: Handle `--suggest TEXT`, optionally opening suggestion number `pick`.
///
/// Details:
/// - Picking a suggestion records it as a matched-country search and opens it.
pub async fn handle_suggest(ctx: &Context, text: &str, pick: Option<usize>, args: &Args) -> i32 {
    let Some(catalog) = search_catalog(ctx).await else {
        return 1;
    };
    let hits = suggest(&catalog, text);
    if let Some(n) = pick {
        let Some(record) = n.checked_sub(1).and_then(|i| hits.get(i)) else {
            eprintln!("No suggestion number {n}");
            return 1;
        };
        remember(ctx, pick_suggestion(record));
        let target = SearchTarget::Country(record.code.clone());
        return open_target(ctx, args, catalog.clone(), target);
    }
    if hits.is_empty() {
        println!("No suggestions for \"{}\"", text.trim());
    }
    for (i, r) in hits.iter().enumerate() {
        println!("{}. {}  {}", i + 1, r.code, r.name_common);
    }
    0
}

/// What: Handle `--go TEXT`: resolve the search, record it, and open the target.
pub async fn handle_go(ctx: &Context, text: &str, args: &Args) -> i32 {
    let Some(catalog) = search_catalog(ctx).await else {
        return 1;
    };
    let Some((target, entry)) = resolve(&catalog, text) else {
        eprintln!("Nothing to search for");
        return 1;
    };
    remember(ctx, entry);
    open_target(ctx, args, catalog, target)
}

/// What: Handle `--open-recent N`: repeat the Nth most recent search.
pub async fn handle_open_recent(ctx: &Context, n: usize, args: &Args) -> i32 {
    let recent = RecentSearches::load(ctx.store.as_ref());
    let Some(entry) = n.checked_sub(1).and_then(|i| recent.values().get(i).cloned()) else {
        eprintln!("No recent search number {n}");
        return 1;
    };
    let Some(catalog) = search_catalog(ctx).await else {
        return 1;
    };
    let target = recent_target(&entry);
    remember(ctx, entry);
    open_target(ctx, args, catalog, target)
}

/// What: Show a search destination.
///
/// Details:
/// - A country target prints its details from the loaded catalog along with
///   neighbour names; a results target prints the listing filtered by the text.
fn open_target(ctx: &Context, args: &Args, catalog: Catalog, target: SearchTarget) -> i32 {
    tracing::info!(destination = ?target, "Search opened from CLI");
    match target {
        SearchTarget::Country(code) => {
            let Some(record) = catalog.by_code(&code) else {
                eprintln!("Country not found: {code}");
                return 1;
            };
            for line in crate::args::catalog::render_details(record, local_time_now) {
                println!("{line}");
            }
            let names: Vec<&str> = catalog
                .neighbors(record)
                .into_iter()
                .map(|n| n.name_common.as_str())
                .collect();
            if !names.is_empty() {
                println!("Neighbours: {}", names.join(", "));
            }
            0
        }
        SearchTarget::Results(query) => {
            println!("Results for \"{query}\":");
            let mut view = listing_view(ctx, args, catalog);
            view.set_search(&query);
            for line in render_listing(&view) {
                println!("{line}");
            }
            0
        }
    }
}

/// What: Handle `--recent`: print remembered searches, most recent first.
pub fn handle_recent(ctx: &Context) -> i32 {
    let recent = RecentSearches::load(ctx.store.as_ref());
    if recent.is_empty() {
        println!("No recent searches");
    }
    for (i, entry) in recent.values().iter().enumerate() {
        println!("{}. {}", i + 1, describe_recent(entry));
    }
    0
}

/// What: Handle `--clear-recent`.
pub fn handle_clear_recent(ctx: &Context) -> i32 {
    let mut recent = RecentSearches::load(ctx.store.as_ref());
    recent.clear(ctx.store.as_ref());
    println!("Recent searches cleared");
    0
}
