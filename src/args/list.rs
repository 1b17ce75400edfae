//! Command-line listing: the filtered, sorted, paginated catalog view.

use std::sync::Arc;

use crate::app::persisted_criteria;
use crate::args::{Args, Context};
use crate::logic::{ListingView, PageContext};
use crate::sources::{RestCatalog, load_catalog};
use crate::state::{Catalog, CountryRecord};
use crate::util::{group_thousands, pad_display};

/// Display width of the name column.
const NAME_WIDTH: usize = 32;
/// Display width of the region column.
const REGION_WIDTH: usize = 10;

/// What: Format one listing row.
///
/// Output:
/// - `CODE  Name…  Region  population  area` with padded columns.
#[must_use]
pub fn format_row(r: &CountryRecord) -> String {
    let area = r
        .area
        .map_or_else(|| "-".to_string(), |a| format!("{} km²", group_thousands(area_km2(a))));
    format!(
        "{}  {}  {}  {:>13}  {}",
        pad_display(&r.code, 3),
        pad_display(&r.name_common, NAME_WIDTH),
        pad_display(r.display_region(), REGION_WIDTH),
        group_thousands(r.population),
        area
    )
}

/// Whole square kilometres for display.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn area_km2(a: f64) -> u64 {
    a.round().max(0.0) as u64
}

/// What: Render the view's visible slice with a summary footer.
#[must_use]
pub fn render_listing(view: &ListingView) -> Vec<String> {
    let mut lines: Vec<String> = view.visible().iter().map(format_row).collect();
    if view.total() == 0 {
        lines.push("No countries match the current filters.".to_string());
    } else {
        lines.push(format!(
            "Showing {} of {} countries{}",
            view.visible().len(),
            view.total(),
            if view.has_more() {
                " (use --more N to load more)"
            } else {
                ""
            }
        ));
    }
    lines
}

/// Page context for this invocation.
const fn page_context(ctx: &Context, args: &Args) -> PageContext {
    if args.landing || ctx.settings.landing_page_default {
        PageContext::Landing
    } else {
        PageContext::Catalog
    }
}

/// What: Build a listing view over `catalog` with the command-line criteria applied.
///
/// Inputs:
/// - `ctx`: Settings and preference store
/// - `args`: Filter, sort, search and paging flags
/// - `catalog`: Loaded catalog (possibly empty)
///
/// Details:
/// - Criteria flags go through the criteria store, so they persist like UI controls.
#[must_use]
pub fn listing_view(ctx: &Context, args: &Args, catalog: Catalog) -> ListingView {
    let criteria = persisted_criteria(Arc::clone(&ctx.store));
    let mut view = ListingView::new(catalog, criteria, page_context(ctx, args));
    if args.reset_filters {
        view.reset_filters();
    }
    for update in args.filter_updates() {
        view.apply(update);
    }
    if let Some(key) = args.sort_key() {
        view.set_sort_key(key);
    }
    if let Some(dir) = args.sort_direction() {
        view.set_sort_direction(dir);
    }
    if let Some(text) = &args.search {
        view.set_search(text);
    }
    for _ in 0..args.more {
        if !view.load_more() {
            break;
        }
    }
    view
}

/// What: Load the catalog and build the listing view.
///
/// Output:
/// - `(view, errors)`; on catalog failure the view is empty and `errors` explains why.
pub async fn build_view(ctx: &Context, args: &Args) -> (ListingView, Vec<String>) {
    let (catalog, errors) = match RestCatalog::from_settings(&ctx.settings) {
        Ok(src) => load_catalog(&src).await,
        Err(e) => (
            Catalog::default(),
            vec![format!("HTTP client unavailable: {e}")],
        ),
    };
    (listing_view(ctx, args, catalog), errors)
}

/// What: Handle the default listing command.
///
/// Output:
/// - Exit code: 0, or 1 when the catalog could not be loaded.
pub async fn handle_list(ctx: &Context, args: &Args) -> i32 {
    tracing::info!(more = args.more, "Listing requested from CLI");
    let (view, errors) = build_view(ctx, args).await;
    for e in &errors {
        eprintln!("{e}");
    }
    for line in render_listing(&view) {
        println!("{line}");
    }
    i32::from(!errors.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CriteriaStore;

    #[test]
    /// What: Rows show grouped numbers, the region fallback and a dash for unknown area
    fn format_row_columns() {
        let mut r = CountryRecord::new("FRA", "France");
        r.population = 67_391_582;
        r.area = Some(551_695.4);
        r.region = "Europe".into();
        let row = format_row(&r);
        assert!(row.starts_with("FRA  France "));
        assert!(row.contains("67,391,582"));
        assert!(row.ends_with("551,695 km²"));

        let bare = format_row(&CountryRecord::new("XXX", "Nowhere"));
        assert!(bare.contains("Unknown"));
        assert!(bare.ends_with('-'));
    }

    #[test]
    /// What: The footer reports the window and an empty listing says so
    fn render_listing_footer() {
        let recs = (0..25)
            .map(|i| CountryRecord::new(&format!("C{i:02}"), &format!("Country {i}")))
            .collect();
        let view = ListingView::new(
            Catalog::from_records(recs),
            CriteriaStore::default(),
            PageContext::Catalog,
        );
        let lines = render_listing(&view);
        assert_eq!(lines.len(), 21);
        assert!(lines[20].starts_with("Showing 20 of 25 countries (use --more"));

        let empty =
            ListingView::new(Catalog::default(), CriteriaStore::default(), PageContext::Landing);
        assert_eq!(
            render_listing(&empty),
            vec!["No countries match the current filters."]
        );
    }
}
