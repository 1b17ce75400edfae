//! Command-line detail view (`--show`) and facet listing (`--facets`).

use std::sync::Arc;

use crate::app::Session;
use crate::args::Context;
use crate::logic::extract_facets;
use crate::logic::local_time::local_time_now;
use crate::sources::{CatalogSource, RestAccount, RestCatalog, load_catalog};
use crate::state::CountryRecord;
use crate::util::group_thousands;

/// What: Render the detail view of one country.
///
/// Inputs:
/// - `r`: Country record
/// - `local_time`: Formats a timezone descriptor as the current local time
///
/// Output:
/// - Lines of `Label: value` text; empty fields are shown as "N/A".
#[must_use]
pub fn render_details(r: &CountryRecord, local_time: impl Fn(&str) -> Option<String>) -> Vec<String> {
    /// Join non-empty values or fall back to "N/A".
    fn join_or_na<'a>(items: impl Iterator<Item = &'a str>) -> String {
        let v: Vec<&str> = items.filter(|s| !s.trim().is_empty()).collect();
        if v.is_empty() {
            "N/A".to_string()
        } else {
            v.join(", ")
        }
    }

    let mut lines = vec![
        format!("{} ({})", r.name_common, r.code),
        format!("Official name: {}", r.name_official),
        format!("Capital: {}", join_or_na(r.capitals.iter().map(String::as_str))),
        format!("Region: {}", r.display_region()),
        format!(
            "Subregion: {}",
            if r.subregion.is_empty() {
                "N/A"
            } else {
                r.subregion.as_str()
            }
        ),
        format!("Population: {}", group_thousands(r.population)),
        format!(
            "Area: {}",
            r.area.map_or_else(|| "N/A".to_string(), |a| format!("{a} km²"))
        ),
        format!(
            "Languages: {}",
            join_or_na(r.languages.values().map(String::as_str))
        ),
    ];
    let currencies: Vec<String> = r
        .currencies
        .values()
        .map(|c| {
            if c.symbol.is_empty() {
                c.name.clone()
            } else {
                format!("{} ({})", c.name, c.symbol)
            }
        })
        .collect();
    lines.push(format!(
        "Currencies: {}",
        join_or_na(currencies.iter().map(String::as_str))
    ));
    lines.push(format!(
        "Independent: {}",
        if r.independent { "yes" } else { "no" }
    ));
    if let Some((lat, lng)) = r.latlng {
        lines.push(format!("Coordinates: {lat:.2}, {lng:.2}"));
    }
    lines.push(format!(
        "Borders: {}",
        join_or_na(r.borders.iter().map(String::as_str))
    ));
    for tz in &r.timezones {
        match local_time(tz) {
            Some(t) => lines.push(format!("Local time ({tz}): {t}")),
            None => lines.push(format!("Timezone: {tz}")),
        }
    }
    if !r.flag.png.is_empty() {
        lines.push(format!("Flag: {}", r.flag.png));
    }
    lines
}

/// What: Handle `--show CODE`.
///
/// Output:
/// - Exit code: 0 when the country was shown, 1 when not found or unavailable.
///
/// Details:
/// - When signed in, the favorite status is asked of the account service.
pub async fn handle_show(ctx: &Context, code: &str) -> i32 {
    tracing::info!(code, "Country details requested from CLI");
    let src = match RestCatalog::from_settings(&ctx.settings) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("HTTP client unavailable: {e}");
            return 1;
        }
    };
    let record = match src.fetch_by_code(code).await {
        Ok(Some(r)) => r,
        Ok(None) => {
            eprintln!("Country not found: {}", code.trim().to_ascii_uppercase());
            return 1;
        }
        Err(e) => {
            eprintln!("Failed to load country details: {e}");
            tracing::error!(code, error = %e, "detail fetch failed");
            return 1;
        }
    };
    for line in render_details(&record, local_time_now) {
        println!("{line}");
    }
    let session = Session::load(Arc::clone(&ctx.store));
    if session.is_logged_in()
        && let Ok(api) = RestAccount::from_settings(&ctx.settings)
    {
        let fav = session.is_favorite(&api, &record.code).await;
        println!("Favorite: {}", if fav { "yes" } else { "no" });
    }
    0
}

/// What: Handle `--facets`: print each filter's available values.
pub async fn handle_facets(ctx: &Context) -> i32 {
    let (catalog, errors) = match RestCatalog::from_settings(&ctx.settings) {
        Ok(src) => load_catalog(&src).await,
        Err(e) => {
            eprintln!("HTTP client unavailable: {e}");
            return 1;
        }
    };
    for e in &errors {
        eprintln!("{e}");
    }
    let f = extract_facets(catalog.records());
    for (label, values) in [
        ("Regions", &f.regions),
        ("Subregions", &f.subregions),
        ("Languages", &f.languages),
        ("Currencies", &f.currencies),
        ("Timezones", &f.timezones),
    ] {
        println!("{label} ({}):", values.len());
        for v in values {
            println!("  {v}");
        }
    }
    i32::from(!errors.is_empty())
}
