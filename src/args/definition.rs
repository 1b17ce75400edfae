//! Command-line argument definition and processing.

use std::sync::Arc;

use clap::Parser;

use crate::app::JsonFileStore;
use crate::config::{Settings, settings, storage_path};
use crate::state::FilterUpdate;
use crate::state::types::{IndependenceFilter, SortDirection, SortKey};

/// country-atlas - Browse, filter, sort and favorite countries
#[derive(Parser, Debug)]
#[command(name = "country-atlas")]
#[command(version)]
#[command(about = "Browse, filter, sort and favorite countries", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Filter by exact region (empty string clears it)
    #[arg(long)]
    pub region: Option<String>,

    /// Filter by exact subregion
    #[arg(long)]
    pub subregion: Option<String>,

    /// Minimum population (non-numeric text is ignored)
    #[arg(long, value_name = "N")]
    pub pop_min: Option<String>,

    /// Maximum population
    #[arg(long, value_name = "N")]
    pub pop_max: Option<String>,

    /// Minimum area in km²
    #[arg(long, value_name = "KM2")]
    pub area_min: Option<String>,

    /// Maximum area in km²
    #[arg(long, value_name = "KM2")]
    pub area_max: Option<String>,

    /// Filter by spoken language (display name, e.g. "French")
    #[arg(long)]
    pub language: Option<String>,

    /// Filter by currency name (e.g. "Euro")
    #[arg(long)]
    pub currency: Option<String>,

    /// Filter by timezone descriptor (e.g. "UTC+01:00")
    #[arg(long)]
    pub timezone: Option<String>,

    /// Independence filter: all, true or false
    #[arg(long, value_name = "all|true|false")]
    pub independent: Option<String>,

    /// Sort key: name, population or area
    #[arg(long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long, value_name = "DIR")]
    pub order: Option<String>,

    /// Restrict the listing to names containing this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Number of "load more" clicks to apply to the listing
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub more: usize,

    /// Use the landing-page page size (8) instead of the catalog page size (20)
    #[arg(long)]
    pub landing: bool,

    /// Reset all filters to their defaults (sort is kept)
    #[arg(long)]
    pub reset_filters: bool,

    /// Print the available filter values and exit
    #[arg(long)]
    pub facets: bool,

    /// Show the detail view of one country by code
    #[arg(long, value_name = "CODE")]
    pub show: Option<String>,

    /// Print search suggestions for partially typed text
    #[arg(long, value_name = "TEXT")]
    pub suggest: Option<String>,

    /// Open suggestion number N from --suggest (1-based)
    #[arg(long, value_name = "N", requires = "suggest")]
    pub pick: Option<usize>,

    /// Submit a search: open the matching country or list results
    #[arg(long, value_name = "TEXT")]
    pub go: Option<String>,

    /// List recent searches
    #[arg(long)]
    pub recent: bool,

    /// Repeat recent search number N (1-based, most recent first)
    #[arg(long, value_name = "N")]
    pub open_recent: Option<usize>,

    /// Forget recent searches
    #[arg(long)]
    pub clear_recent: bool,

    /// Create an account (uses --name and --email; prompts for the password)
    #[arg(long)]
    pub register: bool,

    /// Sign in (uses --email; prompts for the password)
    #[arg(long)]
    pub login: bool,

    /// Sign out
    #[arg(long)]
    pub logout: bool,

    /// Show the signed-in user
    #[arg(long)]
    pub whoami: bool,

    /// List favorite countries
    #[arg(long)]
    pub favorites: bool,

    /// Add or remove a favorite country by code
    #[arg(long, value_name = "CODE")]
    pub favorite: Option<String>,

    /// Display name for --register
    #[arg(long)]
    pub name: Option<String>,

    /// Email for --register and --login
    #[arg(long)]
    pub email: Option<String>,
}

impl Args {
    /// What: Collect the filter updates requested on the command line.
    ///
    /// Output:
    /// - One [`FilterUpdate`] per filter flag given, in a fixed order.
    ///
    /// Details:
    /// - An unrecognised `--independent` value is reported and skipped.
    #[must_use]
    pub fn filter_updates(&self) -> Vec<FilterUpdate> {
        let mut out = Vec::new();
        push_text(&mut out, self.region.as_deref(), FilterUpdate::Region);
        push_text(&mut out, self.subregion.as_deref(), FilterUpdate::Subregion);
        push_text(&mut out, self.pop_min.as_deref(), FilterUpdate::PopulationMin);
        push_text(&mut out, self.pop_max.as_deref(), FilterUpdate::PopulationMax);
        push_text(&mut out, self.area_min.as_deref(), FilterUpdate::AreaMin);
        push_text(&mut out, self.area_max.as_deref(), FilterUpdate::AreaMax);
        push_text(&mut out, self.language.as_deref(), FilterUpdate::Language);
        push_text(&mut out, self.currency.as_deref(), FilterUpdate::Currency);
        push_text(&mut out, self.timezone.as_deref(), FilterUpdate::Timezone);
        if let Some(v) = &self.independent {
            match IndependenceFilter::from_config_key(v) {
                Some(f) => out.push(FilterUpdate::Independence(f)),
                None => {
                    eprintln!("Ignoring --independent {v}: expected all, true or false");
                    tracing::warn!(value = %v, "unrecognised independence filter");
                }
            }
        }
        out
    }

    /// Requested sort key, if valid.
    #[must_use]
    pub fn sort_key(&self) -> Option<SortKey> {
        let v = self.sort.as_deref()?;
        let key = SortKey::from_config_key(v);
        if key.is_none() {
            eprintln!("Ignoring --sort {v}: expected name, population or area");
        }
        key
    }

    /// Requested sort direction, if valid.
    #[must_use]
    pub fn sort_direction(&self) -> Option<SortDirection> {
        let v = self.order.as_deref()?;
        let dir = SortDirection::from_config_key(v);
        if dir.is_none() {
            eprintln!("Ignoring --order {v}: expected asc or desc");
        }
        dir
    }
}

/// Push a text filter update when the flag was given.
fn push_text(out: &mut Vec<FilterUpdate>, value: Option<&str>, make: fn(String) -> FilterUpdate) {
    if let Some(v) = value {
        out.push(make(v.trim().to_string()));
    }
}

/// Shared handles for command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded settings.
    pub settings: Settings,
    /// Durable preferences.
    pub store: Arc<JsonFileStore>,
}

impl Context {
    /// Load settings and open the preference store.
    #[must_use]
    pub fn load() -> Self {
        Self {
            settings: settings(),
            store: Arc::new(JsonFileStore::open(&storage_path())),
        }
    }
}

/// What: Process command-line arguments and run the requested command.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Process exit code (0 on success).
///
/// Details:
/// - One command runs after an optional sign-in; the listing is the default.
/// - Account commands run before catalog commands so `--login --favorites` works in one call.
pub async fn process_args(args: &Args) -> i32 {
    use crate::args::{account, catalog, list, search};

    let ctx = Context::load();

    if args.logout {
        return account::handle_logout(&ctx);
    }
    if args.register {
        let code = account::handle_register(&ctx, args).await;
        if code != 0 {
            return code;
        }
    } else if args.login {
        let code = account::handle_login(&ctx, args).await;
        if code != 0 {
            return code;
        }
    }
    if args.whoami {
        return account::handle_whoami(&ctx).await;
    }
    if let Some(code) = &args.favorite {
        return account::handle_toggle_favorite(&ctx, code).await;
    }
    if args.favorites {
        return account::handle_favorites(&ctx).await;
    }
    if args.clear_recent {
        return search::handle_clear_recent(&ctx);
    }
    if args.recent {
        return search::handle_recent(&ctx);
    }
    if let Some(n) = args.open_recent {
        return search::handle_open_recent(&ctx, n, args).await;
    }
    if let Some(text) = &args.suggest {
        return search::handle_suggest(&ctx, text, args.pick, args).await;
    }
    if let Some(text) = &args.go {
        return search::handle_go(&ctx, text, args).await;
    }
    if let Some(code) = &args.show {
        return catalog::handle_show(&ctx, code).await;
    }
    if args.facets {
        return catalog::handle_facets(&ctx).await;
    }
    if args.register || args.login {
        return 0;
    }
    list::handle_list(&ctx, args).await
}
