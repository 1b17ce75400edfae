use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::util::config::{parse_bool, parse_key_value};

/// Default public catalog endpoint (REST Countries v3.1).
pub const DEFAULT_CATALOG_URL: &str = "https://restcountries.com/v3.1";
/// Default account backend endpoint.
pub const DEFAULT_ACCOUNT_URL: &str = "http://localhost:5000/api";

/// Skeleton written when `settings.conf` does not exist yet.
pub const SETTINGS_SKELETON_CONTENT: &str = "# country-atlas settings\n\
#\n\
# Format: key = value\n\
# Lines starting with #, // or ; are comments. A ` # ...` tail is an inline comment.\n\
#\n\
# Base URL of the country catalog service. `/all` and `/alpha/<code>` are appended.\n\
catalog_url = https://restcountries.com/v3.1\n\
#\n\
# Optional comma-separated field subset requested from `/all` (empty = full records).\n\
catalog_fields =\n\
#\n\
# Base URL of the account/favorites backend.\n\
account_url = http://localhost:5000/api\n\
#\n\
# Transport timeouts in seconds.\n\
connect_timeout_secs = 10\n\
request_timeout_secs = 30\n\
#\n\
# Page size of listings when --landing is not given: catalog (20) or landing (8).\n\
landing_page_default = false\n";

/// User settings loaded from `settings.conf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the catalog service (no trailing slash).
    pub catalog_url: String,
    /// Field subset requested from the full-collection endpoint.
    pub catalog_fields: Vec<String>,
    /// Base URL of the account service (no trailing slash).
    pub account_url: String,
    /// Whole-request timeout.
    pub request_timeout_secs: u64,
    /// Connect timeout.
    pub connect_timeout_secs: u64,
    /// Use the landing-page page size by default.
    pub landing_page_default: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_fields: Vec::new(),
            account_url: DEFAULT_ACCOUNT_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            landing_page_default: false,
        }
    }
}

/// What: Parse settings content over the defaults.
///
/// Inputs:
/// - `content`: Text of `settings.conf`.
///
/// Output:
/// - Populated `Settings`; unknown keys are ignored and invalid values keep defaults.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut settings = Settings::default();
    for line in content.lines() {
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "catalog_url" | "countries_url" => {
                if !val.is_empty() {
                    settings.catalog_url = val.trim_end_matches('/').to_string();
                }
            }
            "catalog_fields" | "fields" => {
                settings.catalog_fields = val
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(ToOwned::to_owned)
                    .collect();
            }
            "account_url" | "api_url" => {
                if !val.is_empty() {
                    settings.account_url = val.trim_end_matches('/').to_string();
                }
            }
            "request_timeout_secs" | "timeout" => {
                if let Ok(v) = val.parse::<u64>()
                    && v > 0
                {
                    settings.request_timeout_secs = v;
                }
            }
            "connect_timeout_secs" => {
                if let Ok(v) = val.parse::<u64>()
                    && v > 0
                {
                    settings.connect_timeout_secs = v;
                }
            }
            "landing_page_default" => {
                if let Some(b) = parse_bool(&val) {
                    settings.landing_page_default = b;
                }
            }
            other => debug!(key = other, "[Config] ignoring unknown settings key"),
        }
    }
    settings
}

/// What: Load settings from `path`, seeding the file with the skeleton when missing.
///
/// Inputs:
/// - `path`: Location of `settings.conf`.
///
/// Output:
/// - Parsed settings, or defaults when the file cannot be read.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), "[Config] loaded settings");
            parse_settings(&content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if let Some(dir) = path.parent() {
                let _ = fs::create_dir_all(dir);
            }
            if let Err(e) = fs::write(path, SETTINGS_SKELETON_CONTENT) {
                warn!(path = %path.display(), error = %e, "[Config] failed to write settings skeleton");
            }
            Settings::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "[Config] failed to read settings; using defaults");
            Settings::default()
        }
    }
}

/// Load settings from the default location.
#[must_use]
pub fn settings() -> Settings {
    load_settings_from(&super::paths::settings_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Skeleton content parses back to the defaults
    fn settings_skeleton_matches_defaults() {
        assert_eq!(parse_settings(SETTINGS_SKELETON_CONTENT), Settings::default());
    }

    #[test]
    /// What: Values override defaults; invalid numbers are ignored
    ///
    /// - Input: Custom URLs with trailing slash, field list, bad timeout
    /// - Output: Trimmed URLs, parsed list, default timeout kept
    fn settings_overrides_and_invalid_values() {
        let s = parse_settings(
            "catalog_url = http://proxy.local/countries/\n\
             catalog_fields = name, cca3 ,population,,\n\
             request_timeout_secs = soon\n\
             connect-timeout-secs = 3\n\
             landing_page_default = yes\n\
             mystery = 1\n",
        );
        assert_eq!(s.catalog_url, "http://proxy.local/countries");
        assert_eq!(s.catalog_fields, vec!["name", "cca3", "population"]);
        assert_eq!(s.request_timeout_secs, 30);
        assert_eq!(s.connect_timeout_secs, 3);
        assert!(s.landing_page_default);
    }

    #[test]
    /// What: Missing file is seeded with the skeleton and defaults are returned
    fn settings_missing_file_writes_skeleton() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let p = tmp.path().join("nested").join("settings.conf");
        let s = load_settings_from(&p);
        assert_eq!(s, Settings::default());
        let written = fs::read_to_string(&p).expect("skeleton written");
        assert!(written.contains("catalog_url"));
    }
}
