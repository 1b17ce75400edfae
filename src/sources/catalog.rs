//! Catalog loader: reads country records from the external catalog service.
use futures::future::join_all;
use tracing::{info, warn};

use crate::state::{Catalog, CountryRecord};
use crate::util::percent_encode;

use super::wire::{parse_catalog, parse_single};
use super::{Result, build_client};

/// Read-only country directory.
///
/// Implemented by [`RestCatalog`] for the real service and by in-memory
/// fakes in tests.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// What: Fetch the full country set.
    ///
    /// # Errors
    /// - Transport failure, non-success status, or undecodable payload.
    async fn fetch_all(&self) -> Result<Vec<CountryRecord>>;

    /// What: Fetch one country by alpha-3 code.
    ///
    /// Output:
    /// - `Ok(None)` when the service reports no such country.
    ///
    /// # Errors
    /// - Transport failure, non-success status (other than 404), or undecodable payload.
    async fn fetch_by_code(&self, code: &str) -> Result<Option<CountryRecord>>;
}

/// HTTP client for a REST Countries compatible service.
#[derive(Debug, Clone)]
pub struct RestCatalog {
    /// Shared connection pool.
    client: reqwest::Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Field subset for the full-collection request.
    fields: Vec<String>,
}

impl RestCatalog {
    /// What: Build a catalog client from settings.
    ///
    /// # Errors
    /// - The HTTP client cannot be constructed (TLS backend initialisation).
    pub fn from_settings(settings: &crate::config::Settings) -> Result<Self> {
        Ok(Self {
            client: build_client(settings)?,
            base_url: settings.catalog_url.trim_end_matches('/').to_string(),
            fields: settings.catalog_fields.clone(),
        })
    }

    /// URL of the full-collection endpoint, including the field subset.
    #[must_use]
    pub fn all_url(&self) -> String {
        if self.fields.is_empty() {
            format!("{}/all", self.base_url)
        } else {
            let fields: Vec<String> = self.fields.iter().map(|f| percent_encode(f)).collect();
            format!("{}/all?fields={}", self.base_url, fields.join(","))
        }
    }

    /// URL of the by-code endpoint.
    #[must_use]
    pub fn code_url(&self, code: &str) -> String {
        format!(
            "{}/alpha/{}",
            self.base_url,
            percent_encode(&code.trim().to_ascii_uppercase())
        )
    }
}

impl CatalogSource for RestCatalog {
    async fn fetch_all(&self) -> Result<Vec<CountryRecord>> {
        let url = self.all_url();
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        info!(
            status = status.as_u16(),
            bytes = body.len(),
            "[Catalog] fetched country collection"
        );
        if !status.is_success() {
            let preview: String = body.chars().take(300).collect();
            warn!(
                status = status.as_u16(),
                preview = preview,
                "[Catalog] collection endpoint returned non-success status"
            );
            return Err(format!("catalog service status {status}").into());
        }
        let v: serde_json::Value = serde_json::from_str(&body)?;
        parse_catalog(&v)
    }

    async fn fetch_by_code(&self, code: &str) -> Result<Option<CountryRecord>> {
        let url = self.code_url(code);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            info!(code, "[Catalog] country not found");
            return Ok(None);
        }
        if !status.is_success() {
            warn!(code, status = status.as_u16(), "[Catalog] lookup failed");
            return Err(format!("catalog service status {status}").into());
        }
        let v: serde_json::Value = resp.json().await?;
        Ok(parse_single(&v))
    }
}

/// What: Load the catalog once for a view, converting failure into an empty catalog.
///
/// Inputs:
/// - `source`: Catalog service
///
/// Output:
/// - `(catalog, errors)`: on success the records in source order and no errors;
///   on failure an empty catalog and one user-facing message.
///
/// Details:
/// - Issues exactly one request; no retry and no caching.
pub async fn load_catalog<S: CatalogSource>(source: &S) -> (Catalog, Vec<String>) {
    match source.fetch_all().await {
        Ok(records) => {
            info!(count = records.len(), "[Catalog] catalog loaded");
            (Catalog::from_records(records), Vec::new())
        }
        Err(e) => {
            warn!(error = %e, "[Catalog] catalog load failed");
            (
                Catalog::default(),
                vec![format!("Country catalog unavailable: {e}")],
            )
        }
    }
}

/// What: Fetch the records behind a list of favorite codes concurrently.
///
/// Inputs:
/// - `source`: Catalog service
/// - `codes`: Favorite codes in the user's order
///
/// Output:
/// - `(records, errors)` with found records in `codes` order; unknown codes and
///   failed lookups are reported in `errors` and skipped.
pub async fn fetch_favorites<S: CatalogSource>(
    source: &S,
    codes: &[String],
) -> (Vec<CountryRecord>, Vec<String>) {
    let lookups = codes.iter().map(|code| source.fetch_by_code(code));
    let results = join_all(lookups).await;
    let mut records = Vec::with_capacity(codes.len());
    let mut errors = Vec::new();
    for (code, res) in codes.iter().zip(results) {
        match res {
            Ok(Some(rec)) => records.push(rec),
            Ok(None) => errors.push(format!("{code}: country not found")),
            Err(e) => errors.push(format!("{code}: {e}")),
        }
    }
    (records, errors)
}
