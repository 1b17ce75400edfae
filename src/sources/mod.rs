//! Remote data retrieval: the country catalog and the account backend.

use std::time::Duration;

pub mod account;
pub mod catalog;
pub mod wire;

/// Result type alias for catalog fetching operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Build the shared HTTP client used by both services.
///
/// Inputs:
/// - `settings`: Timeouts are taken from here
///
/// Output:
/// - Configured `reqwest::Client` (connection pooling is built in).
///
/// # Errors
/// - The TLS backend cannot be initialised.
pub fn build_client(settings: &crate::config::Settings) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .user_agent(format!("country-atlas/{}", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub use account::{AccountApi, AccountError, AuthPayload, RestAccount};
pub use catalog::{CatalogSource, RestCatalog, fetch_favorites, load_catalog};
