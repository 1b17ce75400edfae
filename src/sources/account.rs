//! Account backend client: registration, login, session check, and favorites.

use std::fmt;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::logic::validation::ValidationErrors;
use crate::state::User;
use crate::util::percent_encode;

/// Token and user returned by the register and login endpoints.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct AuthPayload {
    /// Bearer token for subsequent calls.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// Errors raised by account operations.
#[derive(Debug)]
pub enum AccountError {
    /// The service could not be reached or the connection failed.
    Transport {
        /// Operation name used in the user-facing message (e.g., "Login").
        action: &'static str,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// The service answered with a non-success status.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided message or a fixed fallback.
        message: String,
    },
    /// The token is missing, expired, or revoked (HTTP 401).
    Unauthorized,
    /// The response body did not have the expected shape.
    Decode(String),
    /// Input failed local validation; no request was sent.
    Validation(ValidationErrors),
    /// The operation needs a logged-in session.
    NotLoggedIn,
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { action, .. } => {
                write!(f, "{action} failed. Please try again later.")
            }
            Self::Rejected { message, .. } => f.write_str(message),
            Self::Unauthorized => f.write_str("Your session has expired. Please log in again."),
            Self::Decode(detail) => write!(f, "Unexpected response from account service: {detail}"),
            Self::Validation(errs) => write!(f, "{errs}"),
            Self::NotLoggedIn => f.write_str("You need to be logged in to do that."),
        }
    }
}

impl std::error::Error for AccountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            Self::Rejected { .. }
            | Self::Unauthorized
            | Self::Decode(_)
            | Self::Validation(_)
            | Self::NotLoggedIn => None,
        }
    }
}

impl From<ValidationErrors> for AccountError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Remote account store.
///
/// Token-bearing calls take the token explicitly; the session context owns it.
#[allow(async_fn_in_trait)]
pub trait AccountApi {
    /// Create an account and sign in.
    ///
    /// # Errors
    /// - Transport failure or the service rejecting the registration.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthPayload, AccountError>;

    /// Sign in with email and password.
    ///
    /// # Errors
    /// - Transport failure or invalid credentials.
    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, AccountError>;

    /// Fetch the user behind `token`.
    ///
    /// # Errors
    /// - [`AccountError::Unauthorized`] when the token is no longer valid.
    async fn current_user(&self, token: &str) -> Result<User, AccountError>;

    /// Add a favorite and return the updated favorites list.
    ///
    /// # Errors
    /// - Transport failure, rejection, or expired token.
    async fn add_favorite(&self, token: &str, code: &str) -> Result<Vec<String>, AccountError>;

    /// Remove a favorite and return the updated favorites list.
    ///
    /// # Errors
    /// - Transport failure, rejection, or expired token.
    async fn remove_favorite(&self, token: &str, code: &str)
    -> Result<Vec<String>, AccountError>;

    /// Ask whether `code` is a favorite.
    ///
    /// # Errors
    /// - Transport failure, rejection, or expired token.
    async fn is_favorite(&self, token: &str, code: &str) -> Result<bool, AccountError>;
}

/// HTTP implementation of [`AccountApi`].
#[derive(Debug, Clone)]
pub struct RestAccount {
    /// Shared connection pool.
    client: reqwest::Client,
    /// Base URL without trailing slash.
    base_url: String,
}

impl RestAccount {
    /// What: Build an account client from settings.
    ///
    /// # Errors
    /// - The HTTP client cannot be constructed.
    pub fn from_settings(settings: &crate::config::Settings) -> super::Result<Self> {
        Ok(Self {
            client: super::build_client(settings)?,
            base_url: settings.account_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// What: Send a request and decode a successful JSON body.
    ///
    /// Inputs:
    /// - `action`: Operation name for messages ("Login", "Registration", ...)
    /// - `req`: Prepared request
    /// - `authed`: Whether the request carries the session token
    ///
    /// Output:
    /// - Parsed JSON body on 2xx.
    ///
    /// Details:
    /// - 401 on a token-bearing request maps to [`AccountError::Unauthorized`];
    ///   other failures carry the server's `message` field or `"<action> failed"`.
    async fn send(
        &self,
        action: &'static str,
        req: reqwest::RequestBuilder,
        authed: bool,
    ) -> Result<Value, AccountError> {
        let resp = req
            .send()
            .await
            .map_err(|source| AccountError::Transport { action, source })?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|source| AccountError::Transport { action, source })?;
        debug!(
            action,
            status = status.as_u16(),
            bytes = body.len(),
            "[Account] response received"
        );
        if authed && status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AccountError::Unauthorized);
        }
        let parsed: Option<Value> = serde_json::from_str(&body).ok();
        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
                .map_or_else(|| format!("{action} failed"), ToOwned::to_owned);
            warn!(action, status = status.as_u16(), message = %message, "[Account] request rejected");
            return Err(AccountError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        parsed.ok_or_else(|| AccountError::Decode("body is not JSON".to_string()))
    }
}

/// Decode a typed value from a JSON body.
fn decode<T: serde::de::DeserializeOwned>(v: Value) -> Result<T, AccountError> {
    serde_json::from_value(v).map_err(|e| AccountError::Decode(e.to_string()))
}

/// Favorites endpoints return either a bare list or `{favorites: [...]}`.
fn decode_favorites(v: Value) -> Result<Vec<String>, AccountError> {
    match v {
        Value::Object(mut obj) => match obj.remove("favorites") {
            Some(list) => decode(list),
            None => Err(AccountError::Decode("missing favorites list".to_string())),
        },
        other => decode(other),
    }
}

impl AccountApi for RestAccount {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthPayload, AccountError> {
        let req = self
            .client
            .post(self.url("/auth/register"))
            .json(&json!({"name": name, "email": email, "password": password}));
        decode(self.send("Registration", req, false).await?)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, AccountError> {
        let req = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({"email": email, "password": password}));
        decode(self.send("Login", req, false).await?)
    }

    async fn current_user(&self, token: &str) -> Result<User, AccountError> {
        let req = self.client.get(self.url("/auth/me")).bearer_auth(token);
        decode(self.send("Session check", req, true).await?)
    }

    async fn add_favorite(&self, token: &str, code: &str) -> Result<Vec<String>, AccountError> {
        let req = self
            .client
            .post(self.url("/users/favorites"))
            .bearer_auth(token)
            .json(&json!({"countryCode": code}));
        decode_favorites(self.send("Adding favorite", req, true).await?)
    }

    async fn remove_favorite(
        &self,
        token: &str,
        code: &str,
    ) -> Result<Vec<String>, AccountError> {
        let path = format!("/users/favorites/{}", percent_encode(code));
        let req = self.client.delete(self.url(&path)).bearer_auth(token);
        decode_favorites(self.send("Removing favorite", req, true).await?)
    }

    async fn is_favorite(&self, token: &str, code: &str) -> Result<bool, AccountError> {
        let path = format!("/users/favorites/{}", percent_encode(code));
        let req = self.client.get(self.url(&path)).bearer_auth(token);
        let v = self.send("Favorite check", req, true).await?;
        v.get("isFavorite")
            .and_then(Value::as_bool)
            .ok_or_else(|| AccountError::Decode("missing isFavorite".to_string()))
    }
}
