//! Authentication session: token and user, with an explicit load/clear lifecycle.

use tracing::{info, warn};

use super::storage::PreferenceStore;
use crate::logic::validation::{validate_login, validate_registration};
use crate::sources::{AccountApi, AccountError, AuthPayload};
use crate::state::User;

/// Key of the persisted bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key of the persisted user object.
pub const USER_KEY: &str = "user";

/// Logged-in state passed to whatever needs the current user.
///
/// Changes are written through to the preference store so the session
/// survives restarts.
#[derive(Debug)]
pub struct Session<S> {
    /// Backing store for `token` and `user`.
    store: S,
    /// Bearer token.
    token: Option<String>,
    /// Authenticated user.
    user: Option<User>,
}

impl<S: PreferenceStore> Session<S> {
    /// What: Load the persisted session, if any.
    ///
    /// Details:
    /// - A token without a readable user (or the reverse) is treated as logged out.
    pub fn load(store: S) -> Self {
        let token = store
            .get(TOKEN_KEY)
            .and_then(|v| v.as_str().map(ToOwned::to_owned))
            .filter(|t| !t.is_empty());
        let user = store
            .get(USER_KEY)
            .and_then(|v| serde_json::from_value::<User>(v).ok());
        match (token, user) {
            (Some(token), Some(user)) => Self {
                store,
                token: Some(token),
                user: Some(user),
            },
            _ => Self {
                store,
                token: None,
                user: None,
            },
        }
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Current user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Current favorites (empty when logged out).
    #[must_use]
    pub fn favorites(&self) -> &[String] {
        match &self.user {
            Some(u) => &u.favorites,
            None => &[],
        }
    }

    /// Write the current user object to the store.
    fn persist_user(&self) {
        if let Some(user) = &self.user {
            write_user(&self.store, user);
        }
    }

    /// Adopt a fresh token and user.
    fn establish(&mut self, auth: AuthPayload) -> &User {
        let AuthPayload { token, user } = auth;
        self.store
            .set(TOKEN_KEY, serde_json::Value::from(token.as_str()));
        self.token = Some(token);
        write_user(&self.store, &user);
        info!(user = %user.email, "[Session] Signed in");
        self.user.insert(user)
    }

    /// Forget the session and remove both persisted keys.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        info!("[Session] Signed out");
    }

    /// What: Re-validate a restored session against the account service.
    ///
    /// Output:
    /// - `true` when a user is signed in afterwards.
    ///
    /// Details:
    /// - A 401 clears the session; other failures keep the stored (possibly stale) user.
    pub async fn restore<A: AccountApi>(&mut self, api: &A) -> bool {
        let Some(token) = self.token.clone() else {
            return false;
        };
        match api.current_user(&token).await {
            Ok(user) => {
                self.user = Some(user);
                self.persist_user();
                true
            }
            Err(AccountError::Unauthorized) => {
                warn!("[Session] Stored token rejected; clearing session");
                self.logout();
                false
            }
            Err(e) => {
                warn!(error = %e, "[Session] Could not refresh user; keeping stored session");
                true
            }
        }
    }

    /// What: Sign in with email and password.
    ///
    /// # Errors
    /// - [`AccountError::Validation`] before any request when the inputs are invalid.
    /// - Any error from the account service.
    pub async fn login<A: AccountApi>(
        &mut self,
        api: &A,
        email: &str,
        password: &str,
    ) -> Result<&User, AccountError> {
        validate_login(email, password)?;
        let auth = api.login(email.trim(), password).await?;
        Ok(self.establish(auth))
    }

    /// What: Create an account and sign in.
    ///
    /// # Errors
    /// - [`AccountError::Validation`] before any request when the form is invalid.
    /// - Any error from the account service.
    pub async fn register<A: AccountApi>(
        &mut self,
        api: &A,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<&User, AccountError> {
        validate_registration(name, email, password, confirm)?;
        let auth = api.register(name.trim(), email.trim(), password).await?;
        Ok(self.establish(auth))
    }

    /// What: Add or remove `code` from the favorites.
    ///
    /// Output:
    /// - `true` when the server accepted the change; the local favorites are
    ///   then replaced by the server's list.
    /// - `false` on any failure (including being logged out or an expired
    ///   token); the session is left as it was.
    pub async fn toggle_favorite<A: AccountApi>(&mut self, api: &A, code: &str) -> bool {
        let (Some(token), Some(user)) = (self.token.as_deref(), self.user.as_ref()) else {
            warn!(code, "[Session] Favorite toggle without a session ignored");
            return false;
        };
        let result = if user.has_favorite(code) {
            api.remove_favorite(token, code).await
        } else {
            api.add_favorite(token, code).await
        };
        match result {
            Ok(favorites) => {
                if let Some(u) = self.user.as_mut() {
                    u.favorites = favorites;
                }
                self.persist_user();
                true
            }
            Err(e) => {
                warn!(code, error = %e, "[Session] Favorite toggle failed");
                false
            }
        }
    }

    /// What: Ask the service whether `code` is a favorite.
    ///
    /// Output:
    /// - The service's answer; `false` when logged out or on any failure.
    pub async fn is_favorite<A: AccountApi>(&self, api: &A, code: &str) -> bool {
        let Some(token) = self.token.as_deref() else {
            return false;
        };
        match api.is_favorite(token, code).await {
            Ok(b) => b,
            Err(e) => {
                warn!(code, error = %e, "[Session] Favorite check failed");
                false
            }
        }
    }
}

/// Encode `user` under [`USER_KEY`].
fn write_user<S: PreferenceStore>(store: &S, user: &User) {
    match serde_json::to_value(user) {
        Ok(v) => store.set(USER_KEY, v),
        Err(e) => warn!(error = %e, "[Session] Failed to encode user"),
    }
}
