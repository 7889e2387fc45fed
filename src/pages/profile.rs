//! Profile page: view and edit the account, change password, delete account.
//!
//! ERROR HANDLING
//! ==============
//! Every call needs the session token. A missing token, or a token the
//! backend no longer accepts, clears the session and flips `needs_login`;
//! the page stays usable and tells the user to log in again. Any other
//! failure shows the backend message or the per-action fallback.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use tracing::info;

use super::{Route, require_token};
use crate::app::AppContext;
use crate::net::{ApiError, UserProfile};

pub(crate) const LOAD_FAILED: &str = "Failed to load profile";
pub(crate) const UPDATE_FAILED: &str = "Failed to update profile";
pub(crate) const PASSWORD_FAILED: &str = "Failed to change password";
pub(crate) const DELETE_FAILED: &str = "Failed to delete account";
pub(crate) const LOGIN_REQUIRED: &str = "Please log in to view your profile";
pub(crate) const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub(crate) const CONFIRM_DELETE: &str = "Confirm account deletion to continue";

#[derive(Debug, Default)]
pub struct ProfilePage {
    /// Local copy of the account, updated after a successful edit.
    pub user: Option<UserProfile>,
    pub loading: bool,
    pub error: Option<String>,
    pub form_error: Option<String>,
    pub form_success: Option<String>,
    pub needs_login: bool,
    pub username: String,
    pub email: String,
    pub old_password: String,
    pub new_password: String,
    /// Token the current `user` was fetched with.
    loaded_for: Option<String>,
}

impl ProfilePage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the account and prefill the edit inputs. Returns whether it loaded.
    pub async fn load(&mut self, ctx: &AppContext) -> bool {
        self.error = None;
        let token = match require_token(&ctx.session) {
            Ok(token) => token,
            Err(e) => {
                self.error = Some(self.failure(ctx, &e, LOAD_FAILED));
                return false;
            }
        };
        self.loading = true;
        let result = ctx.api.fetch_profile(&token).await;
        self.loading = false;

        match result {
            Ok(user) => {
                self.loaded_for = Some(token);
                self.username.clone_from(&user.username);
                self.email = user.email.clone().unwrap_or_default();
                self.user = Some(user);
                self.needs_login = false;
                true
            }
            Err(e) => {
                self.error = Some(self.failure(ctx, &e, LOAD_FAILED));
                false
            }
        }
    }

    /// True when `user` belongs to the session's current token. Page state
    /// from an earlier session must never be sent with a newer token.
    #[must_use]
    pub fn is_loaded_for(&self, ctx: &AppContext) -> bool {
        self.user.is_some() && self.loaded_for.is_some() && self.loaded_for == ctx.session.token()
    }

    /// Save the username/email inputs.
    pub async fn update_profile(&mut self, ctx: &AppContext) -> bool {
        self.clear_form_banners();
        let username = self.username.trim().to_owned();
        if username.is_empty() {
            self.form_error = Some("Username is required".to_owned());
            return false;
        }
        let email = self.email.trim().to_owned();

        let result = match require_token(&ctx.session) {
            Ok(token) => ctx.api.update_profile(&token, &username, &email).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(resp) => {
                if let Some(user) = self.user.as_mut() {
                    user.username.clone_from(&username);
                    user.email = (!email.is_empty()).then_some(email);
                }
                info!(username = %username, "profile updated");
                self.form_success = Some(resp.message.unwrap_or_else(|| "Profile updated successfully".to_owned()));
                true
            }
            Err(e) => {
                self.form_error = Some(self.failure(ctx, &e, UPDATE_FAILED));
                false
            }
        }
    }

    /// Change the password. Both inputs are cleared on success.
    pub async fn change_password(&mut self, ctx: &AppContext) -> bool {
        self.clear_form_banners();
        if self.old_password.is_empty() || self.new_password.is_empty() {
            self.form_error = Some("Both old and new password are required".to_owned());
            return false;
        }

        let result = match require_token(&ctx.session) {
            Ok(token) => {
                ctx.api
                    .change_password(&token, &self.old_password, &self.new_password)
                    .await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(resp) => {
                self.old_password.clear();
                self.new_password.clear();
                self.form_success = Some(resp.message.unwrap_or_else(|| "Password updated successfully".to_owned()));
                true
            }
            Err(e) => {
                self.form_error = Some(self.failure(ctx, &e, PASSWORD_FAILED));
                false
            }
        }
    }

    /// Delete the account once the user has confirmed. On success the
    /// session is cleared and the returned route is where to go next.
    pub async fn delete_account(&mut self, ctx: &AppContext, confirmed: bool) -> Option<Route> {
        self.clear_form_banners();
        if !confirmed {
            self.form_error = Some(CONFIRM_DELETE.to_owned());
            return None;
        }

        let result = match require_token(&ctx.session) {
            Ok(token) => ctx.api.delete_profile(&token).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(resp) => {
                ctx.session.logout();
                self.user = None;
                self.loaded_for = None;
                info!("account deleted");
                self.form_success = Some(resp.message.unwrap_or_else(|| "Account deleted successfully".to_owned()));
                Some(Route::Home)
            }
            Err(e) => {
                self.form_error = Some(self.failure(ctx, &e, DELETE_FAILED));
                None
            }
        }
    }

    fn clear_form_banners(&mut self) {
        self.form_error = None;
        self.form_success = None;
    }

    /// Message for `e`; auth failures also end the session.
    fn failure(&mut self, ctx: &AppContext, e: &ApiError, fallback: &str) -> String {
        match e {
            ApiError::NotAuthenticated => {
                self.needs_login = true;
                LOGIN_REQUIRED.to_owned()
            }
            ApiError::Unauthorized { .. } => {
                ctx.session.logout();
                self.user = None;
                self.loaded_for = None;
                self.needs_login = true;
                SESSION_EXPIRED.to_owned()
            }
            other => other.user_message(fallback),
        }
    }
}
