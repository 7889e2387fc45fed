//! Login page: exchanges credentials for a session token.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use tracing::info;

use crate::app::AppContext;
use crate::net::ApiError;

pub(crate) const LOGIN_FAILED: &str = "Login failed";
pub(crate) const MISSING_CREDENTIALS: &str = "Username and password are required";

/// Username/password inputs shared by the login and register pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

impl CredentialsForm {
    /// Update the input called `name`. Returns false for unknown inputs.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        match name {
            "username" => self.username = value.into(),
            "password" => self.password = value.into(),
            _ => return false,
        }
        true
    }

    pub(crate) fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct LoginPage {
    pub form: CredentialsForm,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl LoginPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit the form. On success the token lands in the session store.
    /// Returns whether the user is now logged in.
    pub async fn submit(&mut self, ctx: &AppContext) -> bool {
        self.error = None;
        self.success = None;
        if !self.form.is_complete() {
            self.error = Some(MISSING_CREDENTIALS.to_owned());
            return false;
        }

        self.loading = true;
        let username = self.form.username.trim();
        let result = ctx.api.login(username, &self.form.password).await;
        self.loading = false;

        let token = result.and_then(|resp| {
            if resp.token.trim().is_empty() {
                Err(ApiError::Decode("login response carried an empty token".to_owned()))
            } else {
                Ok(resp.token)
            }
        });

        match token {
            Ok(token) => {
                ctx.session.login(token);
                info!(username, "logged in");
                self.success = Some("Login successful!".to_owned());
                true
            }
            Err(e) => {
                self.error = Some(e.user_message(LOGIN_FAILED));
                false
            }
        }
    }
}
