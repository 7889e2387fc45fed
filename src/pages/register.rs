//! Register page. Creating an account does not log the user in.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use tracing::info;

use super::login::{CredentialsForm, MISSING_CREDENTIALS};
use crate::app::AppContext;

pub(crate) const REGISTRATION_FAILED: &str = "Registration failed";
const REGISTERED: &str = "User registered successfully";

#[derive(Debug, Default)]
pub struct RegisterPage {
    pub form: CredentialsForm,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl RegisterPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit the form; the inputs reset on success. Returns whether the
    /// account was created.
    pub async fn submit(&mut self, ctx: &AppContext) -> bool {
        self.error = None;
        self.success = None;
        if !self.form.is_complete() {
            self.error = Some(MISSING_CREDENTIALS.to_owned());
            return false;
        }

        self.loading = true;
        let result = ctx
            .api
            .register(self.form.username.trim(), &self.form.password)
            .await;
        self.loading = false;

        match result {
            Ok(resp) => {
                info!(username = %self.form.username.trim(), "account registered");
                self.success = Some(
                    resp.message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| REGISTERED.to_owned()),
                );
                self.form = CredentialsForm::default();
                true
            }
            Err(e) => {
                self.error = Some(e.user_message(REGISTRATION_FAILED));
                false
            }
        }
    }
}
