use super::*;
use crate::net::fake_backend::{FakeBackend, VALID_PASSWORD, VALID_USER, dead_origin};
use crate::pages::support;

fn page_with(username: &str, password: &str) -> LoginPage {
    let mut page = LoginPage::new();
    page.form.set_field("username", username);
    page.form.set_field("password", password);
    page
}

#[tokio::test]
async fn valid_login_stores_token_and_profile_fetch_succeeds() {
    let (_backend, ctx) = support::context().await;
    let mut page = page_with(VALID_USER, VALID_PASSWORD);

    assert!(page.submit(&ctx).await);
    assert!(!page.loading);
    assert_eq!(page.success.as_deref(), Some("Login successful!"));
    assert!(page.error.is_none());

    let token = ctx.session.token().unwrap();
    assert_eq!(token, FakeBackend::token_for(VALID_USER));
    let profile = ctx.api.fetch_profile(&token).await.unwrap();
    assert_eq!(profile.username, VALID_USER);
}

#[tokio::test]
async fn invalid_login_surfaces_message_and_stores_nothing() {
    let (_backend, ctx) = support::context().await;
    let mut page = page_with(VALID_USER, "wrong");

    assert!(!page.submit(&ctx).await);
    assert_eq!(page.error.as_deref(), Some("Invalid credentials"));
    assert!(page.success.is_none());
    assert!(!ctx.session.is_authenticated());
}

#[tokio::test]
async fn missing_fields_fail_before_any_request() {
    let ctx = support::context_for(&dead_origin().await);
    let mut page = page_with("  ", "pw");
    assert!(!page.submit(&ctx).await);
    assert_eq!(page.error.as_deref(), Some(MISSING_CREDENTIALS));
}

#[tokio::test]
async fn network_failure_uses_fallback_message() {
    let ctx = support::context_for(&dead_origin().await);
    let mut page = page_with(VALID_USER, VALID_PASSWORD);
    assert!(!page.submit(&ctx).await);
    assert_eq!(page.error.as_deref(), Some(LOGIN_FAILED));
    assert!(!page.loading);
}

#[tokio::test]
async fn resubmitting_clears_previous_banner() {
    let (_backend, ctx) = support::context().await;
    let mut page = page_with(VALID_USER, "wrong");
    page.submit(&ctx).await;
    assert!(page.error.is_some());

    page.form.set_field("password", VALID_PASSWORD);
    assert!(page.submit(&ctx).await);
    assert!(page.error.is_none());
}

#[test]
fn set_field_rejects_unknown_inputs() {
    let mut form = CredentialsForm::default();
    assert!(form.set_field("username", "asha"));
    assert!(!form.set_field("email", "a@b.c"));
    assert_eq!(form.username, "asha");
}
