//! REST client for the FoodBites backend.
//!
//! Every call is one HTTP request with no retry. Responses are normalized
//! into [`ApiResult`]: a decoded body on success, a classified [`ApiError`]
//! carrying the backend's `message` on failure.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures and timeouts become `ApiError::Network`. Non-success
//! statuses are classified by `ApiError::from_status`; an error body that is
//! not `{ message }` JSON still yields a classified error, just without a
//! message. Callers decide what the user sees.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Instant;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{
    ApiError, ApiResult, Credentials, Food, LoginResponse, MessageResponse, PasswordChange, ProfileUpdate,
    UserProfile,
};
use crate::config::{ClientConfig, Timeouts};

/// Backend operations the page views depend on.
///
/// `ApiClient` is the HTTP implementation; tests substitute in-process
/// fakes.
#[async_trait::async_trait]
pub trait FoodApi: Send + Sync {
    /// `POST /auth/login`.
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse>;

    /// `POST /auth/register`.
    async fn register(&self, username: &str, password: &str) -> ApiResult<MessageResponse>;

    /// `GET /foods`, with `?search=` when `search` is non-blank.
    async fn fetch_foods(&self, search: Option<&str>) -> ApiResult<Vec<Food>>;

    /// `GET /users/profile`.
    async fn fetch_profile(&self, token: &str) -> ApiResult<UserProfile>;

    /// `PUT /users/profile`.
    async fn update_profile(&self, token: &str, username: &str, email: &str) -> ApiResult<MessageResponse>;

    /// `PUT /users/profile/password`.
    async fn change_password(&self, token: &str, old_password: &str, new_password: &str)
    -> ApiResult<MessageResponse>;

    /// `DELETE /users/profile`.
    async fn delete_profile(&self, token: &str) -> ApiResult<MessageResponse>;

    /// Resolve a food image path against the backend origin.
    fn image_url(&self, path: &str) -> String;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    origin: String,
}

impl ApiClient {
    /// Build a client for the backend at `origin` (e.g. `http://localhost:5000`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the underlying HTTP client cannot be built.
    pub fn new(origin: &str, timeouts: Timeouts) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeouts.request)
            .connect_timeout(timeouts.connect)
            .build()
            .map_err(|e| ApiError::Network(format!("HTTP client build failed: {e}")))?;
        Ok(Self { http, origin: crate::config::normalize_api_url(origin) })
    }

    /// # Errors
    ///
    /// Returns `ApiError::Network` if the underlying HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        Self::new(&config.api_url, config.timeouts)
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}/api{path}", self.origin))
    }

    fn authed(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path).bearer_auth(token)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> ApiResult<T> {
        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            warn!(path, error = %e, "request failed before a response");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let duration_ms = start.elapsed().as_millis();

        if status.is_success() {
            debug!(path, status = status.as_u16(), duration_ms, "request succeeded");
            return serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()));
        }

        let message = serde_json::from_str::<MessageResponse>(&body)
            .unwrap_or_default()
            .message;
        warn!(path, status = status.as_u16(), duration_ms, message = message.as_deref().unwrap_or(""), "request rejected");
        Err(ApiError::from_status(status, message))
    }
}

#[async_trait::async_trait]
impl FoodApi for ApiClient {
    #[tracing::instrument(skip_all, fields(username = %username))]
    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let path = "/auth/login";
        let request = self
            .request(Method::POST, path)
            .json(&Credentials { username, password });
        self.send(request, path).await
    }

    #[tracing::instrument(skip_all, fields(username = %username))]
    async fn register(&self, username: &str, password: &str) -> ApiResult<MessageResponse> {
        let path = "/auth/register";
        let request = self
            .request(Method::POST, path)
            .json(&Credentials { username, password });
        self.send(request, path).await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_foods(&self, search: Option<&str>) -> ApiResult<Vec<Food>> {
        let path = "/foods";
        let mut request = self.request(Method::GET, path);
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            request = request.query(&[("search", term)]);
        }
        self.send(request, path).await
    }

    #[tracing::instrument(skip_all)]
    async fn fetch_profile(&self, token: &str) -> ApiResult<UserProfile> {
        let path = "/users/profile";
        self.send(self.authed(Method::GET, path, token), path).await
    }

    #[tracing::instrument(skip_all, fields(username = %username))]
    async fn update_profile(&self, token: &str, username: &str, email: &str) -> ApiResult<MessageResponse> {
        let path = "/users/profile";
        let request = self
            .authed(Method::PUT, path, token)
            .json(&ProfileUpdate { username, email });
        self.send(request, path).await
    }

    #[tracing::instrument(skip_all)]
    async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> ApiResult<MessageResponse> {
        let path = "/users/profile/password";
        let request = self
            .authed(Method::PUT, path, token)
            .json(&PasswordChange { old_password, new_password });
        self.send(request, path).await
    }

    #[tracing::instrument(skip_all)]
    async fn delete_profile(&self, token: &str) -> ApiResult<MessageResponse> {
        let path = "/users/profile";
        self.send(self.authed(Method::DELETE, path, token), path).await
    }

    fn image_url(&self, path: &str) -> String {
        resolve_image_url(&self.origin, path)
    }
}

/// Absolute and `data:` URLs pass through; anything else is joined to `origin`.
#[must_use]
pub fn resolve_image_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
        return path.to_owned();
    }
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}
