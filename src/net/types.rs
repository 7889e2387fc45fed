//! Wire types and errors for the FoodBites REST API.
//!
//! Request bodies borrow from the caller; response bodies own their data.
//! Field names follow the backend's JSON (`_id`, `createdAt`, `oldPassword`).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by API client calls.
///
/// Every variant renders a readable message. Variants that come from an HTTP
/// response keep the backend's `message` field when it sent one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Invalid credentials, or an expired/invalid bearer token (401/403).
    #[error("authentication failed: {}", .message.as_deref().unwrap_or("unauthorized"))]
    Unauthorized { message: Option<String> },

    /// A bearer call was attempted without a session token.
    #[error("not logged in")]
    NotAuthenticated,

    /// The backend rejected the input (400/409/422).
    #[error("request rejected: {}", .message.as_deref().unwrap_or("invalid input"))]
    Validation { status: u16, message: Option<String> },

    /// No matching resource (404).
    #[error("not found: {}", .message.as_deref().unwrap_or("no matching resource"))]
    NotFound { message: Option<String> },

    /// Any other non-success status.
    #[error("server error: status {status}")]
    Server { status: u16, message: Option<String> },

    /// A success response whose body does not match the contract.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success status and optional backend message.
    #[must_use]
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Unauthorized { message },
            404 => Self::NotFound { message },
            code @ (400 | 409 | 422) => Self::Validation { status: code, message },
            code => Self::Server { status: code, message },
        }
    }

    /// The `message` the backend attached to the failure, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Validation { message, .. }
            | Self::Server { message, .. } => message.as_deref(),
            Self::Network(_) | Self::NotAuthenticated | Self::Decode(_) => None,
        }
    }

    /// Text to show the user: the backend message, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_owned()
    }

    /// True when the session token is missing or no longer accepted.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::NotAuthenticated)
    }
}

/// Uniform result of every API call.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// REQUESTS
// =============================================================================

/// Body of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `PUT /users/profile`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate<'a> {
    pub username: &'a str,
    pub email: &'a str,
}

/// Body of `PUT /users/profile/password`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Success body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// `{ message }` body returned by mutating endpoints and by most errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// A menu entry as served by `GET /foods`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Food {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// The logged-in user's account as served by `GET /users/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl UserProfile {
    /// Calendar date the account was created, as `YYYY-MM-DD`.
    #[must_use]
    pub fn member_since(&self) -> Option<String> {
        self.created_at.map(|ts| ts.date().to_string())
    }
}
