//! Page view-models.
//!
//! DESIGN
//! ======
//! Each page holds only per-view state: form inputs, a loading flag, and
//! error/success banners. Anything that must outlive the page goes through
//! the stores in [`crate::app::AppContext`]. Pages never retry; a failed
//! call leaves the page interactive with the error shown.

pub mod cart;
pub mod foods;
pub mod login;
pub mod navbar;
pub mod profile;
pub mod register;

#[cfg(test)]
#[path = "support_test.rs"]
pub(crate) mod support;


use crate::net::{ApiError, ApiResult};
use crate::state::SessionStore;

// =============================================================================
// ROUTES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Foods,
    Cart,
    Orders,
    Profile,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Foods => "/foods",
            Self::Cart => "/cart",
            Self::Orders => "/orders",
            Self::Profile => "/profile",
        }
    }

    /// Match a location path, ignoring any query string and trailing slash.
    #[must_use]
    pub fn from_path(location: &str) -> Option<Self> {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        [Self::Home, Self::Login, Self::Register, Self::Foods, Self::Cart, Self::Orders, Self::Profile]
            .into_iter()
            .find(|r| r.path() == path)
    }
}

// =============================================================================
// SUPERSEDED REQUESTS
// =============================================================================

/// Identifies one in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Tracks which load is current so a superseded result can be dropped.
#[derive(Debug, Default)]
pub struct RequestTracker {
    current: u64,
}

impl RequestTracker {
    /// Start a new load, superseding any earlier one.
    pub fn begin(&mut self) -> RequestTicket {
        self.current = self.current.wrapping_add(1);
        RequestTicket(self.current)
    }

    /// Supersede the in-flight load without starting another (navigation away).
    pub fn cancel(&mut self) {
        self.current = self.current.wrapping_add(1);
    }

    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.current
    }
}

/// The session token, or `ApiError::NotAuthenticated`.
///
/// # Errors
///
/// Returns `ApiError::NotAuthenticated` when no one is logged in.
pub fn require_token(session: &SessionStore) -> ApiResult<String> {
    session.token().ok_or(ApiError::NotAuthenticated)
}
