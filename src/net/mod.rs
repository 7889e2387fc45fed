//! Network layer: REST client and wire types.

pub mod api;
pub mod types;

#[cfg(test)]
#[path = "fake_backend_test.rs"]
pub(crate) mod fake_backend;

pub use api::{ApiClient, FoodApi};
pub use types::{ApiError, ApiResult, Food, UserProfile};
