//! FoodBites terminal client.
//!
//! A session store, a cart store, a typed REST client and page view-models
//! for the FoodBites food-ordering backend, driven by an interactive shell.
//!
//! Layout:
//! - [`net`]: `FoodApi` trait, the reqwest-backed `ApiClient`, wire types.
//! - [`state`]: `SessionStore` (persisted token) and `CartStore`.
//! - [`pages`]: login, register, menu, cart, profile and navbar views.
//! - [`app`]: `AppContext` bundling the stores and the API handle.
//! - [`shell`]: line-oriented front end over the pages.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod shell;
pub mod state;
