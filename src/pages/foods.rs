//! Menu page: lists foods, highlights a searched dish, adds items to the cart.
//!
//! DESIGN
//! ======
//! A load is split into `begin_load` / `finish_load` around the API call so
//! a result that arrives after a newer search (or after the user navigated
//! away) is dropped instead of overwriting the view.

#[cfg(test)]
#[path = "foods_test.rs"]
mod foods_test;

use rust_decimal::Decimal;
use tracing::debug;

use super::{RequestTicket, RequestTracker};
use crate::app::AppContext;
use crate::net::{ApiResult, Food};

pub(crate) const MENU_FAILED: &str = "Failed to load the menu";
pub(crate) const ADD_FAILED: &str = "Failed to add item";

/// Location filters for the menu. `cuisine` wins over `search` when both
/// are present; only `search` drives highlighting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuQuery {
    pub search: Option<String>,
    pub cuisine: Option<String>,
}

impl MenuQuery {
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self { search: Some(term.into()), cuisine: None }
    }

    #[must_use]
    pub fn cuisine(term: impl Into<String>) -> Self {
        Self { search: None, cuisine: Some(term.into()) }
    }

    /// The value sent as `?search=`.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        non_blank(self.cuisine.as_deref()).or_else(|| non_blank(self.search.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Default)]
pub struct FoodsPage {
    pub foods: Vec<Food>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    /// Food whose name matched the search term exactly.
    pub highlighted: Option<String>,
    /// Food currently being added to the cart.
    pub adding: Option<String>,
    query: MenuQuery,
    tracker: RequestTracker,
}

impl FoodsPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(&self) -> &MenuQuery {
        &self.query
    }

    /// Fetch the menu for `query`. Returns whether the result was applied.
    pub async fn load(&mut self, ctx: &AppContext, query: MenuQuery) -> bool {
        let ticket = self.begin_load(query);
        let term = self.query.term().map(str::to_owned);
        let result = ctx.api.fetch_foods(term.as_deref()).await;
        ctx.cosmetic_pause().await;
        self.finish_load(ticket, result)
    }

    pub fn begin_load(&mut self, query: MenuQuery) -> RequestTicket {
        self.loading = true;
        self.error = None;
        self.highlighted = None;
        self.query = query;
        self.tracker.begin()
    }

    /// Apply a fetch result unless a newer load superseded it.
    pub fn finish_load(&mut self, ticket: RequestTicket, result: ApiResult<Vec<Food>>) -> bool {
        if !self.tracker.is_current(ticket) {
            debug!("discarding superseded menu result");
            return false;
        }
        self.loading = false;
        match result {
            Ok(foods) => {
                self.highlighted = non_blank(self.query.search.as_deref()).and_then(|term| {
                    let term = term.to_lowercase();
                    foods
                        .iter()
                        .find(|f| f.name.to_lowercase() == term)
                        .map(|f| f.id.clone())
                });
                self.foods = foods;
            }
            Err(e) => {
                debug!(error = %e, "menu load failed");
                self.error = Some(MENU_FAILED.to_owned());
            }
        }
        true
    }

    /// Navigation away: any in-flight load result will be dropped.
    pub fn leave(&mut self) {
        self.tracker.cancel();
        self.loading = false;
        self.adding = None;
    }

    /// Add the listed food `food_id` to the cart. Returns its new quantity.
    pub async fn add_to_cart(&mut self, ctx: &AppContext, food_id: &str) -> Option<u32> {
        self.success = None;
        let Some(food) = self.foods.iter().find(|f| f.id == food_id).cloned() else {
            self.error = Some(ADD_FAILED.to_owned());
            return None;
        };
        self.error = None;
        self.adding = Some(food.id.clone());
        ctx.cosmetic_pause().await;
        let quantity = ctx.cart.add_to_cart(&food);
        self.adding = None;
        self.success = Some(format!("{} added to cart!", food.name));
        Some(quantity)
    }

    /// Nothing to show and nothing went wrong.
    #[must_use]
    pub fn is_empty_menu(&self) -> bool {
        !self.loading && self.error.is_none() && self.foods.is_empty()
    }

    #[must_use]
    pub fn is_adding(&self, food_id: &str) -> bool {
        self.adding.as_deref() == Some(food_id)
    }
}

/// Placeholder glyph for a food without an image.
#[must_use]
pub fn category_emoji(category: Option<&str>) -> &'static str {
    match category.map(str::to_lowercase).as_deref() {
        Some("burger") => "🍔",
        Some("pizza") => "🍕",
        Some("sushi") => "🍣",
        Some("pasta") => "🍝",
        Some("salad") => "🥗",
        Some("dessert") => "🍰",
        Some("drink") => "🥤",
        Some("vegan") => "🌱",
        Some("spicy") => "🌶️",
        Some("breakfast") => "🥞",
        _ => "🍽️",
    }
}

#[must_use]
pub fn format_price(price: Decimal) -> String {
    format!("₹{}", price.normalize())
}

/// Description text, with the menu's default for foods that have none.
#[must_use]
pub fn description_of(food: &Food) -> &str {
    non_blank(food.description.as_deref()).unwrap_or("Delicious food item")
}
