//! Cart store: selected foods and quantities, shared by every page.
//!
//! DESIGN
//! ======
//! Items keep insertion order and are unique by food id. Every operation
//! takes the lock once and finishes its read-modify-write before releasing
//! it, so rapid repeated adds from different tasks never lose an increment.
//! Pages hold store handles, never copies of the item list; derived values
//! (badge count, totals) are computed on read.

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use tracing::debug;

use crate::net::types::Food;

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl CartItem {
    fn from_food(food: &Food) -> Self {
        Self {
            id: food.id.clone(),
            name: food.name.clone(),
            price: food.price,
            quantity: 1,
            category: food.category.clone(),
            image: food.image.clone(),
        }
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Clone, Default)]
pub struct CartStore {
    items: Arc<Mutex<Vec<CartItem>>>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one of `food`. Returns the item's quantity afterwards.
    pub fn add_to_cart(&self, food: &Food) -> u32 {
        let mut items = self.lock();
        let quantity = if let Some(item) = items.iter_mut().find(|i| i.id == food.id) {
            item.quantity = item.quantity.saturating_add(1);
            item.quantity
        } else {
            items.push(CartItem::from_food(food));
            1
        };
        debug!(food_id = %food.id, quantity, "added to cart");
        quantity
    }

    /// Remove the item entirely. Returns whether it was present.
    pub fn remove_from_cart(&self, id: &str) -> bool {
        let mut items = self.lock();
        let before = items.len();
        items.retain(|i| i.id != id);
        items.len() != before
    }

    /// Set an item's quantity; `qty <= 0` removes it. Unknown ids are ignored.
    /// Returns whether the cart changed.
    pub fn update_quantity(&self, id: &str, qty: i64) -> bool {
        let Ok(qty) = u32::try_from(qty.max(0)) else {
            return self.set_quantity(id, u32::MAX);
        };
        if qty == 0 {
            return self.remove_from_cart(id);
        }
        self.set_quantity(id, qty)
    }

    fn set_quantity(&self, id: &str, qty: u32) -> bool {
        let mut items = self.lock();
        match items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.quantity = qty;
                true
            }
            None => false,
        }
    }

    /// Empty the cart, e.g. after an order is placed.
    pub fn clear_cart(&self) {
        self.lock().clear();
    }

    /// Sum of `price * quantity` over all items.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lock().iter().map(CartItem::line_total).sum()
    }

    /// Snapshot of the items in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().clone()
    }

    /// Number of distinct items. This is the navbar badge count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sum of quantities across all items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lock().iter().map(|i| u64::from(i.quantity)).sum()
    }

    #[must_use]
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.lock()
            .iter()
            .find(|i| i.id == id)
            .map_or(0, |i| i.quantity)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartItem>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore").field("items", &*self.lock()).finish()
    }
}
