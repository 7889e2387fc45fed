//! Cart page: reads and edits the shared cart store.

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

use rust_decimal::Decimal;

use crate::app::AppContext;
use crate::state::CartItem;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: CartItem,
    pub line_total: Decimal,
}

/// What the page renders. Rebuilt from the store on every view; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub item_count: u64,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct CartPage {
    pub notice: Option<String>,
}

impl CartPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn view(&self, ctx: &AppContext) -> CartView {
        let lines: Vec<CartLine> = ctx
            .cart
            .items()
            .into_iter()
            .map(|item| CartLine { line_total: item.line_total(), item })
            .collect();
        let total = lines.iter().map(|l| l.line_total).sum();
        let item_count = lines.iter().map(|l| u64::from(l.item.quantity)).sum();
        CartView { lines, total, item_count }
    }

    pub fn set_quantity(&mut self, ctx: &AppContext, id: &str, qty: i64) -> bool {
        let changed = ctx.cart.update_quantity(id, qty);
        self.notice = (!changed).then(|| format!("No item {id} in the cart"));
        changed
    }

    pub fn remove(&mut self, ctx: &AppContext, id: &str) -> bool {
        let removed = ctx.cart.remove_from_cart(id);
        self.notice = Some(if removed { "Item removed".to_owned() } else { format!("No item {id} in the cart") });
        removed
    }

    pub fn clear(&mut self, ctx: &AppContext) {
        ctx.cart.clear_cart();
        self.notice = Some("Cart cleared".to_owned());
    }
}
