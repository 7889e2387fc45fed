//! Navigation bar: links, the active link, and the cart badge.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use super::Route;
use crate::app::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

pub const LINKS: [NavLink; 5] = [
    NavLink { label: "Home", route: Route::Home },
    NavLink { label: "Menu", route: Route::Foods },
    NavLink { label: "Cart", route: Route::Cart },
    NavLink { label: "Orders", route: Route::Orders },
    NavLink { label: "Profile", route: Route::Profile },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    pub active: Option<Route>,
    /// Distinct foods in the cart; read from the store, never tracked here.
    pub badge: usize,
    pub logged_in: bool,
}

impl Navbar {
    #[must_use]
    pub fn render(ctx: &AppContext, location: &str) -> Self {
        Self {
            active: Route::from_path(location),
            badge: ctx.cart.len(),
            logged_in: ctx.session.is_authenticated(),
        }
    }

    #[must_use]
    pub fn is_active(&self, link: &NavLink) -> bool {
        self.active == Some(link.route)
    }

    /// One-line text rendering, e.g. `Home | [Menu] | Cart (2) | Orders | Profile`.
    #[must_use]
    pub fn line(&self) -> String {
        LINKS
            .iter()
            .map(|link| {
                let label = if link.route == Route::Cart && self.badge > 0 {
                    format!("{} ({})", link.label, self.badge)
                } else {
                    link.label.to_owned()
                };
                if self.is_active(link) { format!("[{label}]") } else { label }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
