use rust_decimal::Decimal;

use super::*;
use crate::net::Food;
use crate::pages::support;

fn food(id: &str) -> Food {
    Food { id: id.to_owned(), name: id.to_owned(), price: Decimal::ONE, description: None, category: None, image: None }
}

#[test]
fn active_link_follows_location() {
    let ctx = support::context_for("http://127.0.0.1:9");
    let nav = Navbar::render(&ctx, "/foods?search=dosa");
    assert_eq!(nav.active, Some(Route::Foods));
    assert!(nav.is_active(&LINKS[1]));
    assert!(!nav.is_active(&LINKS[0]));

    assert_eq!(Navbar::render(&ctx, "/nowhere").active, None);
}

#[test]
fn badge_reads_through_the_cart_store() {
    let ctx = support::context_for("http://127.0.0.1:9");
    assert_eq!(Navbar::render(&ctx, "/").badge, 0);

    ctx.cart.add_to_cart(&food("a"));
    ctx.cart.add_to_cart(&food("a"));
    ctx.cart.add_to_cart(&food("b"));
    assert_eq!(Navbar::render(&ctx, "/").badge, 2);

    ctx.cart.clear_cart();
    assert_eq!(Navbar::render(&ctx, "/").badge, 0);
}

#[test]
fn line_marks_active_and_shows_badge() {
    let ctx = support::context_for("http://127.0.0.1:9");
    ctx.cart.add_to_cart(&food("a"));
    let nav = Navbar::render(&ctx, "/cart/");
    assert_eq!(nav.line(), "Home | Menu | [Cart (1)] | Orders | Profile");
}

#[test]
fn logged_in_flag_tracks_session() {
    let ctx = support::context_for("http://127.0.0.1:9");
    assert!(!Navbar::render(&ctx, "/").logged_in);
    ctx.session.login("tok");
    assert!(Navbar::render(&ctx, "/").logged_in);
}
