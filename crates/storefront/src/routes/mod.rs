//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                   - Liveness check
//!
//! # Cart
//! GET    /api/cart                                 - Cart with totals
//! POST   /api/cart/lines                           - Add line (merges by item)
//! PATCH  /api/cart/lines/{item_id}                 - Set quantity (below 1 is ignored)
//! DELETE /api/cart/lines/{item_id}                 - Remove line
//!
//! # Wishlist
//! GET    /api/wishlist                             - Saved entries
//! POST   /api/wishlist/entries                     - Save entry
//! DELETE /api/wishlist/entries/{item_id}           - Remove entry
//! POST   /api/wishlist/entries/{item_id}/like      - Toggle liked
//! POST   /api/wishlist/entries/{item_id}/move-to-cart - Take in-stock entry off the list
//! ```

pub mod cart;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/lines", post(cart::add))
        .route(
            "/lines/{item_id}",
            patch(cart::update).delete(cart::remove),
        )
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/entries", post(wishlist::add))
        .route("/entries/{item_id}", delete(wishlist::remove))
        .route("/entries/{item_id}/like", post(wishlist::toggle_like))
        .route(
            "/entries/{item_id}/move-to-cart",
            post(wishlist::move_to_cart),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/cart", cart_routes())
        .nest("/api/wishlist", wishlist_routes())
}
