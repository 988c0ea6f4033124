//! Wishlist route handlers.
//!
//! Move-to-cart only takes the entry off the wishlist and returns it in the
//! response. The cart is not touched: how a moved entry becomes a cart line
//! (quantity, price refresh) is up to the client.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::{Deserialize, Serialize};
use shopfront_core::{CurrencyCode, ItemId, Money, MoveToCart, Wishlist, WishlistEntry};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::Shopper;
use crate::state::AppState;

/// Wishlist entry display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntryView {
    pub item_id: ItemId,
    pub display_name: String,
    pub unit_price: String,
    pub in_stock: bool,
    pub liked: bool,
    /// Out-of-stock entries cannot be moved.
    pub can_move_to_cart: bool,
}

impl WishlistEntryView {
    fn build(entry: &WishlistEntry, currency: CurrencyCode) -> Self {
        Self {
            item_id: entry.item_id,
            display_name: entry.display_name.clone(),
            unit_price: entry.unit_price.display(currency),
            in_stock: entry.in_stock,
            liked: entry.liked,
            can_move_to_cart: entry.in_stock,
        }
    }
}

/// Wishlist display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistView {
    pub entries: Vec<WishlistEntryView>,
    pub count: usize,
    /// e.g. "1 item", "3 items"
    pub count_label: String,
    pub is_empty: bool,
}

impl WishlistView {
    /// Build the view for a wishlist.
    #[must_use]
    pub fn build(wishlist: &Wishlist, currency: CurrencyCode) -> Self {
        Self {
            entries: wishlist
                .entries()
                .iter()
                .map(|entry| WishlistEntryView::build(entry, currency))
                .collect(),
            count: wishlist.count(),
            count_label: wishlist.count_label(),
            is_empty: wishlist.is_empty(),
        }
    }
}

/// Move-to-cart response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveToCartView {
    /// The entry taken off the wishlist.
    pub moved: WishlistEntry,
    pub wishlist: WishlistView,
}

/// Save to wishlist request body.
#[derive(Debug, Deserialize)]
pub struct AddToWishlistRequest {
    pub item_id: ItemId,
    pub display_name: String,
    pub unit_price: Money,
    pub in_stock: bool,
    #[serde(default)]
    pub liked: bool,
}

/// Display the wishlist.
#[instrument(skip(state, shopper))]
pub async fn show(State(state): State<AppState>, shopper: Shopper) -> Result<Json<WishlistView>> {
    let wishlist = shopper.wishlist().await?;
    Ok(Json(WishlistView::build(&wishlist, state.currency())))
}

/// Save an entry. Saving an item twice keeps the first entry.
#[instrument(skip(state, shopper, payload))]
pub async fn add(
    State(state): State<AppState>,
    shopper: Shopper,
    payload: std::result::Result<Json<AddToWishlistRequest>, JsonRejection>,
) -> Result<Json<WishlistView>> {
    let Json(form) = payload?;
    let item_id = form.item_id;
    let mut entry = WishlistEntry::new(item_id, form.display_name, form.unit_price, form.in_stock);
    entry.liked = form.liked;

    let mut wishlist = shopper.wishlist().await?;
    if wishlist.add(entry) {
        shopper.save_wishlist(&wishlist).await?;
        tracing::info!(%item_id, entries = wishlist.count(), "Saved wishlist entry");
    } else {
        tracing::debug!(%item_id, "Ignored duplicate wishlist entry");
    }

    Ok(Json(WishlistView::build(&wishlist, state.currency())))
}

/// Remove an entry.
#[instrument(skip(state, shopper))]
pub async fn remove(
    State(state): State<AppState>,
    shopper: Shopper,
    path: std::result::Result<Path<ItemId>, PathRejection>,
) -> Result<Json<WishlistView>> {
    let Path(item_id) = path?;
    let mut wishlist = shopper.wishlist().await?;

    if wishlist.remove(item_id) {
        shopper.save_wishlist(&wishlist).await?;
        tracing::info!(%item_id, entries = wishlist.count(), "Removed wishlist entry");
    } else {
        tracing::debug!(%item_id, "Ignored removal of missing wishlist entry");
    }

    Ok(Json(WishlistView::build(&wishlist, state.currency())))
}

/// Flip the liked flag of an entry.
#[instrument(skip(state, shopper))]
pub async fn toggle_like(
    State(state): State<AppState>,
    shopper: Shopper,
    path: std::result::Result<Path<ItemId>, PathRejection>,
) -> Result<Json<WishlistView>> {
    let Path(item_id) = path?;
    let mut wishlist = shopper.wishlist().await?;

    if let Some(liked) = wishlist.toggle_liked(item_id) {
        shopper.save_wishlist(&wishlist).await?;
        tracing::debug!(%item_id, liked, "Toggled wishlist like");
    }

    Ok(Json(WishlistView::build(&wishlist, state.currency())))
}

/// Take an in-stock entry off the wishlist and hand it back.
#[instrument(skip(state, shopper))]
pub async fn move_to_cart(
    State(state): State<AppState>,
    shopper: Shopper,
    path: std::result::Result<Path<ItemId>, PathRejection>,
) -> Result<Json<MoveToCartView>> {
    let Path(item_id) = path?;
    let mut wishlist = shopper.wishlist().await?;

    match wishlist.move_to_cart(item_id) {
        MoveToCart::Moved(moved) => {
            shopper.save_wishlist(&wishlist).await?;
            let id = item_id.to_string();
            add_breadcrumb("wishlist", "Moved entry to cart", Some(&[("item_id", id.as_str())]));
            tracing::info!(%item_id, "Moved wishlist entry to cart");

            Ok(Json(MoveToCartView {
                moved,
                wishlist: WishlistView::build(&wishlist, state.currency()),
            }))
        }
        MoveToCart::OutOfStock => {
            tracing::info!(%item_id, "Refused to move out-of-stock entry");
            Err(AppError::Conflict("Item is out of stock".to_string()))
        }
        MoveToCart::NotFound => Err(AppError::NotFound(format!("wishlist item {item_id}"))),
    }
}
