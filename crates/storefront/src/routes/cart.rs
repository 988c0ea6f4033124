//! Cart route handlers.
//!
//! Every mutation loads the cart from the session, applies one intent,
//! stores it back and answers with the refreshed [`CartView`]. Quantity
//! changes below one and removals of unknown items are silent no-ops: they
//! return the unchanged view with `200 OK`.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{Cart, CartLine, CartTotals, CurrencyCode, ItemId, Money, QuantityChange};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::Shopper;
use crate::state::AppState;

/// An amount shown to the shopper, with the exact value alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountView {
    /// Rounded and formatted, e.g. "$621.95".
    pub display: String,
    /// Unrounded decimal.
    pub exact: Decimal,
}

impl AmountView {
    fn new(money: Money, currency: CurrencyCode) -> Self {
        Self {
            display: money.display(currency),
            exact: money.amount(),
        }
    }
}

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineView {
    pub item_id: ItemId,
    pub display_name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
}

/// Order pricing breakdown display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsView {
    pub subtotal: AmountView,
    pub shipping: AmountView,
    pub tax: AmountView,
    pub total: AmountView,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
    pub is_empty: bool,
    pub currency: String,
    pub totals: TotalsView,
}

impl CartView {
    /// Build the view for a cart, pricing it with the configured policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the totals overflow.
    pub fn build(cart: &Cart, state: &AppState) -> Result<Self> {
        let currency = state.currency();
        let totals: CartTotals = cart.totals(state.pricing())?;

        let lines = cart
            .lines()
            .iter()
            .map(|line| CartLineView::build(line, currency))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            lines,
            item_count: cart.item_count(),
            is_empty: cart.is_empty(),
            currency: currency.code().to_string(),
            totals: TotalsView {
                subtotal: AmountView::new(totals.subtotal, currency),
                shipping: AmountView::new(totals.shipping, currency),
                tax: AmountView::new(totals.tax, currency),
                total: AmountView::new(totals.total, currency),
            },
        })
    }
}

impl CartLineView {
    fn build(line: &CartLine, currency: CurrencyCode) -> Result<Self> {
        let line_total = line
            .line_total()
            .ok_or(shopfront_core::PricingError::Overflow)?;
        Ok(Self {
            item_id: line.item_id,
            display_name: line.display_name.clone(),
            quantity: line.quantity(),
            unit_price: line.unit_price.display(currency),
            line_price: line_total.display(currency),
        })
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub item_id: ItemId,
    pub display_name: String,
    pub unit_price: Money,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
///
/// Signed so that negative input reaches the cart and is rejected there.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// Display the cart.
#[instrument(skip(state, shopper))]
pub async fn show(State(state): State<AppState>, shopper: Shopper) -> Result<Json<CartView>> {
    let cart = shopper.cart().await?;
    Ok(Json(CartView::build(&cart, &state)?))
}

/// Add a line to the cart, merging with an existing line for the same item.
#[instrument(skip(state, shopper, payload))]
pub async fn add(
    State(state): State<AppState>,
    shopper: Shopper,
    payload: std::result::Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(form) = payload?;
    let line = CartLine::new(
        form.item_id,
        form.display_name,
        form.unit_price,
        form.quantity.unwrap_or(1),
    )?;

    let mut cart = shopper.cart().await?;
    cart.add(line)?;
    shopper.save_cart(&cart).await?;

    let item_id = form.item_id.to_string();
    add_breadcrumb("cart", "Added line", Some(&[("item_id", item_id.as_str())]));
    tracing::info!(item_id = %form.item_id, lines = cart.len(), "Added cart line");

    Ok(Json(CartView::build(&cart, &state)?))
}

/// Change the quantity of a line.
#[instrument(skip(state, shopper, payload))]
pub async fn update(
    State(state): State<AppState>,
    shopper: Shopper,
    path: std::result::Result<Path<ItemId>, PathRejection>,
    payload: std::result::Result<Json<UpdateQuantityRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Path(item_id) = path?;
    let Json(form) = payload?;
    let mut cart = shopper.cart().await?;

    match cart.set_quantity(item_id, form.quantity) {
        QuantityChange::Applied => {
            shopper.save_cart(&cart).await?;
            tracing::info!(%item_id, quantity = form.quantity, "Updated cart quantity");
        }
        QuantityChange::Rejected => {
            tracing::debug!(%item_id, quantity = form.quantity, "Ignored out-of-range quantity");
        }
        QuantityChange::NotFound => {
            tracing::debug!(%item_id, "Ignored quantity change for missing line");
        }
    }

    Ok(Json(CartView::build(&cart, &state)?))
}

/// Remove a line from the cart.
#[instrument(skip(state, shopper))]
pub async fn remove(
    State(state): State<AppState>,
    shopper: Shopper,
    path: std::result::Result<Path<ItemId>, PathRejection>,
) -> Result<Json<CartView>> {
    let Path(item_id) = path?;
    let mut cart = shopper.cart().await?;

    if cart.remove(item_id) {
        shopper.save_cart(&cart).await?;
        let id = item_id.to_string();
        add_breadcrumb("cart", "Removed line", Some(&[("item_id", id.as_str())]));
        tracing::info!(%item_id, lines = cart.len(), "Removed cart line");
    } else {
        tracing::debug!(%item_id, "Ignored removal of missing line");
    }

    Ok(Json(CartView::build(&cart, &state)?))
}
