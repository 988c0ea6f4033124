//! Cart quote command.
//!
//! # Usage
//!
//! ```bash
//! shopfront-cli quote cart.json --shipping 5.99 --tax-rate 0.10
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPFRONT_SHIPPING_FLAT` - Default for `--shipping`
//! - `SHOPFRONT_TAX_RATE` - Default for `--tax-rate`

use std::fmt::Write as _;
use std::path::Path;

use rust_decimal::Decimal;
use shopfront_core::{Cart, CartTotals, CurrencyCode, Money, PricingPolicy};

use super::{CommandError, load_json};

/// A priced cart.
#[derive(Debug)]
pub struct Quote {
    pub cart: Cart,
    pub totals: CartTotals,
}

/// Load a cart file and price it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the tax rate is
/// negative, or the totals overflow.
pub fn run(path: &Path, shipping: Money, tax_rate: Decimal) -> Result<Quote, CommandError> {
    let cart: Cart = load_json(path)?;
    tracing::debug!(path = %path.display(), lines = cart.len(), "Loaded cart");

    price(cart, shipping, tax_rate)
}

fn price(cart: Cart, shipping: Money, tax_rate: Decimal) -> Result<Quote, CommandError> {
    let policy = PricingPolicy::new(shipping, tax_rate)?;
    let totals = cart.totals(&policy)?;
    Ok(Quote { cart, totals })
}

impl Quote {
    /// Human-readable receipt with amounts rounded for display.
    #[must_use]
    pub fn render(&self, currency: CurrencyCode) -> String {
        let mut out = String::new();

        if self.cart.is_empty() {
            out.push_str("Cart is empty\n");
        }

        for line in self.cart.lines() {
            let line_price = line
                .line_total()
                .map_or_else(|| "overflow".to_string(), |total| total.display(currency));
            let _ = writeln!(
                out,
                "{:>4} x {:<32} {:>12}",
                line.quantity(),
                line.display_name,
                line_price
            );
        }

        let rows = [
            ("Subtotal", self.totals.subtotal),
            ("Shipping", self.totals.shipping),
            ("Tax", self.totals.tax),
            ("Total", self.totals.total),
        ];
        for (label, amount) in rows {
            let _ = writeln!(out, "{label:<39} {:>12}", amount.display(currency));
        }

        out.trim_end().to_string()
    }

    /// Exact, unrounded totals as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CommandError> {
        serde_json::to_string_pretty(&self.totals).map_err(CommandError::Output)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::parse_json;

    const CART: &str = r#"[
        {"item_id": 1, "display_name": "Wireless Headphones", "unit_price": "99.99", "quantity": 2},
        {"item_id": 2, "display_name": "Smart Watch", "unit_price": "199.99", "quantity": 1},
        {"item_id": 3, "display_name": "Laptop Stand", "unit_price": "59.99", "quantity": 1}
    ]"#;

    fn default_quote(json: &str) -> Quote {
        let cart: Cart = parse_json(Path::new("cart.json"), json).unwrap();
        price(cart, Money::from_cents(599), Decimal::new(10, 2)).unwrap()
    }

    #[test]
    fn test_quote_totals() {
        let quote = default_quote(CART);
        assert_eq!(quote.totals.subtotal.amount(), Decimal::new(45_996, 2));
        assert_eq!(quote.totals.tax.amount(), Decimal::new(45_996, 3));
        assert_eq!(quote.totals.total.amount(), Decimal::new(511_946, 3));
    }

    #[test]
    fn test_render_rounds_amounts() {
        let report = default_quote(CART).render(CurrencyCode::USD);
        assert!(report.contains("Wireless Headphones"));
        assert!(report.contains("$199.98"));
        assert!(report.contains("$46.00"));
        assert!(report.lines().last().unwrap().ends_with("$511.95"));
    }

    #[test]
    fn test_render_empty_cart_still_charges_shipping() {
        let report = default_quote("[]").render(CurrencyCode::USD);
        assert!(report.starts_with("Cart is empty"));
        assert!(report.lines().last().unwrap().ends_with("$5.99"));
    }

    #[test]
    fn test_to_json_keeps_exact_amounts() {
        let json = default_quote(CART).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let exact = |key: &str| value[key].as_str().unwrap().parse::<Decimal>().unwrap();
        assert_eq!(exact("tax"), Decimal::new(45_996, 3));
        assert_eq!(exact("total"), Decimal::new(511_946, 3));
    }

    #[test]
    fn test_negative_tax_rate_is_rejected() {
        let cart: Cart = parse_json(Path::new("cart.json"), CART).unwrap();
        let err = price(cart, Money::from_cents(599), Decimal::new(-1, 2)).unwrap_err();
        assert!(matches!(err, CommandError::Pricing(_)));
    }

    #[test]
    fn test_zero_quantity_line_is_a_parse_error() {
        let json = r#"[{"item_id": 1, "display_name": "Mug", "unit_price": "9.99", "quantity": 0}]"#;
        let err = parse_json::<Cart>(Path::new("cart.json"), json).unwrap_err();
        assert!(matches!(err, CommandError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = run(Path::new("/nonexistent/cart.json"), Money::ZERO, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, CommandError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/cart.json"));
    }
}
