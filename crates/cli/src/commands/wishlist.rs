//! Wishlist summary command.

use std::fmt::Write as _;
use std::path::Path;

use shopfront_core::{CurrencyCode, Wishlist};

use super::{CommandError, load_json};

/// A loaded wishlist ready to print.
#[derive(Debug)]
pub struct Summary {
    pub wishlist: Wishlist,
}

/// Load a wishlist file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn run(path: &Path) -> Result<Summary, CommandError> {
    let wishlist: Wishlist = load_json(path)?;
    tracing::debug!(path = %path.display(), entries = wishlist.count(), "Loaded wishlist");
    Ok(Summary { wishlist })
}

impl Summary {
    /// One row per entry followed by the count.
    #[must_use]
    pub fn render(&self, currency: CurrencyCode) -> String {
        let mut out = String::new();

        for entry in self.wishlist.entries() {
            let liked = if entry.liked { "\u{2665}" } else { " " };
            let stock = if entry.in_stock { "in stock" } else { "out of stock" };
            let _ = writeln!(
                out,
                "{liked} {:<32} {:>12}  {stock}",
                entry.display_name,
                entry.unit_price.display(currency)
            );
        }

        out.push_str(&self.wishlist.count_label());
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::parse_json;

    fn summary(json: &str) -> Summary {
        Summary {
            wishlist: parse_json(Path::new("wishlist.json"), json).unwrap(),
        }
    }

    #[test]
    fn test_render_entries() {
        let report = summary(
            r#"[
                {"item_id": 4, "display_name": "Desk Lamp", "unit_price": "39.5", "in_stock": true, "liked": true},
                {"item_id": 5, "display_name": "Office Chair", "unit_price": "249.99", "in_stock": false}
            ]"#,
        )
        .render(CurrencyCode::USD);

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('\u{2665}'));
        assert!(lines[0].contains("$39.50"));
        assert!(lines[1].ends_with("out of stock"));
        assert_eq!(lines[2], "2 items");
    }

    #[test]
    fn test_render_single_entry_label() {
        let report = summary(
            r#"[{"item_id": 4, "display_name": "Desk Lamp", "unit_price": "39.50", "in_stock": true}]"#,
        )
        .render(CurrencyCode::EUR);
        assert!(report.contains("\u{20ac}39.50"));
        assert!(report.ends_with("1 item"));
    }

    #[test]
    fn test_duplicate_entries_are_a_parse_error() {
        let json = r#"[
            {"item_id": 4, "display_name": "Desk Lamp", "unit_price": "39.50", "in_stock": true},
            {"item_id": 4, "display_name": "Desk Lamp", "unit_price": "39.50", "in_stock": true}
        ]"#;
        let err = parse_json::<Wishlist>(Path::new("wishlist.json"), json).unwrap_err();
        assert!(matches!(err, CommandError::Parse { .. }));
    }
}
