//! Wishlist entries and the saved-items list.
//!
//! Moving an entry to the cart only takes it off the wishlist and hands it
//! back to the caller. Turning it into a [`CartLine`](crate::CartLine) is left
//! to whoever owns both lists.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ItemId, Money};

/// Errors that can occur when building a wishlist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WishlistError {
    #[error("duplicate wishlist entry for item {0}")]
    DuplicateItem(ItemId),
}

/// Outcome of [`Wishlist::move_to_cart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveToCart {
    /// The entry was removed from the wishlist and is handed back.
    Moved(WishlistEntry),
    /// The entry is out of stock and stays where it is.
    OutOfStock,
    /// No entry exists for the item.
    NotFound,
}

/// One saved product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub item_id: ItemId,
    pub display_name: String,
    pub unit_price: Money,
    pub in_stock: bool,
    #[serde(default)]
    pub liked: bool,
}

impl WishlistEntry {
    /// Create an entry that is not liked yet.
    #[must_use]
    pub fn new(
        item_id: ItemId,
        display_name: impl Into<String>,
        unit_price: Money,
        in_stock: bool,
    ) -> Self {
        Self {
            item_id,
            display_name: display_name.into(),
            unit_price,
            in_stock,
            liked: false,
        }
    }
}

/// Saved items in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WishlistEntry>", into = "Vec<WishlistEntry>")]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Save an entry.
    ///
    /// Returns `false` and leaves the wishlist untouched if the item is
    /// already saved.
    pub fn add(&mut self, entry: WishlistEntry) -> bool {
        if self.get(entry.item_id).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove the entry for an item. Removing an unknown item is a no-op.
    pub fn remove(&mut self, item_id: ItemId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|e| e.item_id != item_id);
        self.entries.len() < len_before
    }

    /// Flip the liked flag and return its new value.
    pub fn toggle_liked(&mut self, item_id: ItemId) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.item_id == item_id)?;
        entry.liked = !entry.liked;
        Some(entry.liked)
    }

    /// Take an in-stock entry off the wishlist.
    pub fn move_to_cart(&mut self, item_id: ItemId) -> MoveToCart {
        let Some(index) = self.entries.iter().position(|e| e.item_id == item_id) else {
            return MoveToCart::NotFound;
        };

        if self.entries.get(index).is_some_and(|e| !e.in_stock) {
            return MoveToCart::OutOfStock;
        }

        MoveToCart::Moved(self.entries.remove(index))
    }

    /// Number of saved entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Pluralized entry count, e.g. "1 item" or "3 items".
    #[must_use]
    pub fn count_label(&self) -> String {
        match self.count() {
            1 => "1 item".to_string(),
            n => format!("{n} items"),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, item_id: ItemId) -> Option<&WishlistEntry> {
        self.entries.iter().find(|e| e.item_id == item_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<WishlistEntry>> for Wishlist {
    type Error = WishlistError;

    fn try_from(entries: Vec<WishlistEntry>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(entries.len());
        if let Some(entry) = entries.iter().find(|entry| !seen.insert(entry.item_id)) {
            return Err(WishlistError::DuplicateItem(entry.item_id));
        }
        Ok(Self { entries })
    }
}

impl From<Wishlist> for Vec<WishlistEntry> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.entries
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(id: i32, in_stock: bool) -> WishlistEntry {
        WishlistEntry::new(ItemId::new(id), format!("Item {id}"), Money::from_cents(4999), in_stock)
    }

    fn sample() -> Wishlist {
        Wishlist::try_from(vec![entry(1, true), entry(2, false), entry(3, true)]).unwrap()
    }

    fn ids(wishlist: &Wishlist) -> Vec<i32> {
        wishlist.entries().iter().map(|e| e.item_id.as_i32()).collect()
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut wishlist = sample();
        assert!(!wishlist.add(entry(1, false)));
        assert!(wishlist.get(ItemId::new(1)).unwrap().in_stock);
        assert_eq!(wishlist.count(), 3);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut wishlist = sample();
        let before = wishlist.clone();
        assert!(!wishlist.remove(ItemId::new(8)));
        assert_eq!(wishlist, before);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut wishlist = sample();
        assert!(wishlist.remove(ItemId::new(1)));
        assert_eq!(ids(&wishlist), vec![2, 3]);
    }

    #[test]
    fn test_toggle_liked_twice_restores() {
        let mut wishlist = sample();
        let before = wishlist.get(ItemId::new(3)).unwrap().clone();

        assert_eq!(wishlist.toggle_liked(ItemId::new(3)), Some(true));
        assert_eq!(wishlist.toggle_liked(ItemId::new(3)), Some(false));
        assert_eq!(wishlist.get(ItemId::new(3)).unwrap(), &before);
    }

    #[test]
    fn test_toggle_liked_changes_only_liked() {
        let mut wishlist = sample();
        wishlist.toggle_liked(ItemId::new(2));
        let toggled = wishlist.get(ItemId::new(2)).unwrap();
        assert!(toggled.liked);
        assert!(!toggled.in_stock);
        assert_eq!(toggled.unit_price, Money::from_cents(4999));
        assert_eq!(ids(&wishlist), vec![1, 2, 3]);
    }

    #[test]
    fn test_toggle_liked_unknown() {
        assert_eq!(sample().toggle_liked(ItemId::new(10)), None);
    }

    #[test]
    fn test_move_to_cart_removes_in_stock_entry() {
        let mut wishlist = sample();
        let outcome = wishlist.move_to_cart(ItemId::new(3));
        assert_eq!(outcome, MoveToCart::Moved(entry(3, true)));
        assert_eq!(ids(&wishlist), vec![1, 2]);
    }

    #[test]
    fn test_move_to_cart_out_of_stock_is_rejected() {
        let mut wishlist = sample();
        let before = wishlist.clone();
        assert_eq!(wishlist.move_to_cart(ItemId::new(2)), MoveToCart::OutOfStock);
        assert_eq!(wishlist, before);
    }

    #[test]
    fn test_move_to_cart_unknown() {
        assert_eq!(sample().move_to_cart(ItemId::new(5)), MoveToCart::NotFound);
    }

    #[test]
    fn test_count_label() {
        let mut wishlist = Wishlist::new();
        assert_eq!(wishlist.count_label(), "0 items");
        wishlist.add(entry(1, true));
        assert_eq!(wishlist.count_label(), "1 item");
        wishlist.add(entry(2, true));
        assert_eq!(wishlist.count_label(), "2 items");
    }

    #[test]
    fn test_deserialize_defaults_liked_and_rejects_duplicates() {
        let json = r#"[{"item_id": 4, "display_name": "Lamp", "unit_price": "19.50", "in_stock": true}]"#;
        let wishlist: Wishlist = serde_json::from_str(json).unwrap();
        assert!(!wishlist.get(ItemId::new(4)).unwrap().liked);

        let dup = r#"[
            {"item_id": 4, "display_name": "Lamp", "unit_price": "19.50", "in_stock": true},
            {"item_id": 4, "display_name": "Lamp", "unit_price": "19.50", "in_stock": false}
        ]"#;
        assert!(serde_json::from_str::<Wishlist>(dup).is_err());
    }

    #[test]
    fn test_try_from_large_list_keeps_order_and_finds_late_duplicate() {
        let entries: Vec<WishlistEntry> = (0..50_000).map(|id| entry(id, true)).collect();
        let wishlist = Wishlist::try_from(entries.clone()).unwrap();
        assert_eq!(wishlist.count(), 50_000);
        assert_eq!(wishlist.entries().last().unwrap().item_id, ItemId::new(49_999));

        let mut with_dup = entries;
        with_dup.push(entry(0, false));
        assert_eq!(
            Wishlist::try_from(with_dup).unwrap_err(),
            WishlistError::DuplicateItem(ItemId::new(0))
        );
    }
}
