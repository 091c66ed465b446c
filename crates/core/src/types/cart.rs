//! The shopping cart and its totals.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s, in the order they were
//! first added. Two invariants hold for every value of the type:
//!
//! - at most one line item per [`ProductId`]
//! - every quantity is at least 1
//!
//! Mutators that would push a quantity to zero or below remove the line
//! instead. Data read back from storage goes through the same normalization,
//! so a hand-edited or drifted persisted cart cannot smuggle in duplicates.
//!
//! Totals are always recomputed from the full list of items.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::line_item::{LineItem, ProductCandidate};
use super::price::MinorUnits;

/// Ordered, deduplicated collection of line items.
///
/// Serialized as a plain JSON array of line items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

/// Subtotal, shipping and total for a cart, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: MinorUnits,
    pub shipping: MinorUnits,
    pub total: MinorUnits,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from arbitrary items, restoring the invariants.
    ///
    /// Items with quantity 0 are dropped. Repeated ids are merged into the
    /// first occurrence, summing quantities.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.position(&item.id) {
                Some(index) => {
                    if let Some(existing) = cart.items.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity);
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Find a line item by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities, as shown on the header badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line for the same id, otherwise appends a new
    /// line with quantity 1. Returns the line's new quantity.
    pub fn add_item(&mut self, candidate: ProductCandidate) -> u32 {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == candidate.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }
        self.items.push(candidate.into_line_item());
        1
    }

    /// Set a line's quantity.
    ///
    /// A quantity below 1 removes the line. Returns `false` without touching
    /// the cart when `id` is not present.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if quantity < 1 {
            self.items.remove(index);
        } else if let Some(item) = self.items.get_mut(index) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        true
    }

    /// Adjust a line's quantity by `delta`, which may be negative.
    ///
    /// A resulting quantity of 0 or less removes the line. Returns `false`
    /// without touching the cart when `id` is not present.
    pub fn increment_quantity(&mut self, id: &ProductId, delta: i64) -> bool {
        let Some(current) = self.get(id).map(|item| i64::from(item.quantity)) else {
            return false;
        };
        self.set_quantity(id, current.saturating_add(delta))
    }

    /// Drop the line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// `Σ price × quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> MinorUnits {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Subtotal plus a flat shipping fee.
    ///
    /// Shipping is charged even on an empty cart; the cart page shows the
    /// fee as the base total.
    #[must_use]
    pub fn total(&self, shipping: MinorUnits) -> MinorUnits {
        self.subtotal() + shipping
    }

    /// All three figures at once.
    #[must_use]
    pub fn totals(&self, shipping: MinorUnits) -> Totals {
        let subtotal = self.subtotal();
        Totals {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = core::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const SHIPPING: MinorUnits = MinorUnits::new(500_000);

    fn candidate(id: &str, price: i64) -> ProductCandidate {
        ProductCandidate::new(id, format!("Product {id}"), MinorUnits::new(price), "")
    }

    fn quantities(cart: &Cart) -> Vec<(&str, u32)> {
        cart.items()
            .iter()
            .map(|item| (item.id.as_str(), item.quantity))
            .collect()
    }

    #[test]
    fn test_repeated_adds_count_per_id() {
        let mut cart = Cart::new();
        for id in ["a", "b", "a", "c", "a", "b"] {
            cart.add_item(candidate(id, 100));
        }

        assert_eq!(quantities(&cart), vec![("a", 3), ("b", 2), ("c", 1)]);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_add_twice_totals() {
        let mut cart = Cart::new();
        cart.add_item(candidate("a", 480_000));
        assert_eq!(cart.add_item(candidate("a", 480_000)), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].price, MinorUnits::new(480_000));
        assert_eq!(cart.subtotal(), MinorUnits::new(960_000));
        assert_eq!(cart.total(SHIPPING), MinorUnits::new(1_460_000));
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::new();
        let totals = cart.totals(SHIPPING);
        assert_eq!(totals.subtotal, MinorUnits::ZERO);
        assert_eq!(totals.total, SHIPPING);
    }

    #[test]
    fn test_totals_are_pure() {
        let mut cart = Cart::new();
        cart.add_item(candidate("a", 1_250));
        cart.add_item(candidate("b", 999));
        cart.set_quantity(&ProductId::from("b"), 4);

        let first = cart.totals(SHIPPING);
        let second = cart.totals(SHIPPING);
        assert_eq!(first, second);
        assert_eq!(first.subtotal, MinorUnits::new(1_250 + 4 * 999));
        assert_eq!(
            first.total.as_i64() - first.subtotal.as_i64(),
            SHIPPING.as_i64()
        );
    }

    #[test]
    fn test_set_quantity_zero_matches_remove() {
        let mut start = Cart::new();
        start.add_item(candidate("a", 100));
        start.add_item(candidate("b", 200));

        let mut by_set = start.clone();
        assert!(by_set.set_quantity(&ProductId::from("a"), 0));

        let mut by_remove = start;
        assert!(by_remove.remove_item(&ProductId::from("a")));

        assert_eq!(by_set, by_remove);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(candidate("a", 100));
        let before = cart.clone();

        assert!(!cart.set_quantity(&ProductId::from("zzz"), 5));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut cart = Cart::new();
        cart.add_item(candidate("a", 100));
        cart.add_item(candidate("b", 200));
        cart.add_item(candidate("c", 300));

        cart.remove_item(&ProductId::from("a"));
        assert_eq!(quantities(&cart), vec![("b", 1), ("c", 1)]);

        assert!(!cart.remove_item(&ProductId::from("a")));
    }

    #[test]
    fn test_increment_below_zero_removes() {
        let mut cart = Cart::new();
        cart.add_item(candidate("a", 100));
        cart.add_item(candidate("a", 100));

        assert!(cart.increment_quantity(&ProductId::from("a"), -5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_adjusts_and_ignores_unknown() {
        let mut cart = Cart::new();
        cart.add_item(candidate("a", 100));

        assert!(cart.increment_quantity(&ProductId::from("a"), 2));
        assert_eq!(cart.items()[0].quantity, 3);

        assert!(!cart.increment_quantity(&ProductId::from("b"), 1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_from_items_normalizes() {
        let mut a = candidate("a", 100).into_line_item();
        a.quantity = 2;
        let mut zero = candidate("z", 100).into_line_item();
        zero.quantity = 0;
        let b = candidate("b", 100).into_line_item();
        let mut a_again = candidate("a", 100).into_line_item();
        a_again.quantity = 3;

        let cart = Cart::from_items(vec![a, zero, b, a_again]);
        assert_eq!(quantities(&cart), vec![("a", 5), ("b", 1)]);
    }

    #[test]
    fn test_json_is_plain_array() {
        let mut cart = Cart::new();
        cart.add_item(candidate("a", 480_000));

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));

        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(candidate("a", 100));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
