//! The checkout-to-payment handoff record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cart::Cart;

/// Point-in-time copy of the cart and the shipping form.
///
/// Written once when the checkout form is accepted and read by the payment
/// page. Persisted as `{ "customer": {...}, "items": [...], "total": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// Shipping form fields as submitted, keyed by field name.
    pub customer: BTreeMap<String, String>,
    /// Cart contents at submission time.
    pub items: Cart,
    /// The total exactly as it was displayed on the checkout page.
    pub total: String,
}

impl OrderSnapshot {
    /// Capture the current cart and form fields.
    #[must_use]
    pub fn capture(customer: BTreeMap<String, String>, cart: &Cart, total: String) -> Self {
        Self {
            customer,
            items: cart.clone(),
            total,
        }
    }
}
