//! View-models for the cart, checkout and payment pages.
//!
//! Every view is a pure projection of a [`Cart`] (or [`OrderSnapshot`]) plus
//! [`Pricing`]; nothing here touches storage. Amounts are pre-formatted so a
//! template only has to place strings.

use viki_core::{Cart, LineItem, OrderSnapshot};

use crate::pricing::Pricing;

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart page display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Project a cart for the cart page.
    ///
    /// An empty cart still shows the shipping fee as its total.
    #[must_use]
    pub fn project(cart: &Cart, pricing: &Pricing) -> Self {
        let totals = pricing.totals(cart);
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::project(item, pricing))
                .collect(),
            subtotal: pricing.format(totals.subtotal),
            total: pricing.format(totals.total),
            item_count: cart.item_count(),
        }
    }

    /// Whether to show the "your cart is empty" message instead of lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CartItemView {
    fn project(item: &LineItem, pricing: &Pricing) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: pricing.format(item.price),
            line_price: pricing.format(item.line_total()),
        }
    }
}

/// Header cart count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartBadge {
    pub count: u32,
}

impl From<&Cart> for CartBadge {
    fn from(cart: &Cart) -> Self {
        Self {
            count: cart.item_count(),
        }
    }
}

/// One line of the checkout order summary, e.g. `Ankara Dress (x2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLine {
    pub name: String,
    pub quantity: u32,
    pub line_price: String,
}

impl ReviewLine {
    /// `name (xN)` as shown on the summary.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} (x{})", self.name, self.quantity)
    }
}

/// Checkout page order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReview {
    pub lines: Vec<ReviewLine>,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

impl CheckoutReview {
    #[must_use]
    pub fn project(cart: &Cart, pricing: &Pricing) -> Self {
        let totals = pricing.totals(cart);
        Self {
            lines: cart
                .items()
                .iter()
                .map(|item| ReviewLine {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    line_price: pricing.format(item.line_total()),
                })
                .collect(),
            subtotal: pricing.format(totals.subtotal),
            shipping: pricing.format(totals.shipping),
            total: pricing.format(totals.total),
        }
    }
}

/// Payment page display data.
///
/// The order snapshot is best effort; a visitor who lands on the payment
/// page directly has none, and the page falls back to live cart totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentView {
    /// Shipping details as submitted, in field-name order.
    pub customer: Vec<(String, String)>,
    pub total: String,
    pub item_count: u32,
    /// Whether the figures came from a checkout snapshot.
    pub from_snapshot: bool,
}

impl PaymentView {
    #[must_use]
    pub fn project(snapshot: Option<&OrderSnapshot>, cart: &Cart, pricing: &Pricing) -> Self {
        match snapshot {
            Some(order) => Self {
                customer: order
                    .customer
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                total: order.total.clone(),
                item_count: order.items.item_count(),
                from_snapshot: true,
            },
            None => Self {
                customer: Vec::new(),
                total: pricing.format(pricing.totals(cart).total),
                item_count: cart.item_count(),
                from_snapshot: false,
            },
        }
    }
}
