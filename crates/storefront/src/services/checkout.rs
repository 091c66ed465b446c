//! Checkout and payment handoff.
//!
//! The checkout page captures shipping details and writes an
//! [`OrderSnapshot`] to the `vikiOrder` slot before moving on to the payment
//! page. The payment page is an honor-system confirmation: pressing confirm
//! clears the cart and returns to the landing page. No payment is verified.
//!
//! The snapshot is best effort. Nothing ties it to the cart transactionally,
//! and a second window can overwrite either slot in between.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use viki_core::{Cart, Email, EmailError, OrderSnapshot};

use crate::events::CartEvent;
use crate::page::Page;
use crate::pricing::Pricing;
use crate::services::cart::CartStore;
use crate::storage::{SharedStorage, StorageError, keys};
use crate::views::{CheckoutReview, PaymentView};

/// Shipping form fields that must be filled in.
pub const REQUIRED_SHIPPING_FIELDS: &[&str] = &["name", "email", "phone", "address"];

/// Shown after a confirmed payment.
pub const PAYMENT_CONFIRMED_MESSAGE: &str =
    "Payment confirmed! Thank you for shopping with us. Your order is being processed.";

/// Errors from submitting the shipping form.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was submitted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// A required field was blank or absent.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The email field did not parse.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The snapshot could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CheckoutError {
    /// Message to show on the checkout page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => {
                "Your cart is empty. Please add items before checking out.".to_string()
            }
            Self::MissingField(field) => format!("Please fill in your {field}."),
            Self::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
            Self::Storage(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Errors from confirming payment.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Payment was confirmed with nothing in the cart.
    #[error("Cannot confirm payment for an empty cart")]
    EmptyCart,

    /// The cart could not be cleared.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl PaymentError {
    /// Message to show on the payment page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => {
                "Your cart is empty. Please browse our products to place an order.".to_string()
            }
            Self::Storage(_) => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Where to send the visitor instead, if anywhere.
    #[must_use]
    pub const fn redirect(&self) -> Option<Page> {
        match self {
            Self::EmptyCart => Some(Page::Products),
            Self::Storage(_) => None,
        }
    }
}

/// What the checkout page should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutPage {
    /// Order summary for a non-empty cart.
    Review(CheckoutReview),
    /// Nothing to check out; go elsewhere.
    Redirect(Page),
}

/// Result of a confirmed payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Reference to quote in follow-up correspondence.
    pub reference: Uuid,
    pub confirmed_at: DateTime<Utc>,
    /// Total as shown on the checkout page, or recomputed if no snapshot.
    pub total: String,
    pub message: &'static str,
    pub next: Page,
}

/// Reads and writes the `vikiOrder` slot.
#[derive(Clone)]
pub struct OrderStore {
    storage: SharedStorage,
}

impl OrderStore {
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Load the snapshot, if one exists and parses.
    #[must_use]
    pub fn load(&self) -> Option<OrderSnapshot> {
        let raw = match self.storage.get_item(keys::ORDER) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Failed to read order snapshot");
                return None;
            }
        };
        serde_json::from_str(&raw)
            .inspect_err(|e| warn!(error = %e, "Discarding malformed order snapshot"))
            .ok()
    }

    /// Overwrite the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be encoded or written.
    pub fn save(&self, snapshot: &OrderSnapshot) -> Result<(), StorageError> {
        let json = serde_json::to_string(snapshot).map_err(|source| StorageError::Encode {
            key: keys::ORDER.to_owned(),
            source,
        })?;
        self.storage.set_item(keys::ORDER, &json)
    }

    /// Delete the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(keys::ORDER)
    }
}

/// Checkout and payment page operations.
#[derive(Clone)]
pub struct CheckoutService {
    carts: CartStore,
    orders: OrderStore,
    pricing: Pricing,
}

impl CheckoutService {
    #[must_use]
    pub const fn new(carts: CartStore, orders: OrderStore, pricing: Pricing) -> Self {
        Self {
            carts,
            orders,
            pricing,
        }
    }

    /// The checkout page's order summary, or a redirect back to the cart.
    #[must_use]
    pub fn review(&self) -> CheckoutPage {
        let cart = self.carts.load();
        if cart.is_empty() {
            return CheckoutPage::Redirect(Page::Cart);
        }
        CheckoutPage::Review(CheckoutReview::project(&cart, &self.pricing))
    }

    /// Accept the shipping form and hand the order to the payment page.
    ///
    /// Field values are trimmed before they are stored.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::EmptyCart` if the cart has no items
    /// - `CheckoutError::MissingField` / `InvalidEmail` if the form is invalid
    /// - `CheckoutError::Storage` if the cart cannot be read or the snapshot
    ///   cannot be written
    #[instrument(skip(self, fields), fields(field_count = fields.len()))]
    pub fn submit_shipping_details(
        &self,
        fields: BTreeMap<String, String>,
    ) -> Result<Page, CheckoutError> {
        let cart = self.carts.try_load()?;
        if cart.is_empty() {
            warn!("Checkout submitted with empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        let customer = validate_shipping_fields(fields)?;
        let total = self.pricing.format(self.pricing.totals(&cart).total);
        let snapshot = OrderSnapshot::capture(customer, &cart, total);
        self.orders.save(&snapshot)?;

        info!(
            lines = snapshot.items.len(),
            total = %snapshot.total,
            "Order details stored, continuing to payment"
        );
        Ok(Page::Payment)
    }

    /// The stored order snapshot, if any.
    #[must_use]
    pub fn order_snapshot(&self) -> Option<OrderSnapshot> {
        self.orders.load()
    }

    /// The payment page's summary.
    #[must_use]
    pub fn payment_view(&self) -> PaymentView {
        let snapshot = self.orders.load();
        PaymentView::project(snapshot.as_ref(), &self.carts.load(), &self.pricing)
    }

    /// Confirm payment and close out the order.
    ///
    /// Clears the cart and the order snapshot.
    ///
    /// # Errors
    ///
    /// - `PaymentError::EmptyCart` if there is nothing to pay for; the
    ///   visitor should be sent to [`PaymentError::redirect`]
    /// - `PaymentError::Storage` if the cart cannot be read or cleared
    #[instrument(skip(self))]
    pub fn confirm_payment(&self) -> Result<OrderConfirmation, PaymentError> {
        let cart = self.carts.try_load()?;
        if cart.is_empty() {
            warn!("Payment confirmed with empty cart");
            return Err(PaymentError::EmptyCart);
        }

        let total = self.orders.load().map_or_else(
            || self.pricing.format(self.pricing.totals(&cart).total),
            |snapshot| snapshot.total,
        );

        self.carts.save(&Cart::new())?;
        self.carts.events().emit(&CartEvent::Cleared);
        if let Err(e) = self.orders.clear() {
            warn!(error = %e, "Failed to remove order snapshot after payment");
        }

        let confirmation = OrderConfirmation {
            reference: Uuid::new_v4(),
            confirmed_at: Utc::now(),
            total,
            message: PAYMENT_CONFIRMED_MESSAGE,
            next: Page::Home,
        };
        info!(
            reference = %confirmation.reference,
            total = %confirmation.total,
            lines = cart.len(),
            "Order placed"
        );
        Ok(confirmation)
    }
}

/// Check required fields and the email; returns trimmed fields.
fn validate_shipping_fields(
    fields: BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, CheckoutError> {
    let customer: BTreeMap<String, String> = fields
        .into_iter()
        .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
        .collect();

    for field in REQUIRED_SHIPPING_FIELDS {
        if customer.get(*field).is_none_or(String::is_empty) {
            return Err(CheckoutError::MissingField((*field).to_owned()));
        }
    }
    if let Some(email) = customer.get("email") {
        Email::parse(email)?;
    }

    Ok(customer)
}
