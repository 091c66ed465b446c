//! Page operations for the storefront.
//!
//! # Services
//!
//! - `cart` - Cart store and mutators (listing and cart pages)
//! - `checkout` - Shipping form handoff and payment confirmation
//! - `contact` - Support form submission to the form-intake service

pub mod cart;
pub mod checkout;
pub mod contact;

pub use cart::{CartService, CartStore};
pub use checkout::{
    CheckoutError, CheckoutPage, CheckoutService, OrderConfirmation, OrderStore, PaymentError,
};
pub use contact::{
    ContactClient, ContactError, ContactForm, StatusKind, StatusMessage, SubmitControl,
};
