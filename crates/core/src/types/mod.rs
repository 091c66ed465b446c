//! Core types for the Viki storefront.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod email;
pub mod id;
pub mod line_item;
pub mod order;
pub mod price;

pub use cart::{Cart, Totals};
pub use email::{Email, EmailError};
pub use id::ProductId;
pub use line_item::{LineItem, ProductCandidate};
pub use order::OrderSnapshot;
pub use price::{CurrencyCode, MinorUnits, ParseCurrencyError, Price};
