//! Viki Core - Shared cart types.
//!
//! This crate provides the types every storefront page works with:
//! - line items and the cart they live in
//! - money in minor currency units and its display formatting
//! - the order snapshot handed from checkout to payment
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no storage, no
//! HTTP clients, no logging. Cart mutations and totals live here so they can
//! be tested without any store behind them.
//!
//! # Modules
//!
//! - [`types`] - Newtypes for product ids, prices and emails plus the cart model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
