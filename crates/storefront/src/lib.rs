//! Viki Storefront library.
//!
//! The cart, checkout and payment-review flow of the storefront, as a
//! library that any front end can drive.
//!
//! # Architecture
//!
//! - [`storage`] - key-value slots (in-memory or files) standing in for
//!   browser local storage
//! - [`services`] - cart mutators, checkout handoff, payment confirmation and
//!   the contact form client
//! - [`views`] - pure projections of cart state for each page
//! - [`events`] - cart change notifications for badges and acknowledgements
//! - [`state`] - [`Storefront`], which wires one storage to all of the above
//!
//! All cart state lives in the `vikiCart` slot and is re-read on every
//! operation. There is no cross-process locking.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod page;
pub mod pricing;
pub mod services;
pub mod state;
pub mod storage;
pub mod views;

pub use error::{Result, StorefrontError};
pub use page::Page;
pub use state::Storefront;
