//! Persisted key-value slots.
//!
//! The storefront keeps all of its state in a handful of string slots, the
//! same shape as browser local storage. Everything above this module talks to
//! the [`Storage`] trait, so pages can run against an in-memory map in tests
//! and against a directory of JSON files from the CLI.
//!
//! # Slots
//!
//! - [`keys::CART`] - JSON array of line items
//! - [`keys::ORDER`] - JSON order snapshot handed from checkout to payment
//!
//! There is no locking across processes. Two writers on the same slot race
//! and the last write wins.

use std::sync::Arc;

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Slot names shared by every page.
pub mod keys {
    /// Key for the persisted cart.
    pub const CART: &str = "vikiCart";

    /// Key for the checkout-to-payment order snapshot.
    pub const ORDER: &str = "vikiOrder";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on slot '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded for storage.
    #[error("Failed to encode slot '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key cannot be mapped onto the backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string key-value store with local-storage semantics.
///
/// `set_item` replaces the whole value. Removing a missing key is not an
/// error.
pub trait Storage: Send + Sync {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace a slot's value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage handle shared between the cart and checkout services.
pub type SharedStorage = Arc<dyn Storage>;
