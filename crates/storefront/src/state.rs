//! Wiring shared by every page.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::events::{CartEvents, CartListener};
use crate::services::{
    CartService, CartStore, CheckoutService, ContactError, ContactForm, OrderStore,
};
use crate::storage::{FileStorage, SharedStorage, StorageError};

/// Storefront state shared across pages.
///
/// This struct is cheaply cloneable via `Arc`. Every page built from the
/// same `Storefront` sees the same storage and the same cart listeners.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    carts: CartStore,
    orders: OrderStore,
}

impl Storefront {
    /// Create storefront state over an explicit storage backend.
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: SharedStorage) -> Self {
        let carts = CartStore::new(Arc::clone(&storage), CartEvents::new());
        let orders = OrderStore::new(storage);

        Self {
            inner: Arc::new(StorefrontInner {
                config,
                carts,
                orders,
            }),
        }
    }

    /// Create storefront state backed by files in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data directory cannot be created.
    pub fn open(config: StorefrontConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.data_dir)?;
        Ok(Self::new(config, Arc::new(storage)))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Register a listener for cart events.
    pub fn subscribe(&self, listener: impl CartListener + 'static) {
        self.inner.carts.events().subscribe(listener);
    }

    /// Listing and cart page operations.
    #[must_use]
    pub fn cart(&self) -> CartService {
        CartService::new(self.inner.carts.clone(), self.inner.config.pricing)
    }

    /// Checkout and payment page operations.
    #[must_use]
    pub fn checkout(&self) -> CheckoutService {
        CheckoutService::new(
            self.inner.carts.clone(),
            self.inner.orders.clone(),
            self.inner.config.pricing,
        )
    }

    /// Contact page form.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn contact_form(&self) -> Result<ContactForm, ContactError> {
        ContactForm::new(&self.inner.config.contact)
    }
}
