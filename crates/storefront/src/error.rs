//! Unified storefront error.
//!
//! Every service has its own error enum; `StorefrontError` wraps them so a
//! front end (the CLI) can handle any operation's failure in one place and
//! show the visitor a message that never leaks internal details.

use thiserror::Error;

use crate::catalog::TriggerError;
use crate::config::ConfigError;
use crate::services::{CheckoutError, ContactError, PaymentError};
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Add to cart error: {0}")]
    Trigger(#[from] TriggerError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    #[error("Contact form error: {0}")]
    Contact(#[from] ContactError),
}

impl StorefrontError {
    /// Text safe to show to the visitor.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Storage(_) | Self::Contact(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            Self::Trigger(_) => "This product could not be added to your cart.".to_string(),
            Self::Checkout(err) => err.user_message(),
            Self::Payment(err) => err.user_message(),
        }
    }

    /// Whether the failure came from bad visitor input rather than the system.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Trigger(_)
                | Self::Checkout(
                    CheckoutError::EmptyCart
                        | CheckoutError::MissingField(_)
                        | CheckoutError::InvalidEmail(_)
                )
                | Self::Payment(PaymentError::EmptyCart)
        )
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
