//! "Add to cart" triggers from listing pages.
//!
//! Product cards carry their metadata as string attributes. The button may
//! carry its own `id`; otherwise the enclosing card's `product_id` is used.
//! A trigger with neither is rejected: synthesizing an id (e.g. from a clock)
//! would give every click its own line and defeat deduplication.

use serde::Deserialize;
use thiserror::Error;
use viki_core::{MinorUnits, ProductCandidate, ProductId};

/// Errors turning trigger metadata into a cart candidate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TriggerError {
    #[error("add-to-cart trigger has no product id")]
    MissingId,

    #[error("add-to-cart trigger has no product name")]
    MissingName,

    #[error("invalid price '{0}': expected a non-negative integer in minor units")]
    InvalidPrice(String),
}

/// Raw metadata attached to an "add to cart" control.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddToCartTrigger {
    /// Id on the button itself.
    #[serde(default)]
    pub id: Option<String>,
    /// Id on the enclosing product card.
    #[serde(default)]
    pub product_id: Option<String>,
    pub name: String,
    /// Price in minor units, as text.
    pub price: String,
    #[serde(default)]
    pub image: String,
}

impl AddToCartTrigger {
    /// Resolve the canonical product id: button id, then card id.
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::MissingId` when both are absent or blank.
    pub fn product_id(&self) -> Result<ProductId, TriggerError> {
        [self.id.as_deref(), self.product_id.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|id| !id.is_empty())
            .map(ProductId::from)
            .ok_or(TriggerError::MissingId)
    }

    /// Validate the metadata and build a cart candidate.
    ///
    /// # Errors
    ///
    /// Returns `TriggerError` for a missing id or name, or a price that is
    /// not a non-negative integer.
    pub fn into_candidate(self) -> Result<ProductCandidate, TriggerError> {
        let id = self.product_id()?;

        let name = self.name.trim();
        if name.is_empty() {
            return Err(TriggerError::MissingName);
        }

        let price = self
            .price
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|price| *price >= 0)
            .ok_or_else(|| TriggerError::InvalidPrice(self.price.clone()))?;

        Ok(ProductCandidate::new(
            id,
            name,
            MinorUnits::new(price),
            self.image.trim(),
        ))
    }
}
