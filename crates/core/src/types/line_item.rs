//! Cart line items.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::MinorUnits;

/// One product entry in the cart.
///
/// Field names are part of the persisted format (`id`, `name`, `price`,
/// `image`, `quantity`) and must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product id; unique within a cart.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Unit price in minor currency units.
    pub price: MinorUnits,
    /// Product image URL.
    pub image: String,
    /// Always at least 1 inside a [`Cart`](super::Cart).
    pub quantity: u32,
}

impl LineItem {
    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> MinorUnits {
        self.price.times(self.quantity)
    }
}

/// Product metadata carried by an "add to cart" trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCandidate {
    pub id: ProductId,
    pub name: String,
    pub price: MinorUnits,
    pub image: String,
}

impl ProductCandidate {
    /// Create a candidate from its parts.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: MinorUnits,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    /// Turn the candidate into a fresh line item with quantity 1.
    #[must_use]
    pub fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            quantity: 1,
        }
    }
}
