//! Product identifiers.
//!
//! Listing pages tag every "add to cart" trigger with a product id. The id is
//! the cart's deduplication key, so it is kept as an opaque string and never
//! synthesized from anything else.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque product identifier.
///
/// Serialized transparently so the persisted cart keeps its `"id": "..."`
/// shape.
///
/// ```
/// use viki_core::ProductId;
///
/// let id = ProductId::new("ankara-dress");
/// assert_eq!(id.as_str(), "ankara-dress");
/// assert_eq!(id.to_string(), "ankara-dress");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ProductId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProductId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
