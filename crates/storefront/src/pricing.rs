//! Currency and shipping settings applied to every total.

use viki_core::{Cart, CurrencyCode, MinorUnits, Price, Totals};

use crate::config::DEFAULT_SHIPPING_COST;

/// Display currency plus the flat shipping fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    currency: CurrencyCode,
    shipping: MinorUnits,
}

impl Default for Pricing {
    fn default() -> Self {
        Self::new(CurrencyCode::default(), DEFAULT_SHIPPING_COST)
    }
}

impl Pricing {
    #[must_use]
    pub const fn new(currency: CurrencyCode, shipping: MinorUnits) -> Self {
        Self { currency, shipping }
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    #[must_use]
    pub const fn shipping(&self) -> MinorUnits {
        self.shipping
    }

    /// Recompute subtotal, shipping and total from the whole cart.
    #[must_use]
    pub fn totals(&self, cart: &Cart) -> Totals {
        cart.totals(self.shipping)
    }

    /// Render a minor-unit amount, e.g. `₦5,000.00`.
    #[must_use]
    pub fn format(&self, amount: MinorUnits) -> String {
        Price::new(amount, self.currency).display()
    }
}
