//! Page states the flow can move between.

use core::fmt;

/// A storefront page. Operations that navigate return the page to show next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Landing page.
    Home,
    /// Category listing, where products are browsed and added.
    Products,
    Cart,
    Checkout,
    Payment,
}

impl Page {
    /// Document path of the page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::Products => "categories.html",
            Self::Cart => "cart.html",
            Self::Checkout => "checkout.html",
            Self::Payment => "payment.html",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
