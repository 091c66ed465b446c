//! Cart change notifications.
//!
//! Views that mirror cart state (the header count badge, the "added to cart"
//! acknowledgement) subscribe here instead of being called directly by the
//! store.

use std::sync::{Arc, PoisonError, RwLock};

use viki_core::ProductId;

/// Something that happened to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// One unit of a product was added. Carries the acknowledgement text.
    ItemAdded {
        id: ProductId,
        name: String,
        quantity: u32,
    },
    /// The cart was cleared, explicitly or after payment.
    Cleared,
    /// The cart was persisted. Emitted after every save.
    Updated { item_count: u32 },
}

impl CartEvent {
    /// User-facing acknowledgement, if the event warrants one.
    #[must_use]
    pub fn acknowledgement(&self) -> Option<String> {
        match self {
            Self::ItemAdded { name, .. } => Some(format!("\"{name}\" added to cart!")),
            Self::Cleared | Self::Updated { .. } => None,
        }
    }
}

/// Receives cart events.
pub trait CartListener: Send + Sync {
    fn on_event(&self, event: &CartEvent);
}

impl<F> CartListener for F
where
    F: Fn(&CartEvent) + Send + Sync,
{
    fn on_event(&self, event: &CartEvent) {
        self(event);
    }
}

/// Fan-out list of listeners, cheap to clone.
#[derive(Clone, Default)]
pub struct CartEvents {
    listeners: Arc<RwLock<Vec<Arc<dyn CartListener>>>>,
}

impl std::fmt::Debug for CartEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("CartEvents")
            .field("listeners", &count)
            .finish()
    }
}

impl CartEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for all future events.
    pub fn subscribe(&self, listener: impl CartListener + 'static) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Deliver an event to every listener, in subscription order.
    pub fn emit(&self, event: &CartEvent) {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener.on_event(event);
        }
    }
}
