//! Cart store and mutators.
//!
//! [`CartStore`] owns the persisted `vikiCart` slot: it reads it back
//! leniently and announces every write. [`CartService`] layers the page
//! operations on top. Each operation is a complete load-modify-save, so the
//! persisted slot is the only state; nothing is cached between calls.

use serde::de::Error as _;
use tracing::{debug, info, instrument, warn};
use viki_core::{Cart, LineItem, ProductCandidate, ProductId, Totals};

use crate::events::{CartEvent, CartEvents};
use crate::pricing::Pricing;
use crate::storage::{SharedStorage, StorageError, keys};
use crate::views::{CartBadge, CartView};

/// Reads and writes the persisted cart.
#[derive(Clone)]
pub struct CartStore {
    storage: SharedStorage,
    events: CartEvents,
}

impl CartStore {
    #[must_use]
    pub fn new(storage: SharedStorage, events: CartEvents) -> Self {
        Self { storage, events }
    }

    /// Listeners notified on every save.
    #[must_use]
    pub const fn events(&self) -> &CartEvents {
        &self.events
    }

    /// Load the persisted cart for display.
    ///
    /// Never fails: a missing slot, an unreadable slot and malformed JSON all
    /// yield an empty cart. Use [`CartStore::try_load`] before writing back.
    #[must_use]
    pub fn load(&self) -> Cart {
        self.try_load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read persisted cart, showing empty cart");
            Cart::new()
        })
    }

    /// Load the persisted cart, failing only if the slot cannot be read.
    ///
    /// A missing slot or malformed JSON yields an empty cart. Lines that do
    /// not parse or have a quantity below 1 are dropped one by one and
    /// repeated ids are merged; the rest of the cart survives.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot read the slot. Callers
    /// that save afterwards must not fall back to an empty cart, or the
    /// stored cart would be overwritten.
    #[instrument(skip(self))]
    pub fn try_load(&self) -> Result<Cart, StorageError> {
        let Some(raw) = self.storage.get_item(keys::CART)? else {
            return Ok(Cart::new());
        };

        let lines = match parse_lines(&raw) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(error = %e, "Discarding malformed persisted cart");
                return Ok(Cart::new());
            }
        };

        let stored = lines.len();
        let items: Vec<LineItem> = lines
            .into_iter()
            .filter_map(|line| {
                serde_json::from_value(line)
                    .inspect_err(|e| debug!(error = %e, "Dropping unreadable cart line"))
                    .ok()
            })
            .collect();
        let cart = Cart::from_items(items);
        if cart.len() != stored {
            warn!(
                stored,
                kept = cart.len(),
                "Repaired persisted cart with invalid, duplicate or empty lines"
            );
        }
        Ok(cart)
    }

    /// Persist the full cart, replacing whatever was stored.
    ///
    /// Emits [`CartEvent::Updated`] once the write succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    #[instrument(skip(self, cart), fields(lines = cart.len()))]
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let json = serde_json::to_string(cart).map_err(|source| StorageError::Encode {
            key: keys::CART.to_owned(),
            source,
        })?;
        self.storage.set_item(keys::CART, &json)?;
        debug!("Cart saved");

        self.events.emit(&CartEvent::Updated {
            item_count: cart.item_count(),
        });
        Ok(())
    }
}

fn parse_lines(raw: &str) -> Result<Vec<serde_json::Value>, serde_json::Error> {
    // `null` is what a cleared slot looks like to some writers.
    let lines: Option<Vec<serde_json::Value>> = serde_json::from_str(raw)?;
    lines.ok_or_else(|| serde_json::Error::custom("cart slot holds null"))
}

/// Page-level cart operations.
#[derive(Clone)]
pub struct CartService {
    store: CartStore,
    pricing: Pricing,
}

impl CartService {
    #[must_use]
    pub const fn new(store: CartStore, pricing: Pricing) -> Self {
        Self { store, pricing }
    }

    /// The current cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.store.load()
    }

    /// Subtotal, shipping and total, recomputed from the stored cart.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.pricing.totals(&self.store.load())
    }

    /// Cart page view-model.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::project(&self.store.load(), &self.pricing)
    }

    /// Header badge view-model.
    #[must_use]
    pub fn badge(&self) -> CartBadge {
        CartBadge::from(&self.store.load())
    }

    /// Add one unit of a product, appending it if it is new.
    ///
    /// Emits [`CartEvent::ItemAdded`] after the save.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read or saved.
    #[instrument(skip(self, candidate), fields(id = %candidate.id))]
    pub fn add_item(&self, candidate: ProductCandidate) -> Result<Cart, StorageError> {
        let mut cart = self.store.try_load()?;
        let id = candidate.id.clone();
        let name = candidate.name.clone();
        let quantity = cart.add_item(candidate);
        self.store.save(&cart)?;

        info!(quantity, "Item added to cart");
        self.store.events().emit(&CartEvent::ItemAdded { id, name, quantity });
        Ok(cart)
    }

    /// Set a line's quantity; below 1 removes the line.
    ///
    /// Unknown ids leave the cart untouched and nothing is saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read or saved.
    #[instrument(skip(self))]
    pub fn set_quantity(&self, id: &ProductId, quantity: i64) -> Result<Cart, StorageError> {
        let mut cart = self.store.try_load()?;
        if cart.set_quantity(id, quantity) {
            self.store.save(&cart)?;
        } else {
            debug!("No line for id, quantity unchanged");
        }
        Ok(cart)
    }

    /// Adjust a line's quantity by `delta`; at or below 0 removes the line.
    ///
    /// Unknown ids leave the cart untouched and nothing is saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read or saved.
    #[instrument(skip(self))]
    pub fn increment_quantity(&self, id: &ProductId, delta: i64) -> Result<Cart, StorageError> {
        let mut cart = self.store.try_load()?;
        if cart.increment_quantity(id, delta) {
            self.store.save(&cart)?;
        } else {
            debug!("No line for id, quantity unchanged");
        }
        Ok(cart)
    }

    /// Remove a line. Removing an absent id rewrites the same cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read or saved.
    #[instrument(skip(self))]
    pub fn remove_item(&self, id: &ProductId) -> Result<Cart, StorageError> {
        let mut cart = self.store.try_load()?;
        let removed = cart.remove_item(id);
        self.store.save(&cart)?;
        debug!(removed, "Remove processed");
        Ok(cart)
    }

    /// Empty the cart and persist the empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.save(&Cart::new())?;
        info!("Cart cleared");
        self.store.events().emit(&CartEvent::Cleared);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::{Arc, Mutex};

    use viki_core::MinorUnits;

    use super::*;
    use crate::storage::{MemoryStorage, Storage};

    /// Backend whose slot exists but cannot be read.
    #[derive(Default)]
    struct UnreadableStorage {
        writes: Mutex<Vec<String>>,
    }

    impl Storage for UnreadableStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io {
                key: key.to_owned(),
                source: std::io::ErrorKind::PermissionDenied.into(),
            })
        }

        fn set_item(&self, _key: &str, value: &str) -> Result<(), StorageError> {
            self.writes.lock().unwrap().push(value.to_owned());
            Ok(())
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn service_with(storage: Arc<MemoryStorage>) -> CartService {
        CartService::new(
            CartStore::new(storage, CartEvents::new()),
            Pricing::default(),
        )
    }

    fn product(id: &str, price: i64) -> ProductCandidate {
        ProductCandidate::new(id, format!("Item {id}"), MinorUnits::new(price), "/img.png")
    }

    #[test]
    fn test_malformed_slot_loads_empty() {
        for raw in ["{not json", "null", "{\"id\":\"a\"}", "[{\"id\":\"a\"}]"] {
            let storage = Arc::new(MemoryStorage::with_items([(keys::CART, raw)]));
            let service = service_with(storage);
            assert!(service.cart().is_empty(), "{raw} should load as empty");
        }
    }

    #[test]
    fn test_missing_slot_loads_empty() {
        let service = service_with(Arc::new(MemoryStorage::new()));
        assert!(service.cart().is_empty());
        assert_eq!(service.totals().total, MinorUnits::new(500_000));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CartStore::new(storage, CartEvents::new());

        let mut cart = Cart::new();
        cart.add_item(product("b", 200));
        cart.add_item(product("a", 100));
        cart.add_item(product("b", 200));

        store.save(&cart).unwrap();
        assert_eq!(store.load(), cart);
    }

    #[test]
    fn test_add_twice_persists_quantity_two() {
        let storage = Arc::new(MemoryStorage::new());
        let service = service_with(Arc::clone(&storage));

        service.add_item(product("a", 480_000)).unwrap();
        service.add_item(product("a", 480_000)).unwrap();

        let raw = storage.get_item(keys::CART).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], "a");
        assert_eq!(value[0]["price"], 480_000);
        assert_eq!(value[0]["quantity"], 2);

        let totals = service.totals();
        assert_eq!(totals.subtotal, MinorUnits::new(960_000));
        assert_eq!(totals.total, MinorUnits::new(1_460_000));
    }

    #[test]
    fn test_remove_keeps_others() {
        let service = service_with(Arc::new(MemoryStorage::new()));
        service.add_item(product("a", 100)).unwrap();
        service.add_item(product("b", 200)).unwrap();

        let cart = service.remove_item(&ProductId::from("a")).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id, "b");
        assert_eq!(service.cart(), cart);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let a = service_with(Arc::new(MemoryStorage::new()));
        let b = service_with(Arc::new(MemoryStorage::new()));
        for service in [&a, &b] {
            service.add_item(product("a", 100)).unwrap();
            service.add_item(product("b", 200)).unwrap();
        }

        a.set_quantity(&ProductId::from("a"), 0).unwrap();
        b.remove_item(&ProductId::from("a")).unwrap();
        assert_eq!(a.cart(), b.cart());
    }

    #[test]
    fn test_increment_negative_removes() {
        let service = service_with(Arc::new(MemoryStorage::new()));
        service.add_item(product("a", 100)).unwrap();
        service.add_item(product("a", 100)).unwrap();

        let cart = service.increment_quantity(&ProductId::from("a"), -5).unwrap();
        assert!(cart.is_empty());
        assert!(service.cart().is_empty());
    }

    #[test]
    fn test_unknown_id_does_not_save() {
        let storage = Arc::new(MemoryStorage::new());
        let events = CartEvents::new();
        let saves = Arc::new(Mutex::new(0));
        {
            let saves = Arc::clone(&saves);
            events.subscribe(move |event: &CartEvent| {
                if matches!(event, CartEvent::Updated { .. }) {
                    *saves.lock().unwrap() += 1;
                }
            });
        }
        let service = CartService::new(CartStore::new(storage, events), Pricing::default());

        service.set_quantity(&ProductId::from("ghost"), 3).unwrap();
        service.increment_quantity(&ProductId::from("ghost"), 1).unwrap();
        assert_eq!(*saves.lock().unwrap(), 0);

        service.remove_item(&ProductId::from("ghost")).unwrap();
        assert_eq!(*saves.lock().unwrap(), 1);
        assert!(service.cart().is_empty());
    }

    #[test]
    fn test_events_follow_mutations() {
        let events = CartEvents::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        {
            let log = Arc::clone(&log);
            events.subscribe(move |event: &CartEvent| log.lock().unwrap().push(event.clone()));
        }
        let service = CartService::new(
            CartStore::new(Arc::new(MemoryStorage::new()), events),
            Pricing::default(),
        );

        service.add_item(product("a", 100)).unwrap();
        service.set_quantity(&ProductId::from("a"), 4).unwrap();
        service.clear().unwrap();

        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec![
                CartEvent::Updated { item_count: 1 },
                CartEvent::ItemAdded {
                    id: ProductId::from("a"),
                    name: "Item a".to_owned(),
                    quantity: 1,
                },
                CartEvent::Updated { item_count: 4 },
                CartEvent::Updated { item_count: 0 },
                CartEvent::Cleared,
            ]
        );
    }

    #[test]
    fn test_duplicate_lines_are_merged_on_load() {
        let raw = r#"[
            {"id":"a","name":"A","price":100,"image":"","quantity":1},
            {"id":"b","name":"B","price":200,"image":"","quantity":1},
            {"id":"a","name":"A","price":100,"image":"","quantity":2}
        ]"#;
        let service = service_with(Arc::new(MemoryStorage::with_items([(keys::CART, raw)])));

        let cart = service.cart();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.items()[1].id, "b");
    }

    #[test]
    fn test_bad_lines_are_dropped_individually() {
        let raw = r#"[
            {"id":"a","name":"A","price":100,"image":"","quantity":2},
            {"id":"b","name":"B","price":200,"image":"","quantity":-1},
            {"id":"c","name":"C","price":300,"image":"","quantity":null},
            {"id":"d","name":"D","price":400,"image":"","quantity":0},
            {"id":"e"}
        ]"#;
        let service = service_with(Arc::new(MemoryStorage::with_items([(keys::CART, raw)])));

        let cart = service.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id, "a");
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(service.totals().subtotal, MinorUnits::new(200));
    }

    #[test]
    fn test_unreadable_slot_is_never_overwritten() {
        let storage = Arc::new(UnreadableStorage::default());
        let service = CartService::new(
            CartStore::new(Arc::clone(&storage) as SharedStorage, CartEvents::new()),
            Pricing::default(),
        );

        assert!(service.cart().is_empty());
        assert!(matches!(
            service.add_item(product("a", 100)),
            Err(StorageError::Io { .. })
        ));
        assert!(service.set_quantity(&ProductId::from("a"), 2).is_err());
        assert!(service.increment_quantity(&ProductId::from("a"), 1).is_err());
        assert!(service.remove_item(&ProductId::from("a")).is_err());
        assert!(storage.writes.lock().unwrap().is_empty());
    }
}
