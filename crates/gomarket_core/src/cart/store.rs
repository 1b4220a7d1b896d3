//! In-memory cart state synchronized to key-value storage.

use super::{CartError, CartKeys, CartResult};
use crate::model::line_item::{validate_items, LineItem, Product};
use crate::storage::KeyValueStorage;
use log::{debug, error, info, warn};
use std::time::Instant;

/// Result of hydrating the cart from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet.
    Empty,
    Loaded { line_count: usize },
    /// Stored payload was unreadable or violated cart invariants; state
    /// stays empty.
    Corrupt { reason: String },
}

/// Aggregate view of the cart for badges and checkout totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSummary {
    pub line_count: usize,
    pub total_quantity: u64,
    pub subtotal: f64,
}

/// Owns the cart line items and writes them back after every mutation.
///
/// Mutations apply to memory first and then persist. A failed write is
/// returned to the caller but the in-memory change is kept.
pub struct CartStore<S> {
    storage: S,
    keys: CartKeys,
    products: Vec<LineItem>,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Creates an empty cart over `storage` with the default keys.
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, CartKeys::default())
    }

    pub fn with_keys(storage: S, keys: CartKeys) -> Self {
        Self {
            storage,
            keys,
            products: Vec::new(),
        }
    }

    /// Hydrates cart state from `keys.cart_key`.
    ///
    /// Replaces current state only when the stored payload is a valid cart.
    ///
    /// # Errors
    /// - `Storage` when the backend read fails; state is left untouched.
    pub fn load(&mut self) -> CartResult<LoadOutcome> {
        let started_at = Instant::now();
        let raw = self.storage.get_item(&self.keys.cart_key).map_err(|err| {
            error!(
                "event=cart_load module=cart status=error error_code=storage_read_failed error={err}"
            );
            CartError::from(err)
        })?;

        let Some(raw) = raw else {
            info!("event=cart_load module=cart status=ok outcome=empty");
            return Ok(LoadOutcome::Empty);
        };

        let outcome = match parse_payload(&raw) {
            Ok(items) => {
                let line_count = items.len();
                self.products = items;
                LoadOutcome::Loaded { line_count }
            }
            Err(reason) => {
                warn!("event=cart_load module=cart status=degraded outcome=corrupt reason={reason}");
                return Ok(LoadOutcome::Corrupt { reason });
            }
        };

        info!(
            "event=cart_load module=cart status=ok outcome=loaded lines={} duration_ms={}",
            self.products.len(),
            started_at.elapsed().as_millis()
        );
        Ok(outcome)
    }

    /// Ordered line items currently in the cart.
    pub fn products(&self) -> &[LineItem] {
        &self.products
    }

    pub fn quantity_of(&self, id: &str) -> Option<u32> {
        self.products
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.quantity)
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            line_count: self.products.len(),
            total_quantity: self
                .products
                .iter()
                .map(|item| u64::from(item.quantity))
                .sum(),
            subtotal: self.products.iter().map(LineItem::line_total).sum(),
        }
    }

    pub fn keys(&self) -> &CartKeys {
        &self.keys
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Adds one unit of `product`.
    ///
    /// An existing line with the same id gains one unit; otherwise the
    /// product is appended with quantity 1. Persists under `keys.cart_key`.
    ///
    /// # Errors
    /// - `Validation` for an empty id or invalid price; nothing changes.
    /// - `Storage`/`Serialization` when the write fails after mutation.
    pub fn add_to_cart(&mut self, product: Product) -> CartResult<()> {
        product.validate()?;

        match self.products.iter_mut().find(|item| item.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.products.push(LineItem::from_product(product)),
        }

        let key = self.keys.cart_key.clone();
        self.persist(&key, "add_to_cart")
    }

    /// Adds one unit to the line with `id`. Unknown ids are a no-op.
    ///
    /// Persists under `keys.quantity_key`.
    pub fn increment(&mut self, id: &str) -> CartResult<()> {
        if let Some(item) = self.products.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_add(1);
        }

        let key = self.keys.quantity_key.clone();
        self.persist(&key, "increment")
    }

    /// Removes one unit from the line with `id`, never going below 1.
    ///
    /// A line at quantity 1 stays in the cart unchanged. Unknown ids are a
    /// no-op. Persists under `keys.quantity_key`.
    pub fn decrement(&mut self, id: &str) -> CartResult<()> {
        if let Some(item) = self.products.iter_mut().find(|item| item.id == id) {
            if item.quantity > 1 {
                item.quantity -= 1;
            }
        }

        let key = self.keys.quantity_key.clone();
        self.persist(&key, "decrement")
    }

    fn persist(&self, key: &str, op: &str) -> CartResult<()> {
        let started_at = Instant::now();
        let payload = serde_json::to_string(&self.products)?;

        if let Err(err) = self.storage.set_item(key, &payload) {
            error!(
                "event=cart_persist module=cart status=error op={op} key={key} duration_ms={} error_code=storage_write_failed error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(err.into());
        }

        debug!(
            "event=cart_persist module=cart status=ok op={op} key={key} lines={} duration_ms={}",
            self.products.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

fn parse_payload(raw: &str) -> Result<Vec<LineItem>, String> {
    let items: Vec<LineItem> =
        serde_json::from_str(raw).map_err(|err| format!("invalid cart json: {err}"))?;
    validate_items(&items).map_err(|err| err.to_string())?;
    Ok(items)
}
