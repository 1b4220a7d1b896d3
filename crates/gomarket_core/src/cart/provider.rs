//! Explicit cart provider and shared consumer handle.
//!
//! # Responsibility
//! - Mount one cart per provider and run its initial load exactly once.
//! - Hand out cloneable handles that serialize every cart operation.
//!
//! # Invariants
//! - `use_cart` on an unmounted provider fails with `ProviderMissing`.
//! - All handles of one provider share a single mutex-guarded store.

use super::{CartError, CartKeys, CartResult, CartStore, CartSummary, LoadOutcome};
use crate::model::line_item::{LineItem, Product};
use crate::storage::KeyValueStorage;
use log::info;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// Owns the mount state of one cart.
pub struct CartProvider<S> {
    handle: OnceLock<CartHandle<S>>,
}

impl<S> CartProvider<S> {
    /// Creates an unmounted provider.
    pub const fn new() -> Self {
        Self {
            handle: OnceLock::new(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.get().is_some()
    }
}

impl<S> Default for CartProvider<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: KeyValueStorage> CartProvider<S> {
    /// Mounts a cart over `storage` with the default keys.
    pub fn mount(&self, storage: S) -> CartResult<LoadOutcome> {
        self.mount_with_keys(storage, CartKeys::default())
    }

    /// Builds the store, loads it once, then publishes the shared handle.
    ///
    /// # Errors
    /// - `AlreadyMounted` when this provider already holds a cart.
    /// - `Storage` when the initial read fails; the provider stays unmounted.
    pub fn mount_with_keys(&self, storage: S, keys: CartKeys) -> CartResult<LoadOutcome> {
        if self.is_mounted() {
            return Err(CartError::AlreadyMounted);
        }

        let mut store = CartStore::with_keys(storage, keys);
        let outcome = store.load()?;
        let handle = CartHandle {
            store: Arc::new(Mutex::new(store)),
        };
        self.handle
            .set(handle)
            .map_err(|_| CartError::AlreadyMounted)?;

        info!("event=cart_mount module=cart status=ok outcome={outcome:?}");
        Ok(outcome)
    }

    /// Returns the shared cart handle.
    ///
    /// # Errors
    /// - `ProviderMissing` when the provider has not been mounted.
    pub fn use_cart(&self) -> CartResult<CartHandle<S>> {
        self.handle.get().cloned().ok_or(CartError::ProviderMissing)
    }
}

/// Consumer-facing cart handle.
pub struct CartHandle<S> {
    store: Arc<Mutex<CartStore<S>>>,
}

impl<S> Clone for CartHandle<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStorage> CartHandle<S> {
    /// Snapshot of the ordered line items.
    pub fn products(&self) -> CartResult<Vec<LineItem>> {
        Ok(self.lock()?.products().to_vec())
    }

    pub fn quantity_of(&self, id: &str) -> CartResult<Option<u32>> {
        Ok(self.lock()?.quantity_of(id))
    }

    pub fn summary(&self) -> CartResult<CartSummary> {
        Ok(self.lock()?.summary())
    }

    pub fn add_to_cart(&self, product: Product) -> CartResult<()> {
        self.lock()?.add_to_cart(product)
    }

    pub fn increment(&self, id: &str) -> CartResult<()> {
        self.lock()?.increment(id)
    }

    pub fn decrement(&self, id: &str) -> CartResult<()> {
        self.lock()?.decrement(id)
    }

    fn lock(&self) -> CartResult<MutexGuard<'_, CartStore<S>>> {
        self.store.lock().map_err(|_| CartError::Poisoned)
    }
}
