//! Cart state container and its provider.
//!
//! # Responsibility
//! - Hold the ordered cart line items in memory.
//! - Persist the full list after every mutation.
//! - Gate consumer access behind an explicitly mounted provider.
//!
//! # Invariants
//! - At most one line item per product id.
//! - Quantities never drop below 1 through cart operations.
//! - Load and add-to-cart use `CartKeys::cart_key`; increment and decrement
//!   persist under `CartKeys::quantity_key`. The two default keys differ.

mod error;
mod provider;
mod store;

pub use error::{CartError, CartResult};
pub use provider::{CartHandle, CartProvider};
pub use store::{CartStore, CartSummary, LoadOutcome};

/// Storage key read at load time and written by add-to-cart.
pub const CART_STORAGE_KEY: &str = "@GoMarket:product";

/// Storage key written by increment and decrement.
pub const CART_QUANTITY_STORAGE_KEY: &str = "@GoMarketplace:products";

/// Storage keys used by the cart persistence paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartKeys {
    /// Read by `load`, written by `add_to_cart`.
    pub cart_key: String,
    /// Written by `increment` and `decrement`.
    pub quantity_key: String,
}

impl CartKeys {
    /// Routes every persistence path through one key.
    pub fn unified(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            cart_key: key.clone(),
            quantity_key: key,
        }
    }

    pub fn is_unified(&self) -> bool {
        self.cart_key == self.quantity_key
    }
}

impl Default for CartKeys {
    fn default() -> Self {
        Self {
            cart_key: CART_STORAGE_KEY.to_string(),
            quantity_key: CART_QUANTITY_STORAGE_KEY.to_string(),
        }
    }
}
