//! Core cart logic for the GoMarket storefront app.
//! This crate owns cart state, its invariants and its device persistence.

pub mod cart;
pub mod db;
pub mod logging;
pub mod model;
pub mod storage;

pub use cart::{
    CartError, CartHandle, CartKeys, CartProvider, CartResult, CartStore, CartSummary,
    LoadOutcome, CART_QUANTITY_STORAGE_KEY, CART_STORAGE_KEY,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::line_item::{LineItem, LineItemValidationError, Product, ProductId};
pub use storage::{
    KeyValueStorage, MemoryKeyValueStorage, SqliteKeyValueStorage, StorageError, StorageResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
