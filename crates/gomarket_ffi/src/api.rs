//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the cart operations to Dart via FRB.
//! - Own the process-wide cart provider.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Cart calls before `cart_init` report the provider-missing message.

use gomarket_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CartError, CartHandle, CartProvider, LineItem, LoadOutcome, Product, SqliteKeyValueStorage,
};
use log::warn;
use std::path::PathBuf;

const CART_DB_FILE_NAME: &str = "gomarket_cart.sqlite3";
const CART_DB_PATH_ENV: &str = "GOMARKET_DB_PATH";

static CART_PROVIDER: CartProvider<SqliteKeyValueStorage> = CartProvider::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Cart line item as rendered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: f64,
    pub quantity: u32,
}

/// Response envelope for cart calls.
#[derive(Debug, Clone, PartialEq)]
pub struct CartResponse {
    /// Whether the operation succeeded, including its write to storage.
    pub ok: bool,
    /// Cart contents after the call; empty when the cart is unavailable.
    pub items: Vec<CartItemView>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

/// Cart totals for badges and checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummaryView {
    pub ok: bool,
    pub line_count: u32,
    pub total_quantity: u64,
    pub subtotal: f64,
    pub message: String,
}

/// Opens cart storage and mounts the process-wide cart.
///
/// `db_path` may be empty; the path then comes from `GOMARKET_DB_PATH`, or
/// a file in the system temp directory.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - A second call after a successful mount reports `ok=true` and leaves
///   the mounted cart untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn cart_init(db_path: String) -> CartResponse {
    if CART_PROVIDER.is_mounted() {
        return with_cart("cart_init", |_| Ok("Cart already initialized.".to_string()));
    }

    let path = resolve_cart_db_path(db_path.as_str());
    let storage = match SqliteKeyValueStorage::open(&path) {
        Ok(storage) => storage,
        Err(err) => return CartResponse::failure(format!("cart_init failed: {err}")),
    };

    match CART_PROVIDER.mount(storage) {
        Ok(outcome) => with_cart("cart_init", |_| Ok(load_message(&outcome))),
        Err(CartError::AlreadyMounted) => {
            with_cart("cart_init", |_| Ok("Cart already initialized.".to_string()))
        }
        Err(err) => CartResponse::failure(format!("cart_init failed: {err}")),
    }
}

/// Returns the current cart contents.
#[flutter_rust_bridge::frb(sync)]
pub fn cart_products() -> CartResponse {
    with_cart("cart_products", |_| Ok(String::new()))
}

/// Adds one unit of a catalog product to the cart.
#[flutter_rust_bridge::frb(sync)]
pub fn cart_add(id: String, title: String, image_url: String, price: f64) -> CartResponse {
    let product = Product::new(id, title, image_url, price);
    with_cart("cart_add", |cart| {
        cart.add_to_cart(product)?;
        Ok("Added to cart.".to_string())
    })
}

/// Adds one unit to an existing cart line.
///
/// # FFI contract
/// - `id` is matched exactly as stored; it is not trimmed.
/// - Unknown ids leave the cart unchanged and still report `ok=true`.
#[flutter_rust_bridge::frb(sync)]
pub fn cart_increment(id: String) -> CartResponse {
    with_cart("cart_increment", |cart| {
        cart.increment(&id)?;
        Ok(String::new())
    })
}

/// Removes one unit from a cart line, keeping at least one.
///
/// # FFI contract
/// - `id` is matched exactly as stored; it is not trimmed.
/// - A line at quantity 1 stays in the cart.
#[flutter_rust_bridge::frb(sync)]
pub fn cart_decrement(id: String) -> CartResponse {
    with_cart("cart_decrement", |cart| {
        cart.decrement(&id)?;
        Ok(String::new())
    })
}

/// Returns line count, total quantity and subtotal of the mounted cart.
///
/// # FFI contract
/// - Sync call, reads in-memory state only.
/// - Never panics; `ok=false` with zeroed totals before `cart_init`.
#[flutter_rust_bridge::frb(sync)]
pub fn cart_summary() -> CartSummaryView {
    match CART_PROVIDER.use_cart().and_then(|cart| cart.summary()) {
        Ok(summary) => CartSummaryView {
            ok: true,
            line_count: u32::try_from(summary.line_count).unwrap_or(u32::MAX),
            total_quantity: summary.total_quantity,
            subtotal: summary.subtotal,
            message: String::new(),
        },
        Err(err) => CartSummaryView {
            ok: false,
            line_count: 0,
            total_quantity: 0,
            subtotal: 0.0,
            message: format!("cart_summary failed: {err}"),
        },
    }
}

impl CartResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

impl From<LineItem> for CartItemView {
    fn from(item: LineItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Runs `op` against the mounted cart and snapshots the result.
///
/// A failed write still returns the in-memory items, with `ok=false`.
fn with_cart(
    op_name: &str,
    op: impl FnOnce(&CartHandle<SqliteKeyValueStorage>) -> Result<String, CartError>,
) -> CartResponse {
    let cart = match CART_PROVIDER.use_cart() {
        Ok(cart) => cart,
        Err(err) => return CartResponse::failure(format!("{op_name} failed: {err}")),
    };

    let result = op(&cart);
    let items = match cart.products() {
        Ok(items) => items.into_iter().map(CartItemView::from).collect(),
        Err(err) => return CartResponse::failure(format!("{op_name} failed: {err}")),
    };

    match result {
        Ok(message) => CartResponse {
            ok: true,
            items,
            message,
        },
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op={op_name} error={err}");
            CartResponse {
                ok: false,
                items,
                message: format!("{op_name} failed: {err}"),
            }
        }
    }
}

fn load_message(outcome: &LoadOutcome) -> String {
    match outcome {
        LoadOutcome::Empty => "Cart is empty.".to_string(),
        LoadOutcome::Loaded { line_count } => format!("Loaded {line_count} cart line(s)."),
        LoadOutcome::Corrupt { reason } => {
            format!("Stored cart was unreadable and has been ignored: {reason}")
        }
    }
}

fn resolve_cart_db_path(requested: &str) -> PathBuf {
    let requested = requested.trim();
    if !requested.is_empty() {
        return PathBuf::from(requested);
    }
    if let Ok(raw) = std::env::var(CART_DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(CART_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{
        cart_add, cart_decrement, cart_increment, cart_init, cart_products, cart_summary,
        core_version, init_logging, load_message, ping, resolve_cart_db_path,
    };
    use gomarket_core::{KeyValueStorage, LoadOutcome, SqliteKeyValueStorage, CART_STORAGE_KEY};
    use std::path::PathBuf;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn explicit_db_path_wins() {
        assert_eq!(
            resolve_cart_db_path(" /data/cart.sqlite3 "),
            PathBuf::from("/data/cart.sqlite3")
        );
    }

    #[test]
    fn load_message_describes_corrupt_cart() {
        let message = load_message(&LoadOutcome::Corrupt {
            reason: "invalid cart json".to_string(),
        });
        assert!(message.contains("invalid cart json"));
    }

    // The provider is process-wide, so the whole lifecycle runs in one test.
    #[test]
    fn cart_lifecycle_through_ffi() {
        let before = cart_products();
        assert!(!before.ok);
        assert!(before.message.contains("must be used within a CartProvider"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.sqlite3");
        {
            let seeded = SqliteKeyValueStorage::open(&path).unwrap();
            seeded
                .set_item(
                    CART_STORAGE_KEY,
                    r#"[{"id":" b","title":"Cap","image_url":"cap.png","price":5.0,"quantity":1}]"#,
                )
                .unwrap();
        }
        let init = cart_init(path.to_str().unwrap().to_string());
        assert!(init.ok, "{}", init.message);
        assert_eq!(init.items.len(), 1);
        assert_eq!(init.items[0].id, " b");

        let padded = cart_increment(" b".to_string());
        assert!(padded.ok, "{}", padded.message);
        assert_eq!(padded.items[0].quantity, 2);
        assert_eq!(cart_decrement(" b".to_string()).items[0].quantity, 1);

        let added = cart_add(
            "a".to_string(),
            "Mug".to_string(),
            "mug.png".to_string(),
            10.0,
        );
        assert!(added.ok, "{}", added.message);
        let again = cart_add(
            "a".to_string(),
            "Mug".to_string(),
            "mug.png".to_string(),
            10.0,
        );
        assert_eq!(again.items[1].id, "a");
        assert_eq!(again.items[1].quantity, 2);

        assert_eq!(cart_decrement("a".to_string()).items[1].quantity, 1);
        assert_eq!(cart_decrement("a".to_string()).items[1].quantity, 1);
        assert_eq!(cart_increment("a".to_string()).items[1].quantity, 2);

        let rejected = cart_add(String::new(), "x".to_string(), "x.png".to_string(), 1.0);
        assert!(!rejected.ok);
        assert_eq!(rejected.items.len(), 2);

        let summary = cart_summary();
        assert!(summary.ok);
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.subtotal, 25.0);

        let reinit = cart_init(String::new());
        assert!(reinit.ok);
        assert_eq!(reinit.items.len(), 2);
    }
}
