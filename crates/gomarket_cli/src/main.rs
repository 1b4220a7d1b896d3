//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `gomarket_core` linkage without the Flutter runtime.
//! - Optionally print the cart stored in a SQLite file given as first arg.

use gomarket_core::{CartStore, LoadOutcome, SqliteKeyValueStorage};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("gomarket_core ping={}", gomarket_core::ping());
    println!("gomarket_core version={}", gomarket_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let storage = match SqliteKeyValueStorage::open(&db_path) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut cart = CartStore::new(storage);
    match cart.load() {
        Ok(LoadOutcome::Corrupt { reason }) => println!("cart=corrupt reason={reason}"),
        Ok(_) => {
            for item in cart.products() {
                println!(
                    "item id={} quantity={} price={:.2} title={}",
                    item.id, item.quantity, item.price, item.title
                );
            }
            let summary = cart.summary();
            println!(
                "cart lines={} quantity={} subtotal={:.2}",
                summary.line_count, summary.total_quantity, summary.subtotal
            );
        }
        Err(err) => {
            eprintln!("failed to load cart: {err}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
