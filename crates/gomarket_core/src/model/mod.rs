//! Cart domain model.
//!
//! # Responsibility
//! - Define the line item record persisted as the cart payload.
//! - Define the product input accepted by add-to-cart flows.
//!
//! # Invariants
//! - A line item is identified by its storefront `id`.
//! - Quantity of a stored line item is never below 1.

pub mod line_item;
