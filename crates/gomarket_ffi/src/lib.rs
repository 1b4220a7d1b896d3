//! Flutter bridge crate for GoMarket core.

pub mod api;
