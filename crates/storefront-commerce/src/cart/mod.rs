//! Shopping cart module.
//!
//! Contains the cart aggregation engine and its pricing breakdown.

#[allow(clippy::module_inception)]
mod cart;
mod pricing;

pub use cart::{clamp_quantity, Cart, CartLine, MAX_QUANTITY_PER_LINE};
pub use pricing::{CartPricing, LinePricing};
