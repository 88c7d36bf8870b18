//! Cart and cart line types.

use crate::cart::{CartPricing, LinePricing};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// Clamp a requested quantity into `[1, MAX_QUANTITY_PER_LINE]`.
pub fn clamp_quantity(quantity: i64) -> i64 {
    quantity.clamp(1, MAX_QUANTITY_PER_LINE)
}

/// A shopping cart.
///
/// Lines are kept in insertion order and are unique by product id. Every line
/// holds a quantity of at least 1.
///
/// Deserialized carts are rebuilt line by line through [`Cart::add_to_cart`],
/// so stored duplicates are merged and quantities are clamped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(from = "StoredCart")]
pub struct Cart {
    lines: Vec<CartLine>,
    /// Cart currency.
    pub currency: Currency,
}

/// Wire shape of a cart, before validation.
#[derive(Deserialize)]
struct StoredCart {
    #[serde(default)]
    lines: Vec<CartLine>,
    #[serde(default)]
    currency: Currency,
}

impl From<StoredCart> for Cart {
    fn from(stored: StoredCart) -> Self {
        let mut cart = Cart::with_currency(stored.currency);
        for line in stored.lines {
            cart.add_to_cart(&line.product, line.quantity);
        }
        cart
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart priced in `currency`.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` of a product.
    ///
    /// Merges into the existing line for the same product id, otherwise
    /// appends a new line holding a snapshot of `product`. A quantity below 1
    /// is treated as 1, and merged totals saturate at `MAX_QUANTITY_PER_LINE`.
    /// Returns the line's resulting quantity.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) -> i64 {
        let quantity = clamp_quantity(quantity);

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            existing.quantity = existing
                .quantity
                .saturating_add(quantity)
                .min(MAX_QUANTITY_PER_LINE);
            tracing::debug!(product_id = %product.id, quantity = existing.quantity, "cart line merged");
            return existing.quantity;
        }

        self.lines.push(CartLine::new(product.clone(), quantity));
        tracing::debug!(product_id = %product.id, quantity, "cart line added");
        quantity
    }

    /// Remove the line for `product_id`. Returns false when there was none.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);
        self.lines.len() < len_before
    }

    /// Set the quantity for `product_id`, clamped to at least 1. Returns false
    /// when there is no such line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        match self.lines.iter_mut().find(|l| l.product.id == product_id) {
            Some(line) => {
                line.quantity = clamp_quantity(quantity);
                true
            }
            None => false,
        }
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line quantities.
    pub fn total_item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn get_line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        Ok(self.calculate_pricing()?.subtotal)
    }

    /// Calculate per-line and cart totals.
    ///
    /// Returns an error on currency mismatch or arithmetic overflow.
    pub fn calculate_pricing(&self) -> Result<CartPricing, CommerceError> {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                let unit_price = line.product.price;
                if unit_price.currency != self.currency {
                    return Err(CommerceError::CurrencyMismatch {
                        expected: self.currency.code().to_string(),
                        got: unit_price.currency.code().to_string(),
                    });
                }
                Ok(LinePricing {
                    product_id: line.product.id,
                    unit_price,
                    quantity: line.quantity,
                    total: line.total()?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = Money::try_sum(lines.iter().map(|l| &l.total), self.currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(CartPricing {
            subtotal,
            item_count: self.total_item_count(),
            lines,
        })
    }
}

/// One product's aggregated quantity in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    pub product: Product,
    /// Quantity, at least 1.
    pub quantity: i64,
}

impl CartLine {
    fn new(product: Product, quantity: i64) -> Self {
        Self { product, quantity }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}
