//! Cart domain types.

use mebel_core::{Price, ProductId};

/// One product line of a user's cart, joined with its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A user's full cart with its grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: Price,
}

impl CartSummary {
    /// Build a summary, computing the grand total from the line totals.
    #[must_use]
    pub fn new(lines: Vec<CartLine>) -> Self {
        let total = lines.iter().map(CartLine::total).sum();
        Self { lines, total }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}
