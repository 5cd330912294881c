//! Cart service.
//!
//! Parses the loosely typed cart request fields and applies them to the
//! ledger, checking that the product exists first.

use serde_json::Value;
use sqlx::SqlitePool;
use thiserror::Error;

use mebel_core::{ProductId, UserId};

use crate::db::{CartRepository, ProductRepository, QuantityChange, RepositoryError};
use crate::models::CartSummary;

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No product id in the request.
    #[error("Не указан товар.")]
    MissingProduct,

    /// Delta is not an integer.
    #[error("Неверное количество.")]
    InvalidDelta,

    /// The product id doesn't name a catalog product.
    #[error("Товар не найден.")]
    ProductNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Read a product id from a request field.
///
/// Absent, `null`, `false`, `0` and `""` mean "not given". Integers and
/// strings holding an integer are ids. Anything else can't name a product.
///
/// # Errors
///
/// Returns `CartError::MissingProduct` for "not given" values and
/// `CartError::ProductNotFound` for values that can't be an id.
pub fn parse_product_id(value: Option<&Value>) -> Result<ProductId, CartError> {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => Err(CartError::MissingProduct),
        Some(Value::Number(n)) if n.as_i64() == Some(0) => Err(CartError::MissingProduct),
        Some(Value::String(s)) if s.is_empty() => Err(CartError::MissingProduct),
        Some(Value::Number(n)) => n.as_i64().map(ProductId::new).ok_or(CartError::ProductNotFound),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(ProductId::new)
            .map_err(|_| CartError::ProductNotFound),
        Some(_) => Err(CartError::ProductNotFound),
    }
}

/// Read a quantity delta from a request field.
///
/// Absent means 0. Integers and strings holding an integer (surrounding
/// whitespace allowed) are accepted; floats are truncated toward zero.
///
/// # Errors
///
/// Returns `CartError::InvalidDelta` for any other value, or one outside the
/// `i32` range.
pub fn parse_delta(value: Option<&Value>) -> Result<i32, CartError> {
    match value {
        None => Ok(0),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i32::try_from(i).map_err(|_| CartError::InvalidDelta),
            None => n.as_f64().and_then(truncate_delta).ok_or(CartError::InvalidDelta),
        },
        Some(Value::String(s)) => s.trim().parse::<i32>().map_err(|_| CartError::InvalidDelta),
        Some(_) => Err(CartError::InvalidDelta),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_delta(value: f64) -> Option<i32> {
    let truncated = value.trunc();
    (f64::from(i32::MIN)..=f64::from(i32::MAX))
        .contains(&truncated)
        .then_some(truncated as i32)
}

/// Cart service for one request.
pub struct CartService<'a> {
    products: ProductRepository<'a>,
    cart: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            products: ProductRepository::new(pool),
            cart: CartRepository::new(pool),
        }
    }

    async fn ensure_product(&self, product_id: ProductId) -> Result<(), CartError> {
        if self.products.exists(product_id).await? {
            Ok(())
        } else {
            Err(CartError::ProductNotFound)
        }
    }

    /// Add one unit of a product. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product doesn't exist.
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<u32, CartError> {
        self.ensure_product(product_id).await?;
        let quantity = self.cart.increment(user_id, product_id).await?;
        tracing::debug!(%user_id, %product_id, quantity, "Added to cart");
        Ok(quantity)
    }

    /// Remove a product's line. Removing a line that isn't there is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product doesn't exist.
    pub async fn remove(&self, user_id: UserId, product_id: ProductId) -> Result<(), CartError> {
        self.ensure_product(product_id).await?;
        let removed = self.cart.remove(user_id, product_id).await?;
        tracing::debug!(%user_id, %product_id, removed, "Removed from cart");
        Ok(())
    }

    /// Change a line's quantity by `delta`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product doesn't exist.
    pub async fn change(
        &self,
        user_id: UserId,
        product_id: ProductId,
        delta: i32,
    ) -> Result<QuantityChange, CartError> {
        self.ensure_product(product_id).await?;
        let change = self.cart.adjust(user_id, product_id, delta).await?;
        tracing::debug!(%user_id, %product_id, delta, ?change, "Changed cart quantity");
        Ok(change)
    }

    /// The user's cart with line and grand totals.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the query fails.
    pub async fn summary(&self, user_id: UserId) -> Result<CartSummary, CartError> {
        let lines = self.cart.list(user_id).await?;
        Ok(CartSummary::new(lines))
    }
}
