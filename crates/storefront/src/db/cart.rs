//! Cart ledger repository.
//!
//! One `cart_items` row per (user, product). A row's quantity is always at
//! least 1; driving it to zero or below removes the row instead.

use sqlx::SqlitePool;

use mebel_core::{Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::CartLine;

/// Outcome of [`CartRepository::adjust`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line still exists with this quantity.
    Updated(u32),
    /// The quantity dropped to zero or below and the line was deleted.
    Removed,
    /// The user had no line for this product; nothing changed.
    Missing,
}

#[derive(sqlx::FromRow)]
struct CartLineRow {
    product_id: ProductId,
    name: String,
    price_kopecks: i64,
    quantity: i64,
}

impl TryFrom<CartLineRow> for CartLine {
    type Error = RepositoryError;

    fn try_from(row: CartLineRow) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(row.quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "invalid cart quantity {} for product {}",
                    row.quantity, row.product_id
                ))
            })?;

        Ok(Self {
            product_id: row.product_id,
            name: row.name,
            price: Price::from_minor_units(row.price_kopecks),
            quantity,
        })
    }
}

fn quantity_from_db(quantity: i64) -> Result<u32, RepositoryError> {
    u32::try_from(quantity)
        .map_err(|_| RepositoryError::DataCorruption(format!("invalid cart quantity {quantity}")))
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add one unit of a product, creating the line if needed.
    ///
    /// A single upsert statement, so concurrent adds never lose an increment.
    /// Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails (including
    /// a foreign key violation for an unknown product).
    pub async fn increment(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<u32, RepositoryError> {
        let quantity: i64 = sqlx::query_scalar(
            r"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES (?, ?, 1)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + 1
            RETURNING quantity
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(self.pool)
        .await?;

        quantity_from_db(quantity)
    }

    /// Add `delta` (possibly negative) to a line's quantity.
    ///
    /// The line is deleted when the result would be zero or below. Lines that
    /// don't exist are left alone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a statement fails.
    pub async fn adjust(
        &self,
        user_id: UserId,
        product_id: ProductId,
        delta: i32,
    ) -> Result<QuantityChange, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE user_id = ? AND product_id = ? AND quantity + ? <= 0
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(i64::from(delta))
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let change = if deleted > 0 {
            QuantityChange::Removed
        } else {
            let updated: Option<i64> = sqlx::query_scalar(
                r"
                UPDATE cart_items
                SET quantity = quantity + ?
                WHERE user_id = ? AND product_id = ?
                RETURNING quantity
                ",
            )
            .bind(i64::from(delta))
            .bind(user_id)
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?;

            match updated {
                Some(quantity) => QuantityChange::Updated(quantity_from_db(quantity)?),
                None => QuantityChange::Missing,
            }
        };

        tx.commit().await?;
        Ok(change)
    }

    /// Delete a line. Returns whether a line existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ? AND product_id = ?")
            .bind(user_id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List a user's cart lines joined with their products, oldest line first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored quantity is invalid.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows: Vec<CartLineRow> = sqlx::query_as(
            r"
            SELECT p.id AS product_id, p.name, p.price_kopecks, c.quantity
            FROM cart_items c
            JOIN products p ON p.id = c.product_id
            WHERE c.user_id = ?
            ORDER BY c.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartLine::try_from).collect()
    }

    /// Delete every line of a user's cart. Returns the number of lines removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn clear(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mebel_core::Login;

    use super::*;
    use crate::db::test_support::memory_pool;
    use crate::db::{UserRepository, seed};

    async fn setup() -> (SqlitePool, UserId, Vec<ProductId>) {
        let pool = memory_pool().await;
        seed::seed_catalog(&pool).await.unwrap();
        let user = UserRepository::new(&pool)
            .create(&Login::parse("buyer").unwrap(), "hash")
            .await
            .unwrap();
        let products = crate::db::ProductRepository::new(&pool)
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        (pool, user.id, products)
    }

    #[tokio::test]
    async fn test_increment_twice_yields_two() {
        let (pool, user, products) = setup().await;
        let cart = CartRepository::new(&pool);

        assert_eq!(cart.increment(user, products[0]).await.unwrap(), 1);
        assert_eq!(cart.increment(user, products[0]).await.unwrap(), 2);

        let lines = cart.list(user).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_adjust_below_zero_deletes_line() {
        let (pool, user, products) = setup().await;
        let cart = CartRepository::new(&pool);
        for _ in 0..3 {
            cart.increment(user, products[1]).await.unwrap();
        }

        assert_eq!(
            cart.adjust(user, products[1], -5).await.unwrap(),
            QuantityChange::Removed
        );
        assert!(cart.list(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_adjust_to_exactly_zero_deletes_line() {
        let (pool, user, products) = setup().await;
        let cart = CartRepository::new(&pool);
        cart.increment(user, products[1]).await.unwrap();

        assert_eq!(
            cart.adjust(user, products[1], -1).await.unwrap(),
            QuantityChange::Removed
        );
    }

    #[tokio::test]
    async fn test_adjust_updates_and_ignores_missing() {
        let (pool, user, products) = setup().await;
        let cart = CartRepository::new(&pool);
        cart.increment(user, products[2]).await.unwrap();

        assert_eq!(
            cart.adjust(user, products[2], 4).await.unwrap(),
            QuantityChange::Updated(5)
        );
        assert_eq!(
            cart.adjust(user, products[2], 0).await.unwrap(),
            QuantityChange::Updated(5)
        );
        assert_eq!(
            cart.adjust(user, products[3], 1).await.unwrap(),
            QuantityChange::Missing
        );
        assert_eq!(cart.list(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_line_is_noop() {
        let (pool, user, products) = setup().await;
        let cart = CartRepository::new(&pool);
        cart.increment(user, products[0]).await.unwrap();

        assert!(!cart.remove(user, products[5]).await.unwrap());
        assert_eq!(cart.list(user).await.unwrap().len(), 1);

        assert!(cart.remove(user, products[0]).await.unwrap());
        assert!(cart.list(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_and_clear_is_per_user() {
        let (pool, user, products) = setup().await;
        let other = UserRepository::new(&pool)
            .create(&Login::parse("other").unwrap(), "hash")
            .await
            .unwrap()
            .id;
        let cart = CartRepository::new(&pool);

        cart.increment(user, products[4]).await.unwrap();
        cart.increment(user, products[0]).await.unwrap();
        cart.increment(other, products[0]).await.unwrap();

        let ids: Vec<_> = cart.list(user).await.unwrap().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, [products[4], products[0]]);

        assert_eq!(cart.clear(user).await.unwrap(), 2);
        assert!(cart.list(user).await.unwrap().is_empty());
        assert_eq!(cart.list(other).await.unwrap().len(), 1);
    }
}
