//! Product repository: the read-mostly furniture catalog.

use sqlx::{Sqlite, SqlitePool, Transaction};

use mebel_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::Product;

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price_kopecks: i64,
    image_filename: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: Price::from_minor_units(row.price_kopecks),
            image_filename: row.image_filename,
        }
    }
}

/// A product to insert into the catalog.
#[derive(Debug, Clone, Copy)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price_kopecks: i64,
    pub image_filename: &'a str,
}

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all products in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT id, name, description, price_kopecks, image_filename
            FROM products
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Whether a product with this ID exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM products WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }
}

/// Count products using any executor (pool or open transaction).
pub(crate) async fn count_in<'e, E>(executor: E) -> Result<i64, RepositoryError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(executor)
        .await?;
    Ok(count)
}

/// Insert a product inside an open transaction.
pub(crate) async fn insert_in(
    tx: &mut Transaction<'_, Sqlite>,
    product: &NewProduct<'_>,
) -> Result<ProductId, RepositoryError> {
    let id: ProductId = sqlx::query_scalar(
        r"
        INSERT INTO products (name, description, price_kopecks, image_filename)
        VALUES (?, ?, ?, ?)
        RETURNING id
        ",
    )
    .bind(product.name)
    .bind(product.description)
    .bind(product.price_kopecks)
    .bind(product.image_filename)
    .fetch_one(&mut **tx)
    .await?;

    Ok(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let pool = memory_pool().await;

        let mut tx = pool.begin().await.unwrap();
        for name in ["KIVIK", "EKTORP", "LACK"] {
            insert_in(
                &mut tx,
                &NewProduct {
                    name,
                    description: "",
                    price_kopecks: 100_000,
                    image_filename: "x.jpg",
                },
            )
            .await
            .unwrap();
        }
        tx.commit().await.unwrap();

        let products = ProductRepository::new(&pool).list().await.unwrap();
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["KIVIK", "EKTORP", "LACK"]);
    }

    #[tokio::test]
    async fn test_exists_and_price_conversion() {
        let pool = memory_pool().await;

        let mut tx = pool.begin().await.unwrap();
        let id = insert_in(
            &mut tx,
            &NewProduct {
                name: "PALL",
                description: "Табурет с мягким сиденьем.",
                price_kopecks: 750_000,
                image_filename: "табурет.jpg",
            },
        )
        .await
        .unwrap();
        tx.commit().await.unwrap();

        let products = ProductRepository::new(&pool);
        let listed = products.list().await.unwrap();
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].price, Price::from_minor_units(750_000));
        assert!(products.exists(id).await.unwrap());
        assert!(!products.exists(ProductId::new(id.as_i64() + 1)).await.unwrap());
    }
}
