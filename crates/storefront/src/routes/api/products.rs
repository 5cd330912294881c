//! Catalog API.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use mebel_core::ProductId;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::models::Product;
use crate::state::AppState;

/// Product as exposed over JSON.
#[derive(Debug, Serialize)]
pub struct ProductJson {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Roubles, as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_filename: String,
}

impl From<Product> for ProductJson {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price.amount,
            image_filename: product.image_filename,
        }
    }
}

/// `GET /api/products`: the whole catalog in display order.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductJson>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products.into_iter().map(ProductJson::from).collect()))
}
