//! Catalog product domain type.

use mebel_core::{Price, ProductId};

/// A furniture product from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// File name of the product photo inside the static directory.
    pub image_filename: String,
}
