//! Print the product catalog.

use mebel_storefront::db::ProductRepository;

use super::{CommandError, connect};

/// List every product with its id and price.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;
    let products = ProductRepository::new(&pool).list().await?;

    #[allow(clippy::print_stdout)]
    {
        for product in &products {
            println!(
                "{:>4}  {:<24} {:>10.2} ₽  {}",
                product.id.to_string(),
                product.name,
                product.price.amount,
                product.image_filename
            );
        }
        println!("{} products", products.len());
    }
    Ok(())
}
