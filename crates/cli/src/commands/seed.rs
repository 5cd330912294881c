//! Seed the furniture catalog.

use mebel_storefront::db;

use super::{CommandError, connect};

/// Insert the built-in catalog if the products table is empty.
///
/// Migrations run first so a fresh database file can be seeded directly.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;
    db::migrate(&pool).await?;

    let inserted = db::seed::seed_catalog(&pool).await?;
    if inserted == 0 {
        tracing::info!("Catalog already present, nothing to seed");
    } else {
        tracing::info!(inserted, "Catalog seeded");
    }
    Ok(())
}
