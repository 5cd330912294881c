//! Database migration command.
//!
//! Applies `crates/storefront/migrations/` and the session store schema.
//! Already-applied migrations are skipped, so running it twice is harmless.

use mebel_storefront::db;

use super::{CommandError, connect};

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running storefront migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}
