//! Database operations for the storefront `SQLite` store.
//!
//! ## Tables
//!
//! - `users` - Login and Argon2 password hash
//! - `products` - Furniture catalog (seeded once, read-only afterwards)
//! - `cart_items` - Per-user cart lines, one row per (user, product)
//! - `tower_sessions` - Tower-sessions storage (created by the session store)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/`, embedded into the
//! binary, and applied on startup or explicitly via:
//! ```bash
//! cargo run -p mebel-cli -- migrate
//! ```

pub mod cart;
pub mod products;
pub mod seed;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use cart::{CartRepository, QuantityChange};
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique login).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Errors that can occur while bringing the schema up to date.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("session store migration error: {0}")]
    SessionStore(#[from] sqlx::Error),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing and foreign keys are enforced.
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let url = database_url.expose_secret();
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(10)
            .min_connections(2)
    };

    pool_options
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Apply the embedded schema migrations and the session store schema.
///
/// Idempotent: already-applied migrations are skipped.
///
/// # Errors
///
/// Returns `MigrationError` if a migration fails to apply.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrationError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    crate::middleware::session::migrate_session_store(pool).await?;
    Ok(())
}

/// Returns true if the error is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[cfg(test)]
pub(crate) mod test_support {
    use secrecy::SecretString;
    use sqlx::SqlitePool;

    /// Fresh, fully migrated in-memory database.
    #[allow(clippy::expect_used)]
    pub async fn memory_pool() -> SqlitePool {
        let pool = super::create_pool(&SecretString::from("sqlite::memory:"))
            .await
            .expect("in-memory pool");
        super::migrate(&pool).await.expect("migrations apply");
        pool
    }
}
